use log::error;

use crate::{
    core::{api::models::UserProfile, api::ApiClient, session::SessionStore},
    view::{Notice, View},
};

use super::FeatureError;

const TITLE: &str = "Profile";

pub async fn show_profile(
    api: &ApiClient,
    store: &SessionStore,
    view: &dyn View,
) -> Result<UserProfile, FeatureError> {
    let session = store.get().await?;

    if !session.is_logged() {
        view.notify(&Notice::error(TITLE, "not logged in"));
        return Err(FeatureError::NotLogged);
    }

    let envelope = match api.me(&session).await {
        Ok(r) => r,
        Err(e) => {
            error!("get profile error: {e}");
            view.notify(&Notice::error(TITLE, e.to_string()));
            return Err(e.into());
        }
    };

    match envelope.into_result() {
        Ok(Some(profile)) => {
            view.render_profile(&profile);
            Ok(profile)
        }
        Ok(None) => {
            view.notify(&Notice::error(TITLE, "empty profile"));
            Err(FeatureError::Rejected("empty profile".to_string()))
        }
        Err(e) => {
            view.notify(&Notice::error(TITLE, e.reason.as_str()));
            Err(FeatureError::Rejected(e.reason))
        }
    }
}
