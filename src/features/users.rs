use log::{debug, error};

use crate::{
    core::{api::ApiClient, common::completion::with_completion, session::SessionStore},
    view::View,
};

use super::FeatureError;

/// Dumps the raw user listing into the debug panel. Failures are only logged.
pub async fn dump_users(
    api: &ApiClient,
    store: &SessionStore,
    view: &dyn View,
) -> Result<(), FeatureError> {
    let session = store.get().await?;

    let res = with_completion(api.users(&session), || {
        debug!("get users request complete");
    })
    .await;

    let envelope = match res {
        Ok(r) => r,
        Err(e) => {
            error!("get users error: {e}");
            return Err(e.into());
        }
    };

    debug!("get users response: {}", envelope.message);

    let dump = serde_json::to_string_pretty(&envelope).map_err(|e| {
        FeatureError::Rejected(format!("cannot format user listing: {e}"))
    })?;
    view.render_users(&dump);

    if envelope.is_error {
        return Err(FeatureError::Rejected(envelope.message));
    }

    Ok(())
}
