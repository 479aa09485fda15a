use log::{debug, error, info, warn};

use crate::{
    core::{
        api::{models::Credentials, ApiClient},
        common::completion::with_completion,
        session::{Session, SessionStore},
    },
    view::{Notice, View},
};

use super::FeatureError;

const SESSION_NOT_FOUND: &str = "session not found";

/// Logs in and stores the returned token along with the submitted username.
///
/// Only the token is persisted, never the password. An error answer never touches the stored
/// session.
pub async fn login(
    api: &ApiClient,
    store: &SessionStore,
    view: &dyn View,
    credentials: Credentials,
) -> Result<Session, FeatureError> {
    if credentials.username.trim().is_empty() || credentials.password.is_empty() {
        error!("username | password empty");
        let err = FeatureError::Validation("username and password are required".to_string());
        view.notify(&Notice::error("Login error", err.user_message()));
        return Err(err);
    }

    let username = credentials.username.clone();

    let res = with_completion(api.login(&credentials), || {
        debug!("login request complete");
    })
    .await;

    let envelope = match res {
        Ok(r) => r,
        Err(e) => {
            error!("login error: {e}");
            view.notify(&Notice::error("Login error", e.to_string()));
            return Err(e.into());
        }
    };

    let message = envelope.message.clone();

    let token = match envelope.into_result() {
        Ok(Some(t)) if !t.is_empty() => t,
        Ok(_) => {
            let err = FeatureError::Rejected("server did not return a session token".to_string());
            view.notify(&Notice::error("Login error", err.user_message()));
            return Err(err);
        }
        Err(e) => {
            view.notify(&Notice::error("Login error", e.reason.as_str()));
            return Err(FeatureError::Rejected(e.reason));
        }
    };

    if let Err(e) = store.set(&username, &token).await {
        error!("cannot store session: {e}");
        view.notify(&Notice::error("Login error", e.to_string()));
        return Err(e.into());
    }

    info!("user {username} logged in");
    view.notify(&Notice::success(
        format!("Login [{username}] success!"),
        message,
    ));

    Ok(store.refresh().await?)
}

/// Logs out the stored session.
///
/// A "session not found" answer means the server already forgot it, the local session is cleared
/// as for a successful logout.
pub async fn logout(
    api: &ApiClient,
    store: &SessionStore,
    view: &dyn View,
) -> Result<(), FeatureError> {
    let session = store.get().await?;

    if !session.is_logged() {
        error!("username | sessionId empty");
        view.notify(&Notice::error("Logout error", "not logged in"));
        return Err(FeatureError::NotLogged);
    }

    let res = with_completion(api.logout(&session), || {
        debug!("logout request complete");
    })
    .await;

    let envelope = match res {
        Ok(r) => r,
        Err(e) => {
            error!("logout error: {e}");
            view.notify(&Notice::error("Logout error", e.to_string()));
            return Err(e.into());
        }
    };

    if !envelope.is_error {
        store.clear().await?;
        info!("user {} logged out", session.username);
        view.notify(&Notice::success(
            format!("Logout [{}] success!", session.username),
            envelope.message,
        ));
        return Ok(());
    }

    view.notify(&Notice::error("Logout error", envelope.message.as_str()));

    if envelope.message.contains(SESSION_NOT_FOUND) {
        warn!("server has no session for {}, clearing it", session.username);
        store.clear().await?;
        return Ok(());
    }

    Err(FeatureError::Rejected(envelope.message))
}
