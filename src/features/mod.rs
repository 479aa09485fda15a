use thiserror::Error;

use crate::core::api::ClientError;

pub mod login;
pub mod profile;
pub mod registration;
pub mod spends;
pub mod users;

/// Failure of a user action. Every variant has already been reported to the view when it is
/// returned, the stored session is left as it was before the action.
#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("{0}")]
    Validation(String),
    #[error("not logged in")]
    NotLogged,
    #[error("rejected by server: {0}")]
    Rejected(String),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("session storage error: {0}")]
    Storage(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl FeatureError {
    /// Text shown to the user, the server message when there is one.
    pub fn user_message(&self) -> String {
        match self {
            FeatureError::Rejected(message) => message.clone(),
            other => other.to_string(),
        }
    }
}
