use serde::Serialize;

pub mod session_storage;
pub mod session_store;
pub mod validator;
pub use session_storage::FileSystemStorage;
pub use session_store::SessionStore;
pub use validator::{SessionValidator, ValidationOutcome};


/// Identity of the logged user as persisted between runs.
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

impl Session {
    pub fn new(username: String, session_id: String) -> Self {
        Self {
            username,
            session_id,
        }
    }

    /// A session is live as long as both values are set, the token format is never inspected.
    pub fn is_logged(&self) -> bool {
        !self.username.is_empty() && !self.session_id.is_empty()
    }
}
