use chrono::{DateTime, Utc};
use log::{debug, warn};

use super::{
    session_storage::{SessionKey, SessionStorage},
    Session,
};

pub type RefreshHook = Box<dyn Fn(&Session) + Send + Sync>;

/// Session context handed to every feature.
///
/// Wraps the persisted username/token pair, `clear` also fires the refresh hook so the login
/// state shown to the user follows the stored one.
pub struct SessionStore {
    storage: Box<dyn SessionStorage>,
    on_refresh: Option<RefreshHook>,
}

impl SessionStore {
    pub fn new(storage: Box<dyn SessionStorage>) -> Self {
        Self {
            storage,
            on_refresh: None,
        }
    }

    pub fn with_refresh(mut self, hook: RefreshHook) -> Self {
        self.on_refresh = Some(hook);
        self
    }

    pub async fn get(&self) -> Result<Session, Box<dyn std::error::Error + Send + Sync>> {
        let username = self
            .storage
            .get(SessionKey::Username)
            .await?
            .unwrap_or_default();
        let session_id = self
            .storage
            .get(SessionKey::SessionId)
            .await?
            .unwrap_or_default();

        Ok(Session::new(username, session_id))
    }

    pub async fn set(
        &self,
        username: &str,
        session_id: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        debug!("storing session of {username}");

        self.storage
            .set_all(vec![
                (SessionKey::Username, username.to_string()),
                (SessionKey::SessionId, session_id.to_string()),
            ])
            .await
    }

    pub async fn clear(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        debug!("clearing session");

        self.storage
            .set_all(vec![
                (SessionKey::Username, String::new()),
                (SessionKey::SessionId, String::new()),
            ])
            .await?;

        self.refresh().await?;

        Ok(())
    }

    /// Reads the stored session and hands it to the refresh hook.
    pub async fn refresh(&self) -> Result<Session, Box<dyn std::error::Error + Send + Sync>> {
        let session = self.get().await?;

        if let Some(hook) = &self.on_refresh {
            hook(&session);
        }

        Ok(session)
    }

    /// Time of the last answered session check, an unreadable value counts as never checked.
    pub async fn last_check(
        &self,
    ) -> Result<Option<DateTime<Utc>>, Box<dyn std::error::Error + Send + Sync>> {
        let raw = match self.storage.get(SessionKey::LastCheck).await? {
            Some(r) if !r.trim().is_empty() => r,
            _ => return Ok(None),
        };

        match DateTime::parse_from_rfc3339(raw.trim()) {
            Ok(d) => Ok(Some(d.with_timezone(&Utc))),
            Err(e) => {
                warn!("ignoring unreadable session check timestamp {raw}: {e}");
                Ok(None)
            }
        }
    }

    pub async fn record_check(
        &self,
        at: DateTime<Utc>,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.storage
            .set(SessionKey::LastCheck, at.to_rfc3339())
            .await
    }
}
