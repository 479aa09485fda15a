use std::{collections::BTreeMap, fmt::Display, path::PathBuf};

use async_trait::async_trait;
use log::{debug, warn};
use mockall::automock;
use tokio::{
    fs::{self, File},
    io::{AsyncReadExt, AsyncWriteExt},
};

/// Keys persisted between runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SessionKey {
    Username,
    SessionId,
    LastCheck,
}

impl SessionKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKey::Username => "username",
            SessionKey::SessionId => "sessionId",
            SessionKey::LastCheck => "session-check-timestamp",
        }
    }
}

impl Display for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[automock]
#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn get(
        &self,
        key: SessionKey,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>>;
    async fn set(
        &self,
        key: SessionKey,
        value: String,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    /// Writes every value at once, either all of them are stored or none.
    async fn set_all(
        &self,
        values: Vec<(SessionKey, String)>,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Keeps the session values in a TOML document inside the data directory.
///
/// Values are plain strings, several processes sharing the file are not coordinated and each
/// sees what the last writer left.
#[derive(Clone, Debug)]
pub struct FileSystemStorage {
    path: PathBuf,
}

impl FileSystemStorage {
    pub fn new(data_dir: String) -> Self {
        let path = FileSystemStorage::get_session_file_path(data_dir);
        Self { path }
    }

    pub fn get_session_file_path(data_dir: String) -> PathBuf {
        PathBuf::from(data_dir).join("session.toml")
    }

    async fn load(&self) -> Result<BTreeMap<String, String>, Box<dyn std::error::Error + Send + Sync>> {
        if !self.path.exists() {
            debug!("no session file at {}", self.path.display());
            return Ok(BTreeMap::new());
        }

        let mut file = File::open(&self.path).await?;
        let mut buffer = vec![];
        file.read_to_end(&mut buffer).await?;

        let content = String::from_utf8(buffer)?;

        match toml::from_str::<BTreeMap<String, String>>(&content) {
            Ok(values) => Ok(values),
            Err(e) => {
                warn!(
                    "session file {} is corrupted, starting from an empty session: {e}",
                    self.path.display()
                );
                Ok(BTreeMap::new())
            }
        }
    }

    async fn save(
        &self,
        values: &BTreeMap<String, String>,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }

        let content = toml::to_string(values)?;

        let mut file = File::create(&self.path).await?;

        if let Err(e) = file.write_all(content.as_bytes()).await {
            file.shutdown().await?;
            return Err(Box::new(e));
        }

        file.shutdown().await?;

        Ok(())
    }
}

#[async_trait]
impl SessionStorage for FileSystemStorage {
    async fn get(
        &self,
        key: SessionKey,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>> {
        let values = self.load().await?;
        Ok(values.get(key.as_str()).cloned())
    }

    async fn set(
        &self,
        key: SessionKey,
        value: String,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.set_all(vec![(key, value)]).await
    }

    async fn set_all(
        &self,
        values: Vec<(SessionKey, String)>,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut stored = self.load().await?;
        for (key, value) in values {
            stored.insert(key.as_str().to_string(), value);
        }
        self.save(&stored).await
    }
}

#[cfg(test)]
pub mod memory {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use super::{SessionKey, SessionStorage};

    #[derive(Default)]
    pub struct MemoryStorage {
        values: Mutex<HashMap<SessionKey, String>>,
    }

    impl MemoryStorage {
        pub fn with(values: &[(SessionKey, &str)]) -> Self {
            Self {
                values: Mutex::new(
                    values
                        .iter()
                        .map(|(k, v)| (*k, v.to_string()))
                        .collect(),
                ),
            }
        }
    }

    #[async_trait]
    impl SessionStorage for MemoryStorage {
        async fn get(
            &self,
            key: SessionKey,
        ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>> {
            Ok(self.values.lock().await.get(&key).cloned())
        }

        async fn set(
            &self,
            key: SessionKey,
            value: String,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            self.values.lock().await.insert(key, value);
            Ok(())
        }

        async fn set_all(
            &self,
            values: Vec<(SessionKey, String)>,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            self.values.lock().await.extend(values);
            Ok(())
        }
    }
}
