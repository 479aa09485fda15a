use std::{fs, path::Path};

use chrono::TimeDelta;
use serde::Deserialize;
use tokio::{fs::File, io::AsyncReadExt};

pub mod sections;

pub use sections::{ApiConfiguration, CoreConfiguration, LogConfiguration};

use super::session::validator::DEFAULT_CHECK_INTERVAL_SECS;

pub const DEFAULT_CONFIGURATION_FILE: &str = "config.toml";
pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_DATA_DIRECTORY: &str = ".";

#[derive(Deserialize, Clone, Debug, Default)]
pub struct Configuration {
    #[serde(default)]
    pub api: ApiConfiguration,
    #[serde(default)]
    pub core: CoreConfiguration,
    #[serde(default)]
    pub log: LogConfiguration,
}

impl Configuration {
    pub fn api_url(&self) -> String {
        self.api
            .url
            .clone()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    pub fn data_directory(&self) -> String {
        self.core
            .data_directory
            .clone()
            .unwrap_or_else(|| DEFAULT_DATA_DIRECTORY.to_string())
    }

    pub fn assert_data_dir_permissions(&self) -> Result<(), &str> {
        let data_dir = self.data_directory();

        let path = Path::new(&data_dir);

        match path.try_exists() {
            Ok(true) => {}
            Ok(false) => return Err("data dir does not exist"),
            Err(_) => return Err("data dir access is denied"),
        }

        let permissions = match fs::metadata(path) {
            Ok(m) => m.permissions(),
            Err(_) => return Err("cannot read data dir metadata"),
        };

        if permissions.readonly() {
            return Err("data_dir cannot be readonly");
        }

        Ok(())
    }

    /// Minimum delay between two session checks, zero checks on every run.
    pub fn session_check_interval(&self) -> TimeDelta {
        self.api
            .session_check_interval
            .filter(|v| *v >= 0)
            .and_then(TimeDelta::try_seconds)
            .unwrap_or_else(|| TimeDelta::seconds(DEFAULT_CHECK_INTERVAL_SECS))
    }

    pub fn assert_session_check_interval_is_valid(&self) -> Result<(), &str> {
        match self.api.session_check_interval {
            None => Ok(()),
            Some(v) if v < 0 => Err("session_check_interval cannot be negative"),
            Some(v) if TimeDelta::try_seconds(v).is_none() => {
                Err("session_check_interval is out of range")
            }
            Some(_) => Ok(()),
        }
    }
}

/// Loads the configuration file.
///
/// A missing file is an error unless it is the default one, the built-in defaults apply then.
pub async fn get_configuration(
    file_path: Option<String>,
) -> Result<Configuration, Box<dyn std::error::Error + Send + Sync>> {
    let explicit = file_path.is_some();
    let file_path = file_path.unwrap_or_else(|| DEFAULT_CONFIGURATION_FILE.to_string());
    let path = Path::new(&file_path);

    if !path.exists() {
        if explicit {
            return Err(Box::new(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("configuration file is missing: {file_path}"),
            )));
        }
        return Ok(Configuration::default());
    }

    let mut file = File::open(path).await?;
    let mut buffer = vec![];

    file.read_to_end(&mut buffer).await?;

    let result = String::from_utf8(buffer)?;

    match toml::from_str::<Configuration>(&result) {
        Ok(c) => Ok(c),
        Err(e) => Err(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("configuration file is corrupted: {e}"),
        ))),
    }
}
