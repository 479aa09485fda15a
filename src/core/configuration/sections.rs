use serde::Deserialize;

#[derive(Deserialize, Clone, Debug, Default)]
pub struct CoreConfiguration {
    pub data_directory: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct ApiConfiguration {
    pub url: Option<String>,
    /// minimum interval in seconds between two session checks
    pub session_check_interval: Option<i64>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct LogConfiguration {
    pub level: Option<String>,
    pub retention: Option<usize>,
}
