use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize};

/// Envelope wrapping every iSpend API response.
///
/// Older server revisions spelled the error flag `is_error`, both spellings are accepted.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(rename = "isError", alias = "is_error", default)]
    pub is_error: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Splits the envelope on its error flag, keeping the payload on success.
    pub fn into_result(self) -> Result<Option<T>, ApiResponseError> {
        if self.is_error {
            return Err(ApiResponseError::new(self.message));
        }
        Ok(self.data)
    }
}

/// Outcome of `POST /users/login/check`.
///
/// The server answers with an ordinary envelope whose `message` is `"true"` for a live session,
/// the sentinel is decoded once here so callers never compare strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionCheck {
    pub status: SessionStatus,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Valid,
    Invalid,
}

impl SessionCheck {
    pub fn from_response(response: ApiResponse<serde_json::Value>) -> Result<Self, ApiResponseError> {
        if response.is_error {
            return Err(ApiResponseError::new(response.message));
        }

        let status = match response.message.trim() {
            "true" => SessionStatus::Valid,
            _ => SessionStatus::Invalid,
        };

        Ok(Self {
            status,
            message: response.message,
        })
    }

    pub fn is_valid(&self) -> bool {
        self.status == SessionStatus::Valid
    }
}

/// Identifiers are strings on the wire, some server revisions send plain numbers.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(i) => i.to_string(),
        Raw::Float(f) => f.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponseError {
    pub reason: String,
}

impl ApiResponseError {
    pub fn new(reason: String) -> Self {
        Self { reason }
    }
}

impl Display for ApiResponseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason)
    }
}

impl std::error::Error for ApiResponseError {}
