use log::debug;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client,
};

use crate::core::session::Session;

pub const SESSION_HEADER: &str = "X-Ispend-SessionID";

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// Creates a plain HTTP client, used for calls that carry their credentials in the form body.
pub fn http_client_factory() -> Result<Client, reqwest::Error> {
    debug!("creating HTTP client");

    reqwest::ClientBuilder::new()
        .user_agent(APP_USER_AGENT)
        .build()
}

/// Creates an HTTP client sending the session token with every request.
///
/// # Errors
///
/// Fails when the stored token cannot be used as a header value or when the client cannot be
/// built.
pub fn authenticated_client_factory(
    session: &Session,
) -> Result<Client, Box<dyn std::error::Error + Send + Sync>> {
    debug!("creating authenticated HTTP client");

    let mut headers = HeaderMap::new();
    headers.append(
        HeaderName::from_bytes(SESSION_HEADER.as_bytes())?,
        HeaderValue::from_str(&session.session_id)?,
    );

    let client = reqwest::ClientBuilder::new()
        .default_headers(headers)
        .user_agent(APP_USER_AGENT)
        .build()?;

    Ok(client)
}
