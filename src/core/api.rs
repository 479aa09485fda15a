use log::{debug, trace};
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::core::{
    common::{
        http_client_factory::{authenticated_client_factory, http_client_factory},
        transport::{ApiResponse, ApiResponseError, SessionCheck},
    },
    session::Session,
};

pub mod models;

use models::{
    Credentials, NewSpend, Registration, SessionForm, Spend, SpendKind, UserProfile, UserQuery,
};

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response [{status}]: {body}")]
    UnexpectedResponse { status: u16, body: String },
    #[error("invalid api url: {0}")]
    InvalidUrl(String),
    #[error("cannot create authenticated client: {0}")]
    Client(Box<dyn std::error::Error + Send + Sync>),
    #[error(transparent)]
    Api(#[from] ApiResponseError),
}

/// Thin client over the iSpend HTTP API.
///
/// Every call resolves to the server envelope, error envelopes included, the caller decides what
/// an `isError` answer means for its feature.
#[derive(Clone, Debug)]
pub struct ApiClient {
    api_url: String,
}

impl ApiClient {
    pub fn new(api_url: String) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub async fn register(&self, registration: &Registration) -> Result<ApiResponse<serde_json::Value>> {
        debug!("registering user {}", registration.username);

        let req = http_client_factory()?
            .post(self.endpoint(&["users"])?)
            .form(registration);

        send(req).await
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<ApiResponse<String>> {
        debug!("login in user {}", credentials.username);

        let req = http_client_factory()?
            .post(self.endpoint(&["users", "login"])?)
            .form(credentials);

        send(req).await
    }

    pub async fn logout(&self, session: &Session) -> Result<ApiResponse<serde_json::Value>> {
        debug!("login out user {}", session.username);

        let req = http_client_factory()?
            .post(self.endpoint(&["users", "logout"])?)
            .form(&session_form(session));

        send(req).await
    }

    pub async fn check_session(&self, session: &Session) -> Result<SessionCheck> {
        debug!("checking session of user {}", session.username);

        let req = http_client_factory()?
            .post(self.endpoint(&["users", "login", "check"])?)
            .form(&session_form(session));

        let res = send::<serde_json::Value>(req).await?;

        Ok(SessionCheck::from_response(res)?)
    }

    /// Debug listing, this endpoint expects the username as a query parameter on top of the
    /// session header.
    pub async fn users(&self, session: &Session) -> Result<ApiResponse<serde_json::Value>> {
        debug!("fetching users");

        let req = authenticated(session)?
            .get(self.endpoint(&["users"])?)
            .query(&UserQuery {
                username: &session.username,
            });

        send(req).await
    }

    pub async fn me(&self, session: &Session) -> Result<ApiResponse<UserProfile>> {
        let req = authenticated(session)?.get(self.endpoint(&[
            "users",
            "me",
            &session.username,
            &session.session_id,
        ])?);

        send(req).await
    }

    pub async fn spend_kinds(&self, session: &Session) -> Result<ApiResponse<Vec<SpendKind>>> {
        debug!("fetching spend kinds of {}", session.username);

        let req = authenticated(session)?
            .get(self.endpoint(&["spending", "kind", &session.username])?);

        send(req).await
    }

    pub async fn spends(&self, session: &Session) -> Result<ApiResponse<Vec<Spend>>> {
        debug!("fetching spends of {}", session.username);

        let req = authenticated(session)?
            .get(self.endpoint(&["spending", "all", &session.username])?);

        send(req).await
    }

    pub async fn spend(&self, session: &Session, id: &str) -> Result<ApiResponse<Spend>> {
        let req = authenticated(session)?
            .get(self.endpoint(&["spending", "id", id, &session.username])?);

        send(req).await
    }

    pub async fn create_spend(&self, session: &Session, spend: &NewSpend) -> Result<ApiResponse<serde_json::Value>> {
        debug!("posting new spending for {}", spend.username);

        let req = authenticated(session)?
            .post(self.endpoint(&["spending"])?)
            .form(spend);

        send(req).await
    }

    pub async fn delete_spend(&self, session: &Session, id: &str) -> Result<ApiResponse<serde_json::Value>> {
        debug!("deleting spending {id} of {}", session.username);

        let req = authenticated(session)?
            .delete(self.endpoint(&["spending", &session.username, id])?);

        send(req).await
    }
}

impl ApiClient {
    /// Appends `segments` to the api url, each one percent-encoded so user values never add or
    /// climb path levels.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", self.api_url)))?;

        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.api_url.clone()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }
}

fn session_form(session: &Session) -> SessionForm<'_> {
    SessionForm {
        username: &session.username,
        session_id: &session.session_id,
    }
}

fn authenticated(session: &Session) -> Result<reqwest::Client> {
    authenticated_client_factory(session).map_err(ClientError::Client)
}

async fn send<T>(req: RequestBuilder) -> Result<ApiResponse<T>>
where
    T: DeserializeOwned,
{
    let response = req.send().await?;
    parse_response(response).await
}

/// Error envelopes come with 4xx/5xx statuses, the body is decoded whatever the status is.
async fn parse_response<T>(response: Response) -> Result<ApiResponse<T>>
where
    T: DeserializeOwned,
{
    let status = response.status().as_u16();
    let body = response.text().await?;

    trace!("response [{status}]: {body}");

    match serde_json::from_str::<ApiResponse<T>>(&body) {
        Ok(envelope) => Ok(envelope),
        Err(e) => {
            debug!("cannot decode envelope: {e}");
            Err(ClientError::UnexpectedResponse { status, body })
        }
    }
}
