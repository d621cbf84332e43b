//! Typed HTTP client for the notes API.
//!
//! Protected calls take the caller's [`Session`] explicitly; the client itself
//! holds no login state, so one client can serve several users.

use reqwest::{header, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use url::Url;
use uuid::Uuid;

use crate::database::Note;
use crate::types::{CreateNoteRequest, Credentials, MessageResponse, TokenResponse, UpdateNoteRequest};

/// A logged-in user: the token returned by `/login` and who it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub token: String,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message} (HTTP {status})")]
    Api { status: StatusCode, message: String },
}

/// Failure categories a front end reports with one message each
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Missing or rejected token; the user must log in again
    Auth,
    /// Input rejected, duplicate user or wrong credentials
    Rejected,
    NotFound,
    Server,
    Unreachable,
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status(),
            ClientError::InvalidUrl(_) => None,
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self.status() {
            Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN) => FailureKind::Auth,
            Some(StatusCode::NOT_FOUND) => FailureKind::NotFound,
            Some(status) if status.is_client_error() => FailureKind::Rejected,
            Some(_) => FailureKind::Server,
            None => FailureKind::Unreachable,
        }
    }

    /// Generic message for the failure's category
    pub fn user_message(&self) -> &'static str {
        match self.kind() {
            FailureKind::Auth => "Auth error, please login again",
            FailureKind::Rejected => "Request rejected, check your input",
            FailureKind::NotFound => "Note not found",
            FailureKind::Server => "Server error, try again later",
            FailureKind::Unreachable => "Could not reach the server",
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Self::with_http(base_url, http)
    }

    pub fn with_http(base_url: &str, http: reqwest::Client) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(base_url)?;
        // keep any path prefix when joining endpoint paths
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn health(&self) -> Result<serde_json::Value, ClientError> {
        let response = self.request(Method::GET, "health", None)?.send().await?;
        Self::json(response).await
    }

    pub async fn register(&self, credentials: &Credentials) -> Result<String, ClientError> {
        let response = self
            .request(Method::POST, "register", None)?
            .json(credentials)
            .send()
            .await?;
        let body: MessageResponse = Self::json(response).await?;
        Ok(body.message)
    }

    /// Log in and return the session to pass into protected calls
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, ClientError> {
        let response = self
            .request(Method::POST, "login", None)?
            .json(credentials)
            .send()
            .await?;
        let body: TokenResponse = Self::json(response).await?;
        Ok(Session {
            username: credentials.username.clone(),
            token: body.token,
        })
    }

    pub async fn list_notes(&self, session: &Session) -> Result<Vec<Note>, ClientError> {
        let response = self.request(Method::GET, "notes", Some(session))?.send().await?;
        Self::json(response).await
    }

    pub async fn create_note(
        &self,
        session: &Session,
        note: &CreateNoteRequest,
    ) -> Result<Note, ClientError> {
        let response = self
            .request(Method::POST, "notes", Some(session))?
            .json(note)
            .send()
            .await?;
        Self::json(response).await
    }

    pub async fn update_note(
        &self,
        session: &Session,
        id: Uuid,
        changes: &UpdateNoteRequest,
    ) -> Result<Note, ClientError> {
        let response = self
            .request(Method::PUT, &format!("notes/{}", id), Some(session))?
            .json(changes)
            .send()
            .await?;
        Self::json(response).await
    }

    pub async fn delete_note(&self, session: &Session, id: Uuid) -> Result<(), ClientError> {
        let response = self
            .request(Method::DELETE, &format!("notes/{}", id), Some(session))?
            .send()
            .await?;
        Self::check(response).await.map(|_| ())
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        session: Option<&Session>,
    ) -> Result<RequestBuilder, ClientError> {
        let url = self.base_url.join(path)?;
        let builder = self.http.request(method, url);
        Ok(match session {
            // raw token, no Bearer prefix
            Some(session) => builder.header(header::AUTHORIZATION, &session.token),
            None => builder,
        })
    }

    async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.message)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        Err(ClientError::Api { status, message })
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        Ok(Self::check(response).await?.json::<T>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: StatusCode) -> ClientError {
        ClientError::Api {
            status,
            message: "x".to_string(),
        }
    }

    #[test]
    fn failures_grouped_by_category() {
        assert_eq!(api_error(StatusCode::UNAUTHORIZED).kind(), FailureKind::Auth);
        assert_eq!(api_error(StatusCode::FORBIDDEN).kind(), FailureKind::Auth);
        assert_eq!(api_error(StatusCode::BAD_REQUEST).kind(), FailureKind::Rejected);
        assert_eq!(api_error(StatusCode::NOT_FOUND).kind(), FailureKind::NotFound);
        assert_eq!(
            api_error(StatusCode::INTERNAL_SERVER_ERROR).kind(),
            FailureKind::Server
        );
        assert_eq!(
            api_error(StatusCode::FORBIDDEN).user_message(),
            "Auth error, please login again"
        );
    }

    #[test]
    fn base_url_keeps_path_prefix() {
        let client = ApiClient::new("http://localhost:5000/api").unwrap();
        assert_eq!(
            client.base_url().join("notes").unwrap().as_str(),
            "http://localhost:5000/api/notes"
        );

        let client = ApiClient::new("http://localhost:5000").unwrap();
        assert_eq!(
            client.base_url().join("login").unwrap().as_str(),
            "http://localhost:5000/login"
        );
    }

    #[test]
    fn bad_base_url_rejected() {
        assert!(matches!(
            ApiClient::new("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
    }
}
