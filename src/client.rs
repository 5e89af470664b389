//! Typed async client for the `/api/items` endpoints.

use crate::model::{Item, ItemDraft};
use serde::Deserialize;

/// Why a call to the server failed.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The request never got an answer (connection refused, timeout, ...).
    Transport(String),
    /// The server answered with a non-success status.
    Status {
        /// HTTP status code.
        status: u16,
        /// The `error` field of the body, when there was one.
        message: Option<String>,
    },
    /// The body did not decode as expected.
    Decode(String),
}

impl ClientError {
    /// HTTP status, if the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Transport(msg) => write!(f, "transport error: {msg}"),
            ClientError::Status {
                status,
                message: Some(msg),
            } => write!(f, "server answered {status}: {msg}"),
            ClientError::Status {
                status,
                message: None,
            } => write!(f, "server answered {status}"),
            ClientError::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

/// Result alias for client calls.
pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Talks to a running server. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Client for the server at `base_url`, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuse an existing `reqwest` client.
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    /// `GET /api/items`
    pub async fn list(&self) -> ClientResult<Vec<Item>> {
        let resp = self.http.get(self.items_url()).send().await?;
        Ok(ensure_success(resp).await?.json().await?)
    }

    /// `POST /api/items`
    pub async fn create(&self, draft: &ItemDraft) -> ClientResult<Item> {
        let resp = self.http.post(self.items_url()).json(draft).send().await?;
        Ok(ensure_success(resp).await?.json().await?)
    }

    /// `PATCH /api/items/:id`
    pub async fn toggle(&self, id: u64) -> ClientResult<Item> {
        let resp = self.http.patch(self.item_url(id)).send().await?;
        Ok(ensure_success(resp).await?.json().await?)
    }

    /// `PUT /api/items/:id`
    pub async fn update(&self, id: u64, draft: &ItemDraft) -> ClientResult<Item> {
        let resp = self.http.put(self.item_url(id)).json(draft).send().await?;
        Ok(ensure_success(resp).await?.json().await?)
    }

    /// `DELETE /api/items/:id`
    pub async fn delete(&self, id: u64) -> ClientResult<()> {
        let resp = self.http.delete(self.item_url(id)).send().await?;
        ensure_success(resp).await?;
        Ok(())
    }

    fn items_url(&self) -> String {
        format!("{}/api/items", self.base_url)
    }

    fn item_url(&self, id: u64) -> String {
        format!("{}/api/items/{id}", self.base_url)
    }
}

async fn ensure_success(resp: reqwest::Response) -> ClientResult<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp
        .json::<ErrorBody>()
        .await
        .ok()
        .map(|body| body.error);
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}
