//! HTTP client for the poems API.
//!
//! # Response shapes
//!
//! The endpoint is treated as an opaque JSON source. A successful body is
//! either the poem list itself or an envelope around it:
//!
//! ```text
//! [ {poem}, {poem} ]            -> used directly
//! { "data": [ {poem} ] }        -> `data` is used
//! { ... anything else ... }     -> decoded as-is, which fails as malformed
//! ```
//!
//! Error bodies may carry `{ "message": "..." }`, which becomes the text shown
//! in the gallery's error panel.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::poem::PoemRecord;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("request failed with status code {status}")]
    Status {
        status: u16,
        /// `message` field of the error body, when there is one
        message: Option<String>,
    },
    #[error("malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl FetchError {
    /// Text for the error panel.
    ///
    /// Prefers the server's `message`, otherwise describes the failure.
    pub fn display_message(&self) -> String {
        match self {
            FetchError::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            FetchError::Status { status, .. } => {
                format!("Request failed with status code {}", status)
            }
            FetchError::Transport(e) if e.is_timeout() => "Request timed out".to_string(),
            FetchError::Transport(e) if e.is_connect() => "Network Error".to_string(),
            other => other.to_string(),
        }
    }
}

/// Client for a single poems endpoint
#[derive(Clone)]
pub struct PoemClient {
    http: reqwest::Client,
    endpoint: String,
}

impl PoemClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("poem-gallery/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// GET the endpoint and decode the poem list
    pub async fn fetch_poems(&self) -> Result<Vec<PoemRecord>, FetchError> {
        let url = reqwest::Url::parse(&self.endpoint).map_err(|e| FetchError::InvalidEndpoint {
            url: self.endpoint.clone(),
            reason: e.to_string(),
        })?;
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = error_message(&body);
            tracing::debug!("Poems API returned {}: {:?}", status, message);
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let json: Value = serde_json::from_slice(&body)?;
        let poems = decode_poems(json)?;
        tracing::debug!("Decoded {} poems", poems.len());
        Ok(poems)
    }
}

/// Pick the poem list out of a successful body
fn decode_poems(json: Value) -> Result<Vec<PoemRecord>, serde_json::Error> {
    let list = match json {
        Value::Object(mut map) => map.remove("data").unwrap_or(Value::Object(map)),
        other => other,
    };
    serde_json::from_value(list)
}

/// `message` field of an error body, if the body is JSON and has one
fn error_message(body: &[u8]) -> Option<String> {
    let json: Value = serde_json::from_slice(body).ok()?;
    json.get("message")
        .and_then(|m| m.as_str())
        .map(|m| m.to_string())
}
