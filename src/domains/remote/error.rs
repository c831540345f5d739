//! Remote adapter error types.

use async_openai::error::OpenAIError;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::warn;

/// Longest slice of an error body kept in a `RemoteCall` message.
const BODY_PREVIEW_CHARS: usize = 200;

/// Result type returned by every remote adapter.
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Errors raised while talking to a remote service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdapterError {
    /// Transport, authentication or remote-service failure.
    #[error("{service} request failed: {message}")]
    RemoteCall {
        service: &'static str,
        message: String,
    },

    /// The remote reply could not be read into the expected shape.
    #[error("{service} returned an unexpected response: {message}")]
    MalformedResponse {
        service: &'static str,
        message: String,
    },

    /// A credential or endpoint needed for the call is missing.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}

impl AdapterError {
    /// Create a remote call error.
    pub fn remote(service: &'static str, message: impl Into<String>) -> Self {
        Self::RemoteCall {
            service,
            message: message.into(),
        }
    }

    /// Create a malformed response error.
    pub fn malformed(service: &'static str, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            service,
            message: message.into(),
        }
    }

    /// Map a reqwest failure. Body decoding failures are malformed responses,
    /// everything else is a failed call.
    pub fn from_reqwest(service: &'static str, err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::malformed(service, err.to_string())
        } else {
            Self::remote(service, err.to_string())
        }
    }

    /// Read a non-success reply into a `RemoteCall` error.
    pub async fn from_status(service: &'static str, response: reqwest::Response) -> Self {
        let status = response.status();
        match response.text().await {
            Ok(body) => Self::http_status(service, status, Some(&body)),
            Err(e) => {
                warn!("Could not read {} error body: {}", service, e);
                Self::http_status(service, status, None)
            }
        }
    }

    /// `HTTP <code>: <body preview>`, or a marker when the body was unreadable.
    pub fn http_status(service: &'static str, status: StatusCode, body: Option<&str>) -> Self {
        let message = match body.map(str::trim) {
            Some("") => format!("HTTP {}", status.as_u16()),
            Some(body) => format!("HTTP {}: {}", status.as_u16(), body_preview(body)),
            None => format!("HTTP {} (body unreadable)", status.as_u16()),
        };
        Self::remote(service, message)
    }

    /// Map an OpenAI SDK failure.
    pub fn from_openai(service: &'static str, err: OpenAIError) -> Self {
        match err {
            err @ OpenAIError::JSONDeserialize(..) => Self::malformed(service, err.to_string()),
            other => Self::remote(service, other.to_string()),
        }
    }
}

fn body_preview(body: &str) -> String {
    match body.char_indices().nth(BODY_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

/// Return the configured value or a `NotConfigured` error naming the variable.
pub(crate) fn require<'a>(value: &'a Option<String>, variable: &'static str) -> AdapterResult<&'a str> {
    value.as_deref().ok_or(AdapterError::NotConfigured(variable))
}
