// Error taxonomy for flixd
// Failures never cross module boundaries as anything richer than an
// error kind plus message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An upstream service answered with a non-2xx status
    #[error("upstream request failed with status {status}")]
    Request { status: u16 },

    /// Network failure before any response was obtained
    #[error("transport failure: {0}")]
    Transport(String),

    /// An upstream service answered 2xx but the body did not parse
    #[error("malformed upstream response: {0}")]
    UpstreamBody(String),

    /// A mutation targeted a persisted document that does not exist yet
    #[error("{0} not found")]
    NotFound(&'static str),

    /// An optional upstream provider has no API key configured
    #[error("{0} provider not configured")]
    ProviderUnavailable(&'static str),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// Classify a reqwest failure: a status means the upstream answered,
    /// a decode failure means it answered garbage, anything else never
    /// got a response.
    pub fn from_upstream(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            Error::Request {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            Error::UpstreamBody(err.to_string())
        } else {
            Error::Transport(err.to_string())
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Request { .. } | Error::Transport(_) | Error::UpstreamBody(_) => {
                StatusCode::BAD_GATEWAY
            }
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::ProviderUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Storage(_) | Error::Serialize(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(json!({
            "error": {
                "message": self.to_string(),
                "status": status.as_u16(),
            }
        }));

        (status, body).into_response()
    }
}
