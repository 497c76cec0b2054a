//! Error types for deploywatch

use reqwest::StatusCode;
use thiserror::Error;

/// Failures at the deployment API boundary.
///
/// Callers that only care about success can collapse these into `None`
/// (see [`crate::http::DeploymentApi::get_latest_deployment`]); callers that
/// want diagnostics can match on the category.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Missing credentials: {0}")]
    MissingCredentials(&'static str),

    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Decode error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether retrying the same request later could succeed
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Transport(_) => true,
            ApiError::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            ApiError::MissingCredentials(_) | ApiError::Decode(_) => false,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err)
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Main error type for deploywatch
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("API error: {0}")]
    ApiError(#[from] ApiError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Deployment error: {0}")]
    DeployError(String),

    #[error("Report error: {0}")]
    ReportError(String),
}
