//! Server-specific error types

use danmaku_lib::DanmakuError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Library error: {0}")]
    Library(#[from] DanmakuError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    /// Short label used for error metrics
    pub fn kind(&self) -> &'static str {
        match self {
            ServerError::Library(DanmakuError::InvalidFilter(_)) => "invalid_filter",
            ServerError::Library(_) => "library",
            ServerError::Config(_) => "config",
            ServerError::Internal(_) => "internal",
            ServerError::Io(_) => "io",
        }
    }
}

impl axum::response::IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            ServerError::Library(DanmakuError::InvalidFilter(_)) => {
                axum::http::StatusCode::BAD_REQUEST
            }
            _ => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}
