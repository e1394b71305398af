use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use review_core::source::SourceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("project source error: {0}")]
    Source(#[from] SourceError),
    #[error("failed to build sample document: {0}")]
    Docx(String),
    #[error("background task failed: {0}")]
    Task(String),
    #[error("document not found")]
    NotFound,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match self {
            ServerError::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, self.to_string()).into_response()
    }
}
