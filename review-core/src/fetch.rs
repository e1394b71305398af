use std::future::Future;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("no document url")]
    MissingUrl,
    #[error("request failed: {0}")]
    Network(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("failed to read body: {0}")]
    Body(String),
}

/// Retrieves raw bytes for a url (documents and the project listing). Any
/// non-2xx response is a [`FetchError::Status`]; there is no retry or timeout
/// at this layer.
pub trait DocumentFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, FetchError>>;
}

pub fn check_status(status: u16) -> Result<(), FetchError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(FetchError::Status(status))
    }
}
