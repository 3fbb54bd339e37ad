//! Error taxonomy shared by the document store, the source loader and the
//! REST layer.
//!
//! Each variant maps onto one HTTP status class. `Internal` carries detail
//! for the logs only; clients get a generic message.

use thiserror::Error;

/// Errors surfaced by the outline viewer's external-facing operations.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// The requested document or asset does not exist.
    #[error("{0} not found")]
    NotFound(String),
    /// Malformed identifier or a path-traversal attempt.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Unexpected failure in the data layer.
    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, ViewerError>;

impl ViewerError {
    /// HTTP status code equivalent of this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ViewerError::NotFound(_) => 404,
            ViewerError::InvalidInput(_) => 400,
            ViewerError::Internal(_) => 500,
        }
    }

    /// Message safe to hand back to a caller.
    pub fn client_message(&self) -> String {
        match self {
            ViewerError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

/// Resource name used when the filesystem reports a file as missing.
const MISSING_RESOURCE: &str = "requested resource";

impl From<std::io::Error> for ViewerError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            // OS error text stays in the logs; clients see a fixed description.
            std::io::ErrorKind::NotFound => {
                tracing::debug!(error = %err, "file vanished");
                ViewerError::NotFound(MISSING_RESOURCE.to_string())
            }
            _ => ViewerError::Internal(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ViewerError {
    fn from(err: serde_json::Error) -> Self {
        ViewerError::Internal(format!("malformed document structure: {err}"))
    }
}
