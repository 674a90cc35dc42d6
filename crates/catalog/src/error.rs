//! Error types for catalog operations.

use thiserror::Error;

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Error types for catalog operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog could not be reached, timed out, or answered with a
    /// non-2xx status. The status is kept for logging only.
    #[error("Catalog unavailable: {message}")]
    UpstreamUnavailable {
        message: String,
        status: Option<u16>,
    },

    /// The catalog answered, but the body did not match the expected schema.
    #[error("Malformed catalog payload: {message}")]
    MalformedPayload { message: String },

    /// The caller-supplied genre id was rejected before any request was made.
    #[error("Invalid genre id '{genre_id}': {reason}")]
    InvalidGenreId { genre_id: String, reason: String },

    /// The client was built from an unusable configuration.
    #[error("Invalid catalog configuration: {message}")]
    Configuration { message: String },
}

impl CatalogError {
    pub fn unavailable(message: impl Into<String>, status: Option<u16>) -> Self {
        CatalogError::UpstreamUnavailable {
            message: message.into(),
            status,
        }
    }
}

impl From<crate::http::ResponseError> for CatalogError {
    fn from(error: crate::http::ResponseError) -> Self {
        CatalogError::UpstreamUnavailable {
            message: error.message,
            status: error.status,
        }
    }
}
