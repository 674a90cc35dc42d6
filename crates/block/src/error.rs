//! Error types for the bestseller block.

use bestseller_catalog::CatalogError;
use thiserror::Error;

/// Result type for block operations.
pub type Result<T> = std::result::Result<T, BlockError>;

#[derive(Error, Debug)]
pub enum BlockError {
    /// A request made on behalf of the widget failed.
    #[error("Failed to fetch {what}: {message}")]
    Fetch { what: &'static str, message: String },

    /// The catalog could not answer a direct (in-process) request.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Persisted attributes could not be decoded.
    #[error("Invalid block attributes: {message}")]
    InvalidAttributes { message: String },

    /// Persisted attributes were written by a newer block.
    #[error("Unsupported attributes version {found} (latest supported is {latest})")]
    UnsupportedVersion { found: u64, latest: u32 },
}

impl From<serde_json::Error> for BlockError {
    fn from(error: serde_json::Error) -> Self {
        BlockError::InvalidAttributes {
            message: error.to_string(),
        }
    }
}
