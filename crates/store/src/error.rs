//! Error types for the admin store

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {message}")]
    Persistence { message: String },

    #[error("Key '{0}' is not an ai-oversight key")]
    ForeignKey(String),

    #[error("Stored schema version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u64, supported: u64 },

    #[error("Malformed admin state: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    pub(crate) fn lock(what: &str) -> Self {
        StoreError::Persistence {
            message: format!("Failed to acquire {} lock", what),
        }
    }
}
