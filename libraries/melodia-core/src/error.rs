/// Core error types for Melodia
use thiserror::Error;
use crate::types::{ListenerId, SongId};

/// Result type alias using `MelodiaError`
pub type Result<T> = std::result::Result<T, MelodiaError>;

/// Core error type for Melodia
#[derive(Error, Debug)]
pub enum MelodiaError {
    /// Song not found
    #[error("Song not found: {0}")]
    SongNotFound(SongId),

    /// Listener not found
    #[error("Listener not found: {0}")]
    ListenerNotFound(ListenerId),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A database read or write failed; the enclosing transaction is rolled back
    #[error("Persistence failure: {0}")]
    Persistence(String),

    /// Removing an audio payload from the blob store failed
    #[error("Failed to delete blob {path}: {reason}")]
    StorageDeleteFailed { path: String, reason: String },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MelodiaError {
    /// Create a persistence error
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a blob deletion error
    pub fn storage_delete_failed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::StorageDeleteFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for MelodiaError {
    fn from(err: sqlx::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}
