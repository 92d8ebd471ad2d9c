/// Server error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] melodia_core::MelodiaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<melodia_storage::StorageError> for ServerError {
    fn from(err: melodia_storage::StorageError) -> Self {
        // StorageError -> MelodiaError -> ServerError
        ServerError::Core(err.into())
    }
}

impl From<config::ConfigError> for ServerError {
    fn from(err: config::ConfigError) -> Self {
        ServerError::Config(err.to_string())
    }
}
