use thiserror::Error;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Why a string was rejected as a [`ShortCode`](crate::ShortCode).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    #[error("short code cannot be empty")]
    Empty,
    #[error("short code must contain only 0-9a-zA-Z: '{0}'")]
    InvalidCharacter(String),
    #[error("short code must be at most {max} characters, got {len}")]
    TooLong { len: usize, max: usize },
}

/// Backend failures.
///
/// Contract rejections (code taken, alias bound elsewhere, empty URL) are
/// reported through `Ok(false)` by [`SlinkRepository`](crate::SlinkRepository),
/// never through this type.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("unsupported storage backend: {0}")]
    UnsupportedBackend(String),
}
