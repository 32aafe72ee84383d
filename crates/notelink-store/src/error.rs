//! Error types for the storage layer.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database driver or connection error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A user with this username already exists.
    #[error("username already taken: {0}")]
    DuplicateUsername(String),

    /// A note with this ID already exists.
    #[error("duplicate note: {0}")]
    DuplicateNote(Uuid),

    /// A storage call did not finish before its deadline.
    #[error("storage call timed out: {0}")]
    Timeout(String),

    /// The storage backend is not accepting requests.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Migration error.
    #[error("migration error: {0}")]
    MigrationError(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}
