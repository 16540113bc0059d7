//! Error types for roster store operations.

use thiserror::Error;

/// Errors that can occur during roster store operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Native DB error.
    #[error("Database error: {0}")]
    Database(String),

    /// Monster not found.
    #[error("Monster not found: {0}")]
    NotFound(String),

    /// Duplicate monster name.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// Draft or update rejected by validation.
    #[error(transparent)]
    Invalid(#[from] battle_core::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for roster store operations.
pub type Result<T> = std::result::Result<T, Error>;
