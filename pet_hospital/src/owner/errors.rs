//! Owner registry error types.

use thiserror::Error;

use super::models::OwnerId;

/// Owner registry errors
#[derive(Debug, Error)]
pub enum OwnerError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Owner not found
    #[error("Owner {0} not found")]
    NotFound(OwnerId),
}

/// Result type for owner registry operations
pub type OwnerResult<T> = Result<T, OwnerError>;
