//! Authentication error types.

use thiserror::Error;

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing failed
    #[error("Password hashing failed")]
    HashingFailed,

    /// No user record for the submitted login name.
    ///
    /// Kept distinct from [`AuthError::IncorrectPassword`] for internal
    /// diagnostics only; client-visible output merges the two (see
    /// [`AuthError::client_message`]) so login names cannot be enumerated.
    #[error("Unknown user")]
    UnknownUser,

    /// Password did not match the stored hash
    #[error("Incorrect password")]
    IncorrectPassword,

    /// Malformed login or registration input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Username already exists
    #[error("Username already exists")]
    UsernameTaken,
}

impl AuthError {
    /// Get a client-safe error message that doesn't leak sensitive information.
    ///
    /// Database errors are sanitized to avoid exposing SQL detail, and the
    /// unknown-user / incorrect-password distinction is collapsed into one
    /// generic message.
    pub fn client_message(&self) -> String {
        match self {
            AuthError::Database(_) | AuthError::HashingFailed => {
                "Internal server error".to_string()
            }
            AuthError::UnknownUser | AuthError::IncorrectPassword => {
                "Invalid username or password".to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Whether this failure was caused by the submitted credentials rather
    /// than by the system itself.
    pub fn is_credential_failure(&self) -> bool {
        matches!(self, AuthError::UnknownUser | AuthError::IncorrectPassword)
    }
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
