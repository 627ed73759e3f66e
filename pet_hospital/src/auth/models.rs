//! Authentication data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User ID type
pub type UserId = i64;

/// User identity as exposed to the rest of the application.
///
/// Deliberately does not carry the password hash; credential lookups that
/// need the hash go through [`StoredCredential`], which is never serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Fields required to create a user record.
///
/// `password_hash` is the hasher's output, never the plaintext.
#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// A user record together with its stored password hash.
///
/// Only the credential verifier sees this; it is not `Serialize`, so the
/// hash cannot end up in a client-visible response by accident.
#[derive(Clone)]
pub struct StoredCredential {
    pub user: User,
    pub password_hash: String,
}

impl std::fmt::Debug for StoredCredential {
    // Redacts the hash so debug logging can never leak it.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredCredential")
            .field("user", &self.user)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// User registration request
#[derive(Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Server-side session record binding an opaque token to a user.
///
/// `user_id` is a weak reference: resolving a session whose user no longer
/// exists yields "no identity", not an error.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
