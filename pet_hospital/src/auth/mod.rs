//! Authentication module providing registration, credential verification,
//! and session identity management.
//!
//! This module implements session-backed authentication with:
//! - Argon2id password hashing with server-side pepper
//! - Opaque UUID v4 session tokens resolved server-side
//! - One active session per client; re-login replaces the old session
//! - Lazy expiry of stale sessions on resolve
//!
//! ## Example
//!
//! ```no_run
//! use pet_hospital::auth::{AuthManager, PasswordHasher, RegisterRequest, SessionManager};
//! use pet_hospital::auth::sessions::DEFAULT_SESSION_TTL_SECS;
//! use pet_hospital::db::memory::{MemorySessionRepository, MemoryUserRepository};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let users = Arc::new(MemoryUserRepository::new());
//!     let auth = AuthManager::new(users.clone(), PasswordHasher::new("pepper".to_string()));
//!     let sessions = SessionManager::new(
//!         Arc::new(MemorySessionRepository::new()),
//!         users,
//!         DEFAULT_SESSION_TTL_SECS,
//!     );
//!
//!     let user = auth
//!         .register(RegisterRequest {
//!             username: "alice".to_string(),
//!             password: "pw123".to_string(),
//!             email: "alice@example.com".to_string(),
//!             first_name: "Alice".to_string(),
//!             last_name: "Anderson".to_string(),
//!         })
//!         .await?;
//!
//!     let token = sessions.establish(user.id, None).await?;
//!     assert!(sessions.resolve(&token).await?.is_some());
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod manager;
pub mod models;
pub mod password;
pub mod sessions;

pub use errors::{AuthError, AuthResult};
pub use manager::AuthManager;
pub use models::{NewUser, RegisterRequest, Session, StoredCredential, User, UserId};
pub use password::PasswordHasher;
pub use sessions::SessionManager;
