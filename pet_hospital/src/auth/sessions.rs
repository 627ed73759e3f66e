//! Session identity management.
//!
//! Maps authenticated users to opaque session tokens persisted across
//! requests. Tokens are 128 bits of CSPRNG output (UUID v4) and only ever
//! resolvable server-side; clients carry them in an HttpOnly cookie.

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use super::{
    errors::AuthResult,
    models::{Session, User, UserId},
};
use crate::db::{SessionRepository, UserRepository};

/// Default session lifetime: 7 days.
pub const DEFAULT_SESSION_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Session identity manager.
///
/// Per client the state machine is Anonymous → (establish) →
/// Authenticated → (terminate) → Anonymous; establishing while already
/// authenticated replaces the old session rather than stacking a second one.
#[derive(Clone)]
pub struct SessionManager {
    sessions: Arc<dyn SessionRepository>,
    users: Arc<dyn UserRepository>,
    ttl: Duration,
}

impl SessionManager {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        users: Arc<dyn UserRepository>,
        ttl_secs: i64,
    ) -> Self {
        Self {
            sessions,
            users,
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Create a new session bound to `user_id`, returning its token.
    ///
    /// `previous` is the token the client carried before logging in, if any;
    /// it is invalidated first so each client holds at most one identity.
    pub async fn establish(&self, user_id: UserId, previous: Option<&str>) -> AuthResult<String> {
        if let Some(previous) = previous {
            self.sessions.delete_session(previous).await?;
        }

        let token = Uuid::new_v4().to_string();
        let now = Utc::now();
        let session = Session {
            token: token.clone(),
            user_id,
            created_at: now,
            expires_at: now + self.ttl,
        };

        self.sessions.create_session(&session).await?;
        tracing::debug!(user_id, "established session");
        Ok(token)
    }

    /// Resolve a session token to a user identity.
    ///
    /// Unknown tokens, expired sessions, and sessions whose user no longer
    /// exists all resolve to `None`; none of those is an error. Expired rows
    /// are deleted on the way out.
    pub async fn resolve(&self, token: &str) -> AuthResult<Option<User>> {
        let Some(session) = self.sessions.find_session(token).await? else {
            return Ok(None);
        };

        if session.expires_at < Utc::now() {
            self.sessions.delete_session(token).await?;
            return Ok(None);
        }

        self.users.find_by_id(session.user_id).await
    }

    /// Delete a session. Idempotent: terminating an unknown token succeeds.
    pub async fn terminate(&self, token: &str) -> AuthResult<()> {
        self.sessions.delete_session(token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::{MemorySessionRepository, MemoryUserRepository};
    use crate::{auth::NewUser, db::SessionRepository as _, db::UserRepository as _};

    async fn setup() -> (SessionManager, Arc<MemoryUserRepository>, UserId) {
        let users = Arc::new(MemoryUserRepository::new());
        let sessions = Arc::new(MemorySessionRepository::new());

        let user_id = users
            .create_user(&NewUser {
                username: "alice".to_string(),
                password_hash: "$argon2id$stub".to_string(),
                email: "alice@example.com".to_string(),
                first_name: "Alice".to_string(),
                last_name: "Anderson".to_string(),
            })
            .await
            .unwrap();

        let manager = SessionManager::new(sessions, users.clone(), DEFAULT_SESSION_TTL_SECS);
        (manager, users, user_id)
    }

    #[tokio::test]
    async fn test_establish_then_resolve() {
        let (manager, _, user_id) = setup().await;

        let token = manager.establish(user_id, None).await.unwrap();
        let user = manager.resolve(&token).await.unwrap().unwrap();

        assert_eq!(user.id, user_id);
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_terminate_then_resolve() {
        let (manager, _, user_id) = setup().await;

        let token = manager.establish(user_id, None).await.unwrap();
        manager.terminate(&token).await.unwrap();

        assert!(manager.resolve(&token).await.unwrap().is_none());

        // Terminating an unknown token is not an error.
        manager.terminate(&token).await.unwrap();
        manager.terminate("never-issued").await.unwrap();
    }

    #[tokio::test]
    async fn test_establish_replaces_previous_session() {
        let (manager, _, user_id) = setup().await;

        let first = manager.establish(user_id, None).await.unwrap();
        let second = manager.establish(user_id, Some(&first)).await.unwrap();

        assert_ne!(first, second);
        assert!(manager.resolve(&first).await.unwrap().is_none());
        assert!(manager.resolve(&second).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_resolve_unknown_token_is_none() {
        let (manager, _, _) = setup().await;
        assert!(manager.resolve("no-such-token").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_dangling_user_resolves_to_none() {
        let (manager, users, user_id) = setup().await;

        let token = manager.establish(user_id, None).await.unwrap();
        users.remove_user(user_id);

        assert!(manager.resolve(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_session_resolves_to_none() {
        let users = Arc::new(MemoryUserRepository::new());
        let sessions = Arc::new(MemorySessionRepository::new());
        let manager = SessionManager::new(sessions.clone(), users.clone(), 60);

        let now = Utc::now();
        sessions
            .create_session(&Session {
                token: "stale".to_string(),
                user_id: 1,
                created_at: now - Duration::days(8),
                expires_at: now - Duration::days(1),
            })
            .await
            .unwrap();

        assert!(manager.resolve("stale").await.unwrap().is_none());
        // The expired row was deleted on resolve.
        assert!(sessions.find_session("stale").await.unwrap().is_none());
    }
}
