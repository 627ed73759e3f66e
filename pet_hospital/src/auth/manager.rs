//! Credential verification and registration.

use std::sync::Arc;

use super::{
    errors::{AuthError, AuthResult},
    models::{NewUser, RegisterRequest, User},
    password::PasswordHasher,
};
use crate::db::UserRepository;

/// Longest accepted login name.
pub const MAX_USERNAME_LEN: usize = 64;

/// Credential verifier backed by a user repository and the password hasher.
#[derive(Clone)]
pub struct AuthManager {
    users: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
}

impl AuthManager {
    pub fn new(users: Arc<dyn UserRepository>, hasher: PasswordHasher) -> Self {
        Self { users, hasher }
    }

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidInput` - Empty or oversized username/password
    /// * `AuthError::UsernameTaken` - Username already exists
    /// * `AuthError::Database` - Store failure
    pub async fn register(&self, request: RegisterRequest) -> AuthResult<User> {
        validate_login_input(&request.username, &request.password)?;

        if self
            .users
            .find_credentials(&request.username)
            .await?
            .is_some()
        {
            return Err(AuthError::UsernameTaken);
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let new_user = NewUser {
            username: request.username,
            password_hash,
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
        };

        let user_id = self.users.create_user(&new_user).await?;
        tracing::info!(user_id, username = %new_user.username, "registered user");

        Ok(User {
            id: user_id,
            username: new_user.username,
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
        })
    }

    /// Check a login name and plaintext password against the credential store.
    ///
    /// Returns the resolved identity on success. `UnknownUser` and
    /// `IncorrectPassword` are distinct variants so callers can log which one
    /// happened, but both must be collapsed into the same client-visible
    /// outcome.
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidInput` - Empty username or password
    /// * `AuthError::UnknownUser` - No record for the login name
    /// * `AuthError::IncorrectPassword` - Hash mismatch
    /// * `AuthError::Database` - Store failure (never reported as "unknown user")
    pub async fn verify_credentials(&self, username: &str, password: &str) -> AuthResult<User> {
        validate_login_input(username, password)?;

        let stored = self
            .users
            .find_credentials(username)
            .await?
            .ok_or(AuthError::UnknownUser)?;

        if !self.hasher.verify(password, &stored.password_hash) {
            return Err(AuthError::IncorrectPassword);
        }

        Ok(stored.user)
    }
}

fn validate_login_input(username: &str, password: &str) -> AuthResult<()> {
    if username.is_empty() {
        return Err(AuthError::InvalidInput("username is required".to_string()));
    }
    if username.len() > MAX_USERNAME_LEN {
        return Err(AuthError::InvalidInput("username too long".to_string()));
    }
    if password.is_empty() {
        return Err(AuthError::InvalidInput("password is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::{StoredCredential, UserId};
    use crate::db::memory::MemoryUserRepository;

    /// A user store whose every operation fails.
    struct UnavailableUserRepository;

    #[async_trait::async_trait]
    impl UserRepository for UnavailableUserRepository {
        async fn create_user(&self, _new_user: &NewUser) -> AuthResult<UserId> {
            Err(AuthError::Database(sqlx::Error::PoolClosed))
        }

        async fn find_credentials(&self, _username: &str) -> AuthResult<Option<StoredCredential>> {
            Err(AuthError::Database(sqlx::Error::PoolClosed))
        }

        async fn find_by_id(&self, _user_id: UserId) -> AuthResult<Option<User>> {
            Err(AuthError::Database(sqlx::Error::PoolClosed))
        }
    }

    fn manager() -> AuthManager {
        let users = Arc::new(MemoryUserRepository::new());
        let hasher = PasswordHasher::with_work_factor("test_pepper".to_string(), 1024, 1, 1)
            .expect("test params are valid");
        AuthManager::new(users, hasher)
    }

    fn alice() -> RegisterRequest {
        RegisterRequest {
            username: "alice".to_string(),
            password: "pw123".to_string(),
            email: "alice@example.com".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Anderson".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_plaintext() {
        let users = Arc::new(MemoryUserRepository::new());
        let hasher = PasswordHasher::with_work_factor("test_pepper".to_string(), 1024, 1, 1)
            .expect("test params are valid");
        let auth = AuthManager::new(users.clone(), hasher);

        let user = auth.register(alice()).await.unwrap();
        assert_eq!(user.username, "alice");

        let stored = users.find_credentials("alice").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "pw123");
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let auth = manager();

        auth.register(alice()).await.unwrap();
        let result = auth.register(alice()).await;

        assert!(matches!(result, Err(AuthError::UsernameTaken)));
    }

    #[tokio::test]
    async fn test_register_rejects_empty_fields() {
        let auth = manager();

        let mut request = alice();
        request.username = String::new();
        assert!(matches!(
            auth.register(request).await,
            Err(AuthError::InvalidInput(_))
        ));

        let mut request = alice();
        request.password = String::new();
        assert!(matches!(
            auth.register(request).await,
            Err(AuthError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_verify_credentials_success() {
        let auth = manager();
        auth.register(alice()).await.unwrap();

        let user = auth.verify_credentials("alice", "pw123").await.unwrap();
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_verify_credentials_wrong_password() {
        let auth = manager();
        auth.register(alice()).await.unwrap();

        let result = auth.verify_credentials("alice", "wrong").await;
        assert!(matches!(result, Err(AuthError::IncorrectPassword)));

        // Repeated failures stay failures; there is no lockout policy.
        for _ in 0..3 {
            let result = auth.verify_credentials("alice", "wrong").await;
            assert!(matches!(result, Err(AuthError::IncorrectPassword)));
        }
        assert!(auth.verify_credentials("alice", "pw123").await.is_ok());
    }

    #[tokio::test]
    async fn test_verify_credentials_unknown_user() {
        let auth = manager();

        let result = auth.verify_credentials("nobody", "pw123").await;
        assert!(matches!(result, Err(AuthError::UnknownUser)));
    }

    #[tokio::test]
    async fn test_verify_credentials_store_failure_is_not_unknown_user() {
        let hasher = PasswordHasher::with_work_factor("test_pepper".to_string(), 1024, 1, 1)
            .expect("test params are valid");
        let auth = AuthManager::new(Arc::new(UnavailableUserRepository), hasher);

        let err = auth.verify_credentials("alice", "pw123").await.unwrap_err();
        assert!(matches!(err, AuthError::Database(_)));
        assert!(!err.is_credential_failure());
    }
}
