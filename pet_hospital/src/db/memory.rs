//! In-memory repository implementations.
//!
//! Used by the test suites and by DB-less local runs. Every operation takes
//! the store lock for its full duration, so each record-level write is atomic.

use std::collections::HashMap;
use std::sync::{
    Mutex,
    atomic::{AtomicI64, Ordering},
};

use async_trait::async_trait;

use crate::auth::{AuthResult, NewUser, Session, StoredCredential, User, UserId};
use crate::owner::{NewOwner, Owner, OwnerError, OwnerId, OwnerResult};

use super::repository::{OwnerRepository, SessionRepository, UserRepository};

/// In-memory implementation of [`UserRepository`].
pub struct MemoryUserRepository {
    users: Mutex<HashMap<UserId, StoredCredential>>,
    next_id: AtomicI64,
}

impl Default for MemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Remove a user record, leaving any sessions that reference it dangling.
    pub fn remove_user(&self, user_id: UserId) {
        self.users.lock().unwrap().remove(&user_id);
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create_user(&self, new_user: &NewUser) -> AuthResult<UserId> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let credential = StoredCredential {
            user: User {
                id,
                username: new_user.username.clone(),
                email: new_user.email.clone(),
                first_name: new_user.first_name.clone(),
                last_name: new_user.last_name.clone(),
            },
            password_hash: new_user.password_hash.clone(),
        };

        self.users.lock().unwrap().insert(id, credential);
        Ok(id)
    }

    async fn find_credentials(&self, username: &str) -> AuthResult<Option<StoredCredential>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .values()
            .find(|c| c.user.username == username)
            .cloned())
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.get(&user_id).map(|c| c.user.clone()))
    }
}

/// In-memory implementation of [`SessionRepository`].
#[derive(Default)]
pub struct MemorySessionRepository {
    sessions: Mutex<HashMap<String, Session>>,
}

impl MemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for MemorySessionRepository {
    async fn create_session(&self, session: &Session) -> AuthResult<()> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.token.clone(), session.clone());
        Ok(())
    }

    async fn find_session(&self, token: &str) -> AuthResult<Option<Session>> {
        Ok(self.sessions.lock().unwrap().get(token).cloned())
    }

    async fn delete_session(&self, token: &str) -> AuthResult<()> {
        self.sessions.lock().unwrap().remove(token);
        Ok(())
    }
}

/// In-memory implementation of [`OwnerRepository`].
pub struct MemoryOwnerRepository {
    owners: Mutex<HashMap<OwnerId, Owner>>,
    next_id: AtomicI64,
}

impl Default for MemoryOwnerRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryOwnerRepository {
    pub fn new() -> Self {
        Self {
            owners: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl OwnerRepository for MemoryOwnerRepository {
    async fn create_owner(&self, new_owner: &NewOwner) -> OwnerResult<OwnerId> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let owner = Owner {
            id,
            first_name: new_owner.first_name.clone(),
            last_name: new_owner.last_name.clone(),
            phone_number: new_owner.phone_number.clone(),
            email: new_owner.email.clone(),
        };

        self.owners.lock().unwrap().insert(id, owner);
        Ok(id)
    }

    async fn list_owners(&self) -> OwnerResult<Vec<Owner>> {
        let mut owners: Vec<Owner> = self.owners.lock().unwrap().values().cloned().collect();
        owners.sort_by_key(|o| o.id);
        Ok(owners)
    }

    async fn find_owner(&self, owner_id: OwnerId) -> OwnerResult<Option<Owner>> {
        Ok(self.owners.lock().unwrap().get(&owner_id).cloned())
    }

    async fn update_owner(&self, owner_id: OwnerId, update: &NewOwner) -> OwnerResult<()> {
        let mut owners = self.owners.lock().unwrap();
        let owner = owners
            .get_mut(&owner_id)
            .ok_or(OwnerError::NotFound(owner_id))?;

        owner.first_name = update.first_name.clone();
        owner.last_name = update.last_name.clone();
        owner.phone_number = update.phone_number.clone();
        owner.email = update.email.clone();
        Ok(())
    }

    async fn delete_owner(&self, owner_id: OwnerId) -> OwnerResult<()> {
        self.owners.lock().unwrap().remove(&owner_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            email: format!("{username}@example.com"),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
        }
    }

    #[tokio::test]
    async fn test_user_ids_are_monotonic() {
        let repo = MemoryUserRepository::new();

        let first = repo.create_user(&new_user("alice")).await.unwrap();
        let second = repo.create_user(&new_user("bob")).await.unwrap();

        assert!(second > first);
    }

    #[tokio::test]
    async fn test_find_credentials_by_username() {
        let repo = MemoryUserRepository::new();

        assert!(repo.find_credentials("alice").await.unwrap().is_none());

        repo.create_user(&new_user("alice")).await.unwrap();
        let credential = repo.find_credentials("alice").await.unwrap().unwrap();
        assert_eq!(credential.user.username, "alice");
    }

    #[tokio::test]
    async fn test_session_store_roundtrip() {
        let repo = MemorySessionRepository::new();
        let now = chrono::Utc::now();
        let session = Session {
            token: "tok".to_string(),
            user_id: 1,
            created_at: now,
            expires_at: now + chrono::Duration::days(7),
        };

        repo.create_session(&session).await.unwrap();
        assert!(repo.find_session("tok").await.unwrap().is_some());

        repo.delete_session("tok").await.unwrap();
        assert!(repo.find_session("tok").await.unwrap().is_none());

        // Deleting again is not an error.
        repo.delete_session("tok").await.unwrap();
    }

    #[tokio::test]
    async fn test_owner_crud() {
        let repo = MemoryOwnerRepository::new();
        let new_owner = NewOwner {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            phone_number: "555-0100".to_string(),
            email: "jane@example.com".to_string(),
        };

        let id = repo.create_owner(&new_owner).await.unwrap();
        assert_eq!(repo.list_owners().await.unwrap().len(), 1);

        let update = NewOwner {
            phone_number: "555-0199".to_string(),
            ..new_owner.clone()
        };
        repo.update_owner(id, &update).await.unwrap();
        let owner = repo.find_owner(id).await.unwrap().unwrap();
        assert_eq!(owner.phone_number, "555-0199");

        repo.delete_owner(id).await.unwrap();
        assert!(repo.find_owner(id).await.unwrap().is_none());

        let missing = repo.update_owner(id, &update).await;
        assert!(matches!(missing, Err(OwnerError::NotFound(_))));
    }
}
