//! Repository trait definitions for testability and dependency injection.
//!
//! Trait-based abstractions over the persistence layer, with PostgreSQL
//! implementations here and in-memory implementations in
//! [`memory`](crate::db::memory).

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::auth::{AuthResult, NewUser, Session, StoredCredential, User, UserId};
use crate::owner::{NewOwner, Owner, OwnerError, OwnerId, OwnerResult};

/// Trait for user identity (credential store) operations.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user, returning the server-assigned id.
    async fn create_user(&self, new_user: &NewUser) -> AuthResult<UserId>;

    /// Find a user by login name, including the stored password hash.
    async fn find_credentials(&self, username: &str) -> AuthResult<Option<StoredCredential>>;

    /// Find a user by ID.
    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>>;
}

/// Trait for session store operations.
///
/// Each operation is a single atomic write or read; callers never need a
/// cross-record transaction.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a new session.
    async fn create_session(&self, session: &Session) -> AuthResult<()>;

    /// Find a session by its token.
    async fn find_session(&self, token: &str) -> AuthResult<Option<Session>>;

    /// Delete a session. Deleting an unknown token is not an error.
    async fn delete_session(&self, token: &str) -> AuthResult<()>;
}

/// Trait for owner registry operations.
#[async_trait]
pub trait OwnerRepository: Send + Sync {
    /// Create an owner record, returning the server-assigned id.
    async fn create_owner(&self, new_owner: &NewOwner) -> OwnerResult<OwnerId>;

    /// List all owners.
    async fn list_owners(&self) -> OwnerResult<Vec<Owner>>;

    /// Find an owner by ID.
    async fn find_owner(&self, owner_id: OwnerId) -> OwnerResult<Option<Owner>>;

    /// Update an owner record. `NotFound` if no such owner.
    async fn update_owner(&self, owner_id: OwnerId, update: &NewOwner) -> OwnerResult<()>;

    /// Delete an owner record. Deleting an unknown id is not an error.
    async fn delete_owner(&self, owner_id: OwnerId) -> OwnerResult<()>;
}

/// Default PostgreSQL implementation of `UserRepository`
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &sqlx::postgres::PgRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create_user(&self, new_user: &NewUser) -> AuthResult<UserId> {
        let row = sqlx::query(
            "INSERT INTO users (username, password_hash, email, first_name, last_name)
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(&new_user.username)
        .bind(&new_user.password_hash)
        .bind(&new_user.email)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("id"))
    }

    async fn find_credentials(&self, username: &str) -> AuthResult<Option<StoredCredential>> {
        let row = sqlx::query(
            "SELECT id, username, password_hash, email, first_name, last_name
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| StoredCredential {
            user: user_from_row(&r),
            password_hash: r.get("password_hash"),
        }))
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, username, email, first_name, last_name FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| user_from_row(&r)))
    }
}

/// Default PostgreSQL implementation of `SessionRepository`
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn create_session(&self, session: &Session) -> AuthResult<()> {
        sqlx::query(
            "INSERT INTO sessions (token, user_id, created_at, expires_at)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(&session.token)
        .bind(session.user_id)
        .bind(session.created_at.naive_utc())
        .bind(session.expires_at.naive_utc())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_session(&self, token: &str) -> AuthResult<Option<Session>> {
        let row = sqlx::query(
            "SELECT token, user_id, created_at, expires_at FROM sessions WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| Session {
            token: r.get("token"),
            user_id: r.get("user_id"),
            created_at: r.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
            expires_at: r.get::<chrono::NaiveDateTime, _>("expires_at").and_utc(),
        }))
    }

    async fn delete_session(&self, token: &str) -> AuthResult<()> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Default PostgreSQL implementation of `OwnerRepository`
pub struct PgOwnerRepository {
    pool: PgPool,
}

impl PgOwnerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn owner_from_row(row: &sqlx::postgres::PgRow) -> Owner {
    Owner {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        phone_number: row.get("phone_number"),
        email: row.get("email"),
    }
}

#[async_trait]
impl OwnerRepository for PgOwnerRepository {
    async fn create_owner(&self, new_owner: &NewOwner) -> OwnerResult<OwnerId> {
        let row = sqlx::query(
            "INSERT INTO owners (first_name, last_name, phone_number, email)
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&new_owner.first_name)
        .bind(&new_owner.last_name)
        .bind(&new_owner.phone_number)
        .bind(&new_owner.email)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("id"))
    }

    async fn list_owners(&self) -> OwnerResult<Vec<Owner>> {
        let rows = sqlx::query(
            "SELECT id, first_name, last_name, phone_number, email FROM owners ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(owner_from_row).collect())
    }

    async fn find_owner(&self, owner_id: OwnerId) -> OwnerResult<Option<Owner>> {
        let row = sqlx::query(
            "SELECT id, first_name, last_name, phone_number, email FROM owners WHERE id = $1",
        )
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| owner_from_row(&r)))
    }

    async fn update_owner(&self, owner_id: OwnerId, update: &NewOwner) -> OwnerResult<()> {
        let result = sqlx::query(
            "UPDATE owners SET first_name = $2, last_name = $3, phone_number = $4, email = $5
             WHERE id = $1",
        )
        .bind(owner_id)
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.phone_number)
        .bind(&update.email)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(OwnerError::NotFound(owner_id));
        }
        Ok(())
    }

    async fn delete_owner(&self, owner_id: OwnerId) -> OwnerResult<()> {
        sqlx::query("DELETE FROM owners WHERE id = $1")
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
