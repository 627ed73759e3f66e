//! # Pet Hospital
//!
//! Core library for a small pet-hospital owner registry with
//! username/password authentication.
//!
//! ## Core Modules
//!
//! - [`auth`]: Password hashing, credential verification, and session identity
//! - [`db`]: Connection pooling and repository traits (PostgreSQL and in-memory)
//! - [`owner`]: Pet-owner record types

pub mod auth;
pub mod db;
pub mod owner;

pub use auth::{AuthError, AuthManager, AuthResult, PasswordHasher, SessionManager, User};
pub use db::{Database, DatabaseConfig};
pub use owner::{NewOwner, Owner, OwnerError};
