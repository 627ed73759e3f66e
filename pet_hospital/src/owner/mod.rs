//! Owner registry domain: the pet-hospital's record of pet owners.
//!
//! Plain persistence, no business rules; handlers talk to an
//! [`OwnerRepository`](crate::db::OwnerRepository) directly.

pub mod errors;
pub mod models;

pub use errors::{OwnerError, OwnerResult};
pub use models::{NewOwner, Owner, OwnerId};
