//! Owner registry data models.

use serde::{Deserialize, Serialize};

/// Owner ID type
pub type OwnerId = i64;

/// A pet owner record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    pub id: OwnerId,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
}

/// Fields for creating or updating an owner record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOwner {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
}
