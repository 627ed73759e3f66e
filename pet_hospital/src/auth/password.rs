//! Password hashing and verification.
//!
//! One-way, salted Argon2id hashing with a server-side pepper. The work
//! factor is fixed at construction and immutable for the life of the process;
//! hashing is deliberately expensive to resist offline brute force.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString, rand_core::OsRng,
    },
};

use super::errors::{AuthError, AuthResult};

/// Password hasher with a fixed work factor and server-side pepper.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    pepper: String,
}

impl PasswordHasher {
    /// Create a hasher with the argon2 crate's default work factor
    /// (Argon2id, 19 MiB memory, 2 iterations).
    pub fn new(pepper: String) -> Self {
        Self {
            argon2: Argon2::default(),
            pepper,
        }
    }

    /// Create a hasher with an explicit work factor.
    ///
    /// `m_cost` is memory in KiB, `t_cost` the iteration count, `p_cost` the
    /// parallelism degree.
    pub fn with_work_factor(
        pepper: String,
        m_cost: u32,
        t_cost: u32,
        p_cost: u32,
    ) -> AuthResult<Self> {
        let params =
            Params::new(m_cost, t_cost, p_cost, None).map_err(|_| AuthError::HashingFailed)?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            pepper,
        })
    }

    /// Hash a plaintext password.
    ///
    /// A fresh random salt is generated per call, so hashing the same
    /// plaintext twice yields different serialized hashes.
    pub fn hash(&self, password: &str) -> AuthResult<String> {
        let peppered = format!("{}{}", password, self.pepper);
        let salt = SaltString::generate(&mut OsRng);

        Ok(self
            .argon2
            .hash_password(peppered.as_bytes(), &salt)
            .map_err(|_| AuthError::HashingFailed)?
            .to_string())
    }

    /// Verify a plaintext against a stored hash.
    ///
    /// The comparison inside `verify_password` is constant-time. Malformed
    /// stored hashes yield `false`, never an error.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let peppered = format!("{}{}", password, self.pepper);
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        self.argon2
            .verify_password(peppered.as_bytes(), &parsed_hash)
            .is_ok()
    }
}
