//! Password hashing policy.
//!
//! Authentication depends only on the `PasswordHasher` trait; the default
//! policy is salted Argon2id producing PHC strings.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Argon2,
};

use crate::errors::{AppError, AppResult};

/// Pluggable password hashing policy.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plain text password for storage.
    fn hash(&self, plain_text: &str) -> AppResult<String>;

    /// Verify a plain text password against a stored hash.
    ///
    /// A stored value this policy cannot parse never verifies.
    fn verify(&self, plain_text: &str, stored: &str) -> bool;
}

/// Argon2id with a random salt per hash.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, plain_text: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify(&self, plain_text: &str, stored: &str) -> bool {
        match PasswordHash::new(stored) {
            Ok(parsed) => Self::argon2()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!("Stored password hash is not a valid PHC string: {}", e);
                false
            }
        }
    }
}
