//! Password hashing.
//!
//! New and changed passwords are stored as Argon2 PHC strings. Rows created
//! before hashing was introduced still hold plaintext; those verify with a
//! constant-time comparison and are flagged for re-hashing.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use subtle::ConstantTimeEq;

use crate::error::{AppError, AppResult};

/// Outcome of checking a password against the stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// Matches an Argon2 hash.
    Valid,
    /// Matches a legacy plaintext value; the caller should store a hash.
    ValidNeedsRehash,
    Invalid,
}

impl Verification {
    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid)
    }
}

/// Hash a password into a PHC string.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Check a password against a stored value.
pub fn verify_password(password: &str, stored: &str) -> Verification {
    match PasswordHash::new(stored) {
        Ok(parsed) => {
            if Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
            {
                Verification::Valid
            } else {
                Verification::Invalid
            }
        }
        Err(_) => {
            if bool::from(stored.as_bytes().ct_eq(password.as_bytes())) {
                Verification::ValidNeedsRehash
            } else {
                Verification::Invalid
            }
        }
    }
}
