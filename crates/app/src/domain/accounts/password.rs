//! Password hashing.
//!
//! Argon2id with a random salt per hash, stored as a PHC string.

use std::fmt;

use argon2::{
    Argon2,
    password_hash::{
        self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use thiserror::Error;
use zeroize::Zeroizing;

/// Argon2 hashing or verification failure.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to hash password")]
    Hash(#[source] password_hash::Error),

    #[error("stored password hash is malformed")]
    MalformedHash(#[source] password_hash::Error),
}

/// A plaintext password, wiped from memory on drop.
#[derive(Clone)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Take ownership of a plaintext password.
    #[must_use]
    pub fn new(value: String) -> Self {
        Self(Zeroizing::new(value))
    }

    /// The plaintext, for hashing only.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**redacted**)")
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

/// Hash a password into a PHC string.
///
/// # Errors
///
/// Returns an error if Argon2 rejects the input.
pub fn hash_password(password: &Password) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.expose().as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordError::Hash)
}

/// Check a password against a stored PHC string.
///
/// # Errors
///
/// Returns an error when the stored hash cannot be parsed. A wrong password is `Ok(false)`.
pub fn verify_password(password: &Password, stored_hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored_hash).map_err(PasswordError::MalformedHash)?;

    match Argon2::default().verify_password(password.expose().as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(error) => Err(PasswordError::MalformedHash(error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashed_password_verifies() {
        let password = Password::new("correct horse".to_string());
        let hash = hash_password(&password).expect("hashing should succeed");

        assert!(hash.starts_with("$argon2id$"), "unexpected hash {hash}");
        assert!(verify_password(&password, &hash).expect("verify should succeed"));
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let hash = hash_password(&Password::new("correct horse".to_string()))
            .expect("hashing should succeed");

        let verified = verify_password(&Password::new("battery staple".to_string()), &hash)
            .expect("verify should succeed");

        assert!(!verified);
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let password = Password::new("correct horse".to_string());

        let first = hash_password(&password).expect("hashing should succeed");
        let second = hash_password(&password).expect("hashing should succeed");

        assert_ne!(first, second);
    }

    #[test]
    fn malformed_hash_is_an_error() {
        let result = verify_password(&Password::new("x".to_string()), "not-a-phc-string");

        assert!(matches!(result, Err(PasswordError::MalformedHash(_))));
    }

    #[test]
    fn debug_output_is_redacted() {
        let password = Password::new("hunter2".to_string());

        assert_eq!(format!("{password:?}"), "Password(**redacted**)");
    }
}
