//! Password hashing and API-token minting.
//!
//! Passwords are hashed with Argon2id and stored as PHC strings. Bearer
//! tokens are opaque UUIDs, minted once at signup and looked up verbatim.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("failed to hash password: {0}")]
    Hash(String),
    #[error("stored password hash is invalid: {0}")]
    InvalidHash(String),
    #[error("failed to verify password: {0}")]
    Verify(String),
}

/// Hash a password with Argon2id and a random salt, returning a PHC string.
pub fn hash_password(password: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| CredentialError::Hash(err.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash. A mismatch is `Ok(false)`,
/// not an error; a malformed stored hash is an error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, CredentialError> {
    let parsed = PasswordHash::new(hash).map_err(|err| CredentialError::InvalidHash(err.to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(CredentialError::Verify(err.to_string())),
    }
}

/// Mint an opaque bearer token.
pub fn generate_token() -> String {
    uuid::Uuid::new_v4().to_string()
}
