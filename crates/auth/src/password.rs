//! Password hashing and verification using Argon2id.
//!
//! Hashes are stored as PHC strings (`$argon2id$v=19$m=..,t=..,p=..$salt$hash`)
//! so the parameters travel with each hash and can be raised without
//! invalidating existing credentials.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm,
    Argon2,
    Params,
    Version,
};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Longest password accepted for hashing.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Errors that can occur during password operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Hashing failed: {0}")]
    HashingFailed(String),

    #[error("Verification failed: password does not match")]
    VerificationFailed,

    #[error("Invalid hash format")]
    InvalidHashFormat,

    #[error("Password must be between 1 and {MAX_PASSWORD_LENGTH} characters")]
    InvalidLength,
}

/// Configuration for Argon2id password hashing.
#[derive(Debug, Clone)]
pub struct PasswordConfig {
    /// Memory cost in KiB (default: 15 MiB = 15360 KiB)
    pub memory_cost: u32,
    /// Number of iterations (default: 3)
    pub time_cost:   u32,
    /// Number of lanes (default: 2)
    pub parallelism: u32,
    /// Length of the generated hash (default: 32 bytes)
    pub hash_length: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_cost: 15360, // 15 MiB
            time_cost:   3,
            parallelism: 2,
            hash_length: 32,
        }
    }
}

impl PasswordConfig {
    fn hasher(&self) -> Result<Argon2<'static>, PasswordError> {
        let params = Params::new(
            self.memory_cost,
            self.time_cost,
            self.parallelism,
            Some(self.hash_length),
        )
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

/// Hashes a password using Argon2id with a fresh random salt.
///
/// # Example
///
/// ```
/// use auth::password::hash_password;
/// use secrecy::SecretString;
///
/// let password = SecretString::from("my_secure_password".to_string());
/// let hash = hash_password(&password, None).unwrap();
/// ```
pub fn hash_password(password: &SecretString, config: Option<PasswordConfig>) -> Result<SecretString, PasswordError> {
    let raw = password.expose_secret();
    if raw.is_empty() || raw.chars().count() > MAX_PASSWORD_LENGTH {
        return Err(PasswordError::InvalidLength);
    }

    let argon2 = config.unwrap_or_default().hasher()?;
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2
        .hash_password(raw.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

    Ok(SecretString::from(hash.to_string()))
}

/// Verifies a password against a stored PHC hash.
///
/// The parameters embedded in the hash are used, not the current defaults.
pub fn verify_password(password: &SecretString, expected_hash: &str) -> Result<(), PasswordError> {
    let parsed = PasswordHash::new(expected_hash).map_err(|_| PasswordError::InvalidHashFormat)?;
    if parsed.algorithm.as_str() != "argon2id" {
        return Err(PasswordError::InvalidHashFormat);
    }

    Argon2::default()
        .verify_password(password.expose_secret().as_bytes(), &parsed)
        .map_err(|_| PasswordError::VerificationFailed)
}
