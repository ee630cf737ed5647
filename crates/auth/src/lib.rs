//! # Credential Handling
//!
//! Argon2id hashing for the optional password stored on OKR tracker users.

pub mod password;

pub use password::{hash_password, verify_password, PasswordConfig, PasswordError};
pub use secrecy;
