//! Tests for the public password API.

use auth::{hash_password, verify_password, PasswordConfig};
use secrecy::{ExposeSecret, SecretString};

#[test]
fn test_hash_embeds_configured_parameters() {
    let config = PasswordConfig {
        memory_cost: 2048,
        time_cost: 2,
        parallelism: 1,
        ..Default::default()
    };
    let password = SecretString::from("s3cret".to_string());
    let hash = hash_password(&password, Some(config)).unwrap();

    assert!(hash.expose_secret().contains("m=2048,t=2,p=1"));
    assert!(verify_password(&password, hash.expose_secret()).is_ok());
}

#[test]
fn test_default_parameters_verify() {
    let password = SecretString::from("TestPassword123!".to_string());
    let hash = hash_password(&password, None).unwrap();
    assert!(verify_password(&password, hash.expose_secret()).is_ok());
}
