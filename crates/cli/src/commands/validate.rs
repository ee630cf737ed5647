//! # CLI Validate Command
//!
//! Checks that the environment describes a usable deployment before anything
//! is started: database settings parse, the bind address is well formed and
//! CORS origins are present.

use error::Result;
use server::middleware::cors::CorsConfig;
use tracing::info;

use crate::{commands::ServeArgs, config::parse_socket_addr};

/// Validates the configuration, optionally connecting to the database.
pub async fn validate(args: &ServeArgs, check_connection: bool) -> Result<()> {
    let db_config = migration::load_config_from_env()?;
    let address = parse_socket_addr(&args.host, args.port)?;
    let cors = CorsConfig::from_env();

    info!(
        target: "validate",
        database = %db_config.redacted_connection_string(),
        %address,
        cors_origins = ?cors.allowed_origins,
        "Configuration parsed"
    );

    if check_connection {
        let db = db_config.connect().await?;
        db.ping().await?;
        info!(target: "validate", "Database reachable");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    fn args(host: &str) -> ServeArgs {
        ServeArgs {
            host: host.to_string(),
            port: 8000,
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_validate_accepts_defaults() {
        std::env::remove_var(migration::db::DATABASE_PORT_ENV);
        assert!(validate(&args("127.0.0.1"), false).await.is_ok());
    }

    #[tokio::test]
    #[serial]
    async fn test_validate_rejects_bad_address() {
        std::env::remove_var(migration::db::DATABASE_PORT_ENV);
        let err = validate(&args("not a host"), false).await.unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }

    #[tokio::test]
    #[serial]
    async fn test_validate_rejects_bad_database_port() {
        std::env::set_var(migration::db::DATABASE_PORT_ENV, "eighty");
        let result = validate(&args("127.0.0.1"), false).await;
        std::env::remove_var(migration::db::DATABASE_PORT_ENV);
        assert_eq!(result.unwrap_err().code(), "CONFIG_ERROR");
    }
}
