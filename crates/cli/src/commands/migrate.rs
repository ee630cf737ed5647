//! # CLI Migration Command
//!
//! Applies, rolls back or lists schema migrations against the configured database.

use error::{AppError, Result};
use migration::{DatabaseConfig, Migrator, MigratorTrait as _};
use tracing::info;

use crate::commands::MigrateArgs;

/// Runs the migrate command.
pub async fn migrate(config: &DatabaseConfig, args: MigrateArgs) -> Result<()> {
    info!(
        target: "migrate",
        database = %config.redacted_connection_string(),
        rollback = %args.rollback,
        status = %args.status,
        "Running database migrations..."
    );

    let db = config.connect().await?;

    if args.status {
        let applied = Migrator::get_applied_migrations(&db)
            .await
            .map_err(|e| AppError::migration(format!("Failed to read applied migrations: {}", e)))?;
        let pending = Migrator::get_pending_migrations(&db)
            .await
            .map_err(|e| AppError::migration(format!("Failed to read pending migrations: {}", e)))?;

        for m in &applied {
            println!("applied  {}", m.name());
        }
        for m in &pending {
            println!("pending  {}", m.name());
        }

        info!(
            target: "migrate",
            applied_count = %applied.len(),
            pending_count = %pending.len(),
            "Migration status listed"
        );
        return Ok(());
    }

    if args.rollback {
        info!(target: "migrate", "Rolling back the last migration...");

        Migrator::down(&db, Some(1))
            .await
            .map_err(|e| AppError::migration(format!("Failed to rollback migration: {}", e)))?;

        info!(target: "migrate", "Rollback completed successfully");
        return Ok(());
    }

    Migrator::up(&db, None)
        .await
        .map_err(|e| AppError::migration(format!("Failed to run migrations: {}", e)))?;

    info!(target: "migrate", "Migrations completed successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_migrate_up_and_status_on_memory_database() {
        let config = DatabaseConfig::sqlite_memory();

        let up = migrate(&config, MigrateArgs {
            rollback: false,
            status:   false,
        })
        .await;
        assert!(up.is_ok());

        let status = migrate(&config, MigrateArgs {
            rollback: false,
            status:   true,
        })
        .await;
        assert!(status.is_ok());
    }
}
