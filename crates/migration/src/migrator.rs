//! # Database Migrator
//!
//! Implements the Sea-ORM migrator trait for the OKR tracker schema.
//! Migrations run in list order; every table is created after the tables it references.

use sea_orm_migration::prelude::*;

use crate::{
    m20260301_000001_create_departments_table,
    m20260301_000002_create_business_units_table,
    m20260301_000003_create_users_table,
    m20260301_000004_create_okrs_table,
    m20260301_000005_create_okr_user_mappings_table,
    m20260301_000006_create_business_unit_okr_mappings_table,
    m20260301_000007_create_tasks_table,
    m20260301_000008_create_task_challenges_table,
    m20260301_000009_create_logs_table,
};

/// The main migrator that coordinates all migration operations
///
/// # Example
///
/// ```rust,ignore
/// use migration::{Migrator, MigratorTrait};
///
/// Migrator::up(&db, None).await?;
/// ```
#[derive(Debug)]
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_departments_table::Migration),
            Box::new(m20260301_000002_create_business_units_table::Migration),
            Box::new(m20260301_000003_create_users_table::Migration),
            Box::new(m20260301_000004_create_okrs_table::Migration),
            Box::new(m20260301_000005_create_okr_user_mappings_table::Migration),
            Box::new(m20260301_000006_create_business_unit_okr_mappings_table::Migration),
            Box::new(m20260301_000007_create_tasks_table::Migration),
            Box::new(m20260301_000008_create_task_challenges_table::Migration),
            Box::new(m20260301_000009_create_logs_table::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ConnectOptions, ConnectionTrait, Database, Statement};

    use super::*;

    #[test]
    fn test_migrations_count() {
        assert_eq!(Migrator::migrations().len(), 9);
    }

    #[test]
    fn test_migration_names_are_ordered() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[tokio::test]
    async fn test_up_and_down_on_sqlite() {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).min_connections(1);
        let db = Database::connect(options).await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let manager = SchemaManager::new(&db);
        for table in [
            "departments",
            "business_units",
            "users",
            "okrs",
            "okr_user_mappings",
            "business_unit_okr_mappings",
            "tasks",
            "task_challenges",
            "logs",
        ] {
            assert!(manager.has_table(table).await.unwrap(), "missing {}", table);
        }

        db.execute(Statement::from_string(
            db.get_database_backend(),
            "INSERT INTO departments (name) VALUES ('Engineering')",
        ))
        .await
        .unwrap();
        let duplicate = db
            .execute(Statement::from_string(
                db.get_database_backend(),
                "INSERT INTO departments (name) VALUES ('Engineering')",
            ))
            .await;
        assert!(duplicate.is_err(), "department names must be unique");

        Migrator::down(&db, None).await.unwrap();
        assert!(!manager.has_table("okrs").await.unwrap());
    }
}
