//! # OKR Tracker Schema Migrations
//!
//! Sea-ORM migrations for the OKR tracker plus database connection helpers.

pub use sea_orm_migration::prelude::*;

pub mod db;
mod m20260301_000001_create_departments_table;
mod m20260301_000002_create_business_units_table;
mod m20260301_000003_create_users_table;
mod m20260301_000004_create_okrs_table;
mod m20260301_000005_create_okr_user_mappings_table;
mod m20260301_000006_create_business_unit_okr_mappings_table;
mod m20260301_000007_create_tasks_table;
mod m20260301_000008_create_task_challenges_table;
mod m20260301_000009_create_logs_table;
pub mod migrator;

pub use db::{load_config_from_env, DatabaseConfig, SslMode};
pub use migrator::Migrator;
