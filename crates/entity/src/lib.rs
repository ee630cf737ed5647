//! Entity definitions for the OKR tracker
//!
//! Sea-ORM entity definitions for every persisted record: organisation
//! structure (departments, business units, users), OKRs with their
//! assignment join tables, tasks, task challenges and progress logs.

pub mod sea_orm_active_enums;

pub mod business_unit_okr_mappings;
pub use business_unit_okr_mappings::Entity as BusinessUnitOkrMappings;
pub mod business_units;
pub use business_units::Entity as BusinessUnits;
pub mod departments;
pub use departments::Entity as Departments;
pub mod logs;
pub use logs::Entity as Logs;
pub mod okr_user_mappings;
pub use okr_user_mappings::Entity as OkrUserMappings;
pub mod okrs;
pub use okrs::Entity as Okrs;
pub mod task_challenges;
pub use task_challenges::Entity as TaskChallenges;
pub mod tasks;
pub use tasks::Entity as Tasks;
pub mod users;
pub use users::Entity as Users;
