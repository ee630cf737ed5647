//! Users Entity
//!
//! People that own OKRs and tasks, arranged in a manager tree.
//!
//! `hierarchy_path` is a materialized path (`/1/7/42`) written once when the
//! user is created and never recomputed afterwards.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub use super::sea_orm_active_enums::UserStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub user_id:        i32,
    #[sea_orm(unique)]
    pub username:       String,
    #[sea_orm(unique)]
    pub employee_id:    String,
    pub name:           String,
    #[sea_orm(unique)]
    pub email:          String,
    #[serde(skip_serializing)]
    pub password_hash:  Option<String>,
    pub role:           String,
    pub level:          i32,
    pub manager_id:     Option<i32>,
    pub hierarchy_path: String,
    pub org_unit:       String,
    pub status:         UserStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ManagerId",
        to = "Column::UserId",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Manager,
    #[sea_orm(has_many = "super::tasks::Entity")]
    Tasks,
    #[sea_orm(has_many = "super::okr_user_mappings::Entity")]
    OkrMappings,
    #[sea_orm(has_many = "super::logs::Entity")]
    Logs,
}

impl Related<super::tasks::Entity> for Entity {
    fn to() -> RelationDef { Relation::Tasks.def() }
}

impl Related<super::okr_user_mappings::Entity> for Entity {
    fn to() -> RelationDef { Relation::OkrMappings.def() }
}

impl Related<super::logs::Entity> for Entity {
    fn to() -> RelationDef { Relation::Logs.def() }
}

impl Related<super::okrs::Entity> for Entity {
    fn to() -> RelationDef { super::okr_user_mappings::Relation::Okr.def() }

    fn via() -> Option<RelationDef> { Some(super::okr_user_mappings::Relation::User.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

/// Username fallback: the local part of the email address.
pub fn username_from_email(email: &str) -> &str { email.split('@').next().unwrap_or(email) }

/// Materialized path for a user given the manager's path at creation time.
pub fn child_path(manager_path: Option<&str>, user_id: i32) -> String {
    match manager_path {
        Some(parent) => format!("{}/{}", parent, user_id),
        None => format!("/{}", user_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path() {
        assert_eq!(child_path(None, 7), "/7");
    }

    #[test]
    fn test_nested_path() {
        assert_eq!(child_path(Some("/1/3"), 12), "/1/3/12");
    }

    #[test]
    fn test_username_from_email() {
        assert_eq!(username_from_email("jane.doe@example.com"), "jane.doe");
        assert_eq!(username_from_email("no-at-sign"), "no-at-sign");
    }
}
