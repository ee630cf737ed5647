//! OKR User Mappings Entity
//!
//! Assignment of a user to an OKR. At most one mapping per OKR is expected
//! to carry `is_primary`; the storage layer does not enforce it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "okr_user_mappings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:         i32,
    pub okr_id:     i32,
    pub user_id:    i32,
    pub is_primary: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::okrs::Entity",
        from = "Column::OkrId",
        to = "super::okrs::Column::OkrId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Okr,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::UserId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::okrs::Entity> for Entity {
    fn to() -> RelationDef { Relation::Okr.def() }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl ActiveModelBehavior for ActiveModel {}
