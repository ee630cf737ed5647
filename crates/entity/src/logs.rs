//! Logs Entity
//!
//! Progress history for an OKR as reported by a user or generated by an
//! external collector. Rows are written by other services; this service
//! only defines the table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub log_id:            i32,
    pub date:              Date,
    pub okr_id:            i32,
    pub user_id:           i32,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub progress_percent:  Decimal,
    pub status:            String,
    pub confidence_level:  i32,
    #[sea_orm(column_type = "Text")]
    pub comment:           String,
    pub is_auto_generated: bool,
    pub source:            String,
    pub created_at:        chrono::DateTime<chrono::Utc>,
    pub updated_at:        chrono::DateTime<chrono::Utc>,
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
