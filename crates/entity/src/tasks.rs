//! Tasks Entity
//!
//! Work items linked to an OKR and assigned to a user. Deleting either the
//! OKR or the user deletes the task.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub use super::sea_orm_active_enums::TaskStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub task_id:          i32,
    pub title:            String,
    #[sea_orm(column_type = "Text")]
    pub description:      String,
    pub start_date:       Date,
    pub due_date:         Date,
    pub status:           TaskStatus,
    pub assigned_to_id:   i32,
    pub linked_to_okr_id: i32,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub progress_percent: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::AssignedToId",
        to = "super::users::Column::UserId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    AssignedTo,
    #[sea_orm(
        belongs_to = "super::okrs::Entity",
        from = "Column::LinkedToOkrId",
        to = "super::okrs::Column::OkrId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    LinkedToOkr,
    #[sea_orm(has_many = "super::task_challenges::Entity")]
    Challenges,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef { Relation::AssignedTo.def() }
}

impl Related<super::okrs::Entity> for Entity {
    fn to() -> RelationDef { Relation::LinkedToOkr.def() }
}

impl Related<super::task_challenges::Entity> for Entity {
    fn to() -> RelationDef { Relation::Challenges.def() }
}

impl ActiveModelBehavior for ActiveModel {}
