//! Task Challenges Entity
//!
//! Blockers or risks recorded against a task.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub use super::sea_orm_active_enums::ChallengeStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "task_challenges")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:             i32,
    pub task_id:        i32,
    pub challenge_name: String,
    pub status:         ChallengeStatus,
    pub due_date:       Date,
    pub remarks:        String,
    pub created_at:     chrono::DateTime<chrono::Utc>,
    pub updated_at:     chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tasks::Entity",
        from = "Column::TaskId",
        to = "super::tasks::Column::TaskId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Task,
}

impl Related<super::tasks::Entity> for Entity {
    fn to() -> RelationDef { Relation::Task.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Stored name, or `Challenge for Task {title}` when it was left blank.
    pub fn display_name(&self, task_title: &str) -> String {
        if self.challenge_name.trim().is_empty() {
            format!("Challenge for Task {}", task_title)
        }
        else {
            self.challenge_name.clone()
        }
    }
}
