use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260301_000007_create_tasks_table::Tasks;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TaskChallenges::Table)
                    .if_not_exists()
                    .col(pk_auto(TaskChallenges::Id))
                    .col(integer(TaskChallenges::TaskId))
                    .col(string_len(TaskChallenges::ChallengeName, 200).default(""))
                    // 0 Yet to Start, 1 Active, 2 Discarded, 3 Resolved
                    .col(integer(TaskChallenges::Status).default(0))
                    .col(date(TaskChallenges::DueDate))
                    .col(string_len(TaskChallenges::Remarks, 255))
                    .col(
                        timestamp_with_time_zone(TaskChallenges::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(TaskChallenges::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_task_challenges_task_id")
                            .from(TaskChallenges::Table, TaskChallenges::TaskId)
                            .to(Tasks::Table, Tasks::TaskId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_task_challenges_task_id")
                    .table(TaskChallenges::Table)
                    .col(TaskChallenges::TaskId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TaskChallenges::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TaskChallenges {
    Table,
    Id,
    TaskId,
    ChallengeName,
    Status,
    DueDate,
    Remarks,
    CreatedAt,
    UpdatedAt,
}
