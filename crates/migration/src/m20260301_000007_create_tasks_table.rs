use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20260301_000003_create_users_table::Users, m20260301_000004_create_okrs_table::Okrs};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(pk_auto(Tasks::TaskId))
                    .col(string_len(Tasks::Title, 200))
                    .col(text(Tasks::Description))
                    .col(date(Tasks::StartDate))
                    .col(date(Tasks::DueDate))
                    // 0 Completed, 1 In Progress, 2 Hold, 3 Delayed, 4 Yet to Start
                    .col(integer(Tasks::Status).default(4))
                    .col(integer(Tasks::AssignedToId))
                    .col(integer(Tasks::LinkedToOkrId))
                    .col(decimal_len(Tasks::ProgressPercent, 5, 2))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tasks_assigned_to_id")
                            .from(Tasks::Table, Tasks::AssignedToId)
                            .to(Users::Table, Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tasks_linked_to_okr_id")
                            .from(Tasks::Table, Tasks::LinkedToOkrId)
                            .to(Okrs::Table, Okrs::OkrId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tasks_linked_to_okr_id")
                    .table(Tasks::Table)
                    .col(Tasks::LinkedToOkrId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tasks_assigned_to_id")
                    .table(Tasks::Table)
                    .col(Tasks::AssignedToId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tasks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Tasks {
    Table,
    TaskId,
    Title,
    Description,
    StartDate,
    DueDate,
    Status,
    AssignedToId,
    LinkedToOkrId,
    ProgressPercent,
}
