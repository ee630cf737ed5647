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
                    .table(Logs::Table)
                    .if_not_exists()
                    .col(pk_auto(Logs::LogId))
                    .col(date(Logs::Date))
                    .col(integer(Logs::OkrId))
                    .col(integer(Logs::UserId))
                    .col(decimal_len(Logs::ProgressPercent, 5, 2))
                    .col(string_len(Logs::Status, 50))
                    .col(integer(Logs::ConfidenceLevel))
                    .col(text(Logs::Comment))
                    .col(boolean(Logs::IsAutoGenerated).default(false))
                    .col(string_len(Logs::Source, 100))
                    .col(
                        timestamp_with_time_zone(Logs::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Logs::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_logs_okr_id")
                            .from(Logs::Table, Logs::OkrId)
                            .to(Okrs::Table, Okrs::OkrId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_logs_user_id")
                            .from(Logs::Table, Logs::UserId)
                            .to(Users::Table, Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_logs_okr_id_date")
                    .table(Logs::Table)
                    .col(Logs::OkrId)
                    .col(Logs::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Logs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Logs {
    Table,
    LogId,
    Date,
    OkrId,
    UserId,
    ProgressPercent,
    Status,
    ConfidenceLevel,
    Comment,
    IsAutoGenerated,
    Source,
    CreatedAt,
    UpdatedAt,
}
