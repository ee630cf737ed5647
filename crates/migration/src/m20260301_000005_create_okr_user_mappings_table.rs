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
                    .table(OkrUserMappings::Table)
                    .if_not_exists()
                    .col(pk_auto(OkrUserMappings::Id))
                    .col(integer(OkrUserMappings::OkrId))
                    .col(integer(OkrUserMappings::UserId))
                    .col(boolean(OkrUserMappings::IsPrimary).default(false))
                    .col(
                        timestamp_with_time_zone(OkrUserMappings::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_okr_user_mappings_okr_id")
                            .from(OkrUserMappings::Table, OkrUserMappings::OkrId)
                            .to(Okrs::Table, Okrs::OkrId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_okr_user_mappings_user_id")
                            .from(OkrUserMappings::Table, OkrUserMappings::UserId)
                            .to(Users::Table, Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One assignment per (okr, user) pair
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_okr_user_mappings_okr_user")
                    .table(OkrUserMappings::Table)
                    .col(OkrUserMappings::OkrId)
                    .col(OkrUserMappings::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_okr_user_mappings_user_id")
                    .table(OkrUserMappings::Table)
                    .col(OkrUserMappings::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OkrUserMappings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum OkrUserMappings {
    Table,
    Id,
    OkrId,
    UserId,
    IsPrimary,
    CreatedAt,
}
