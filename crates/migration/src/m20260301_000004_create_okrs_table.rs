use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260301_000001_create_departments_table::Departments;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Okrs::Table)
                    .if_not_exists()
                    .col(pk_auto(Okrs::OkrId))
                    .col(string_len(Okrs::Name, 200))
                    .col(text(Okrs::Description))
                    .col(text_null(Okrs::Assumptions))
                    .col(integer_null(Okrs::ParentOkrId))
                    .col(integer(Okrs::DepartmentId))
                    .col(date(Okrs::StartDate))
                    .col(date(Okrs::DueDate))
                    .col(boolean(Okrs::Status).default(true))
                    .col(decimal_len(Okrs::ProgressPercent, 5, 2))
                    .col(boolean(Okrs::IsMeasurable).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_okrs_parent_okr_id")
                            .from(Okrs::Table, Okrs::ParentOkrId)
                            .to(Okrs::Table, Okrs::OkrId)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_okrs_department_id")
                            .from(Okrs::Table, Okrs::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_okrs_department_id")
                    .table(Okrs::Table)
                    .col(Okrs::DepartmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_okrs_parent_okr_id")
                    .table(Okrs::Table)
                    .col(Okrs::ParentOkrId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Okrs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Okrs {
    Table,
    OkrId,
    Name,
    Description,
    Assumptions,
    ParentOkrId,
    DepartmentId,
    StartDate,
    DueDate,
    Status,
    ProgressPercent,
    IsMeasurable,
}
