use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::UserId))
                    .col(string_len_uniq(Users::Username, 50))
                    .col(string_len_uniq(Users::EmployeeId, 50))
                    .col(string_len(Users::Name, 100))
                    .col(string_len_uniq(Users::Email, 254))
                    .col(string_len_null(Users::PasswordHash, 255))
                    .col(string_len(Users::Role, 50))
                    .col(integer(Users::Level))
                    .col(integer_null(Users::ManagerId))
                    // Written right after insert, once the id is known
                    .col(string_len(Users::HierarchyPath, 255).default(""))
                    .col(string_len(Users::OrgUnit, 100))
                    .col(string_len(Users::Status, 16).default("active"))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_manager_id")
                            .from(Users::Table, Users::ManagerId)
                            .to(Users::Table, Users::UserId)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_manager_id")
                    .table(Users::Table)
                    .col(Users::ManagerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Users {
    Table,
    UserId,
    Username,
    EmployeeId,
    Name,
    Email,
    PasswordHash,
    Role,
    Level,
    ManagerId,
    HierarchyPath,
    OrgUnit,
    Status,
}
