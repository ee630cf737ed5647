use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260301_000002_create_business_units_table::BusinessUnits,
    m20260301_000004_create_okrs_table::Okrs,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BusinessUnitOkrMappings::Table)
                    .if_not_exists()
                    .col(pk_auto(BusinessUnitOkrMappings::Id))
                    .col(integer(BusinessUnitOkrMappings::OkrId))
                    .col(integer(BusinessUnitOkrMappings::BusinessUnitId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_business_unit_okr_mappings_okr_id")
                            .from(
                                BusinessUnitOkrMappings::Table,
                                BusinessUnitOkrMappings::OkrId,
                            )
                            .to(Okrs::Table, Okrs::OkrId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_business_unit_okr_mappings_business_unit_id")
                            .from(
                                BusinessUnitOkrMappings::Table,
                                BusinessUnitOkrMappings::BusinessUnitId,
                            )
                            .to(BusinessUnits::Table, BusinessUnits::BusinessUnitId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_business_unit_okr_mappings_okr_business_unit")
                    .table(BusinessUnitOkrMappings::Table)
                    .col(BusinessUnitOkrMappings::OkrId)
                    .col(BusinessUnitOkrMappings::BusinessUnitId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(BusinessUnitOkrMappings::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
pub enum BusinessUnitOkrMappings {
    Table,
    Id,
    OkrId,
    BusinessUnitId,
}
