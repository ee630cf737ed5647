//! Business Unit OKR Mappings Entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "business_unit_okr_mappings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:               i32,
    pub okr_id:           i32,
    pub business_unit_id: i32,
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
        belongs_to = "super::business_units::Entity",
        from = "Column::BusinessUnitId",
        to = "super::business_units::Column::BusinessUnitId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    BusinessUnit,
}

impl Related<super::okrs::Entity> for Entity {
    fn to() -> RelationDef { Relation::Okr.def() }
}

impl Related<super::business_units::Entity> for Entity {
    fn to() -> RelationDef { Relation::BusinessUnit.def() }
}

impl ActiveModelBehavior for ActiveModel {}
