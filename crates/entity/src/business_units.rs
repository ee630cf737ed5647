//! Business Units Entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "business_units")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub business_unit_id:   i32,
    pub business_unit_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::business_unit_okr_mappings::Entity")]
    OkrMappings,
}

impl Related<super::business_unit_okr_mappings::Entity> for Entity {
    fn to() -> RelationDef { Relation::OkrMappings.def() }
}

impl Related<super::okrs::Entity> for Entity {
    fn to() -> RelationDef { super::business_unit_okr_mappings::Relation::Okr.def() }

    fn via() -> Option<RelationDef> { Some(super::business_unit_okr_mappings::Relation::BusinessUnit.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}
