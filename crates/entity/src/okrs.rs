//! OKRs Entity
//!
//! Objectives with measurable progress. An OKR belongs to a department,
//! may hang under a parent OKR and is linked to users and business units
//! through join tables.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "okrs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub okr_id:           i32,
    pub name:             String,
    #[sea_orm(column_type = "Text")]
    pub description:      String,
    #[sea_orm(column_type = "Text", nullable)]
    pub assumptions:      Option<String>,
    pub parent_okr_id:    Option<i32>,
    pub department_id:    i32,
    pub start_date:       Date,
    pub due_date:         Date,
    pub status:           bool,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub progress_percent: Decimal,
    pub is_measurable:    bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentOkrId",
        to = "Column::OkrId",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    ParentOkr,
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::DepartmentId",
        to = "super::departments::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Department,
    #[sea_orm(has_many = "super::tasks::Entity")]
    Tasks,
    #[sea_orm(has_many = "super::okr_user_mappings::Entity")]
    UserMappings,
    #[sea_orm(has_many = "super::business_unit_okr_mappings::Entity")]
    BusinessUnitMappings,
    #[sea_orm(has_many = "super::logs::Entity")]
    Logs,
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef { Relation::Department.def() }
}

impl Related<super::tasks::Entity> for Entity {
    fn to() -> RelationDef { Relation::Tasks.def() }
}

impl Related<super::okr_user_mappings::Entity> for Entity {
    fn to() -> RelationDef { Relation::UserMappings.def() }
}

impl Related<super::business_unit_okr_mappings::Entity> for Entity {
    fn to() -> RelationDef { Relation::BusinessUnitMappings.def() }
}

impl Related<super::logs::Entity> for Entity {
    fn to() -> RelationDef { Relation::Logs.def() }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef { super::okr_user_mappings::Relation::User.def() }

    fn via() -> Option<RelationDef> { Some(super::okr_user_mappings::Relation::Okr.def().rev()) }
}

impl Related<super::business_units::Entity> for Entity {
    fn to() -> RelationDef { super::business_unit_okr_mappings::Relation::BusinessUnit.def() }

    fn via() -> Option<RelationDef> { Some(super::business_unit_okr_mappings::Relation::Okr.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}
