//! Departments Entity
//!
//! Organisational departments. A department owns OKRs and cannot be deleted
//! while any OKR still references it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:   i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::okrs::Entity")]
    Okrs,
}

impl Related<super::okrs::Entity> for Entity {
    fn to() -> RelationDef { Relation::Okrs.def() }
}

impl ActiveModelBehavior for ActiveModel {}
