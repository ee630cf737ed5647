//! # OKR Data Transfer Objects
//!
//! Write bodies carry the scalar OKR fields plus the side-channel id lists
//! (`business_unit_ids`, `assigned_user_ids`, `primary_user_id`) consumed by
//! the mapping reconcilers. The side channels are never stored on the OKR row.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::business_units::BusinessUnitResponse;

/// Request to create (or fully replace) an OKR
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct CreateOkrRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name:              String,
    #[validate(length(min = 1, message = "Description must not be blank"))]
    pub description:       String,
    pub assumptions:       Option<String>,
    pub parent_okr:        Option<i32>,
    pub department:        i32,
    pub start_date:        NaiveDate,
    pub due_date:          NaiveDate,
    #[serde(default = "default_active")]
    pub status:            bool,
    #[validate(custom(function = "super::validate_progress"))]
    pub progress_percent:  Decimal,
    #[serde(rename = "isMeasurable", default)]
    pub is_measurable:     bool,
    pub business_unit_ids: Option<Vec<i32>>,
    pub assigned_user_ids: Option<Vec<i32>>,
    pub primary_user_id:   Option<i32>,
}

fn default_active() -> bool { true }

/// Request to partially update an OKR
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct UpdateOkrRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name:              Option<String>,
    #[validate(length(min = 1, message = "Description must not be blank"))]
    pub description:       Option<String>,
    #[serde(default, deserialize_with = "crate::dto::double_option")]
    pub assumptions:       Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::dto::double_option")]
    pub parent_okr:        Option<Option<i32>>,
    pub department:        Option<i32>,
    pub start_date:        Option<NaiveDate>,
    pub due_date:          Option<NaiveDate>,
    pub status:            Option<bool>,
    #[validate(custom(function = "super::validate_progress"))]
    pub progress_percent:  Option<Decimal>,
    #[serde(rename = "isMeasurable")]
    pub is_measurable:     Option<bool>,
    pub business_unit_ids: Option<Vec<i32>>,
    pub assigned_user_ids: Option<Vec<i32>>,
    pub primary_user_id:   Option<i32>,
}

impl From<CreateOkrRequest> for UpdateOkrRequest {
    fn from(req: CreateOkrRequest) -> Self {
        Self {
            name:              Some(req.name),
            description:       Some(req.description),
            assumptions:       Some(req.assumptions),
            parent_okr:        Some(req.parent_okr),
            department:        Some(req.department),
            start_date:        Some(req.start_date),
            due_date:          Some(req.due_date),
            status:            Some(req.status),
            progress_percent:  Some(req.progress_percent),
            is_measurable:     Some(req.is_measurable),
            business_unit_ids: req.business_unit_ids,
            assigned_user_ids: req.assigned_user_ids,
            primary_user_id:   req.primary_user_id,
        }
    }
}

/// One entry of an OKR's assigned-users view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedUserView {
    pub user_id:    i32,
    pub name:       String,
    pub is_primary: bool,
}

/// OKR as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OkrResponse {
    pub okr_id:                 i32,
    pub name:                   String,
    pub description:            String,
    pub assumptions:            Option<String>,
    pub parent_okr:             Option<i32>,
    pub department:             i32,
    pub start_date:             NaiveDate,
    pub due_date:               NaiveDate,
    pub status:                 bool,
    pub progress_percent:       Decimal,
    #[serde(rename = "isMeasurable")]
    pub is_measurable:          bool,
    pub assigned_users_details: Vec<AssignedUserView>,
    pub business_units:         Vec<BusinessUnitResponse>,
}

/// One element of an `assign_users` body
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserAssignmentInput {
    pub user_id:    Option<i32>,
    pub is_primary: Option<bool>,
}
