//! # OKR-User Mapping Data Transfer Objects
//!
//! Direct CRUD on mapping rows. Nothing here keeps a single primary per OKR;
//! that is only guaranteed by the reconciler endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::users::UserSummary;

/// Request to create (or fully replace) a mapping
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateMappingRequest {
    pub okr:        i32,
    pub user:       i32,
    #[serde(default)]
    pub is_primary: bool,
}

/// Request to partially update a mapping
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateMappingRequest {
    pub okr:        Option<i32>,
    pub user:       Option<i32>,
    pub is_primary: Option<bool>,
}

impl From<CreateMappingRequest> for UpdateMappingRequest {
    fn from(req: CreateMappingRequest) -> Self {
        Self {
            okr:        Some(req.okr),
            user:       Some(req.user),
            is_primary: Some(req.is_primary),
        }
    }
}

/// Mapping as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingResponse {
    pub id:           i32,
    pub okr:          i32,
    pub user:         i32,
    pub is_primary:   bool,
    pub created_at:   DateTime<Utc>,
    pub user_details: UserSummary,
}

/// Query parameters of the mapping listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MappingListQuery {
    pub okr_id:  Option<String>,
    pub user_id: Option<String>,
}
