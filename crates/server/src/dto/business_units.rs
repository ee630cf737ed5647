//! # Business Unit Data Transfer Objects

use entity::business_units;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create (or fully replace) a business unit
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CreateBusinessUnitRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Business unit name must be between 1 and 100 characters"
    ))]
    pub business_unit_name: String,
}

/// Request to partially update a business unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct UpdateBusinessUnitRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Business unit name must be between 1 and 100 characters"
    ))]
    pub business_unit_name: Option<String>,
}

impl From<CreateBusinessUnitRequest> for UpdateBusinessUnitRequest {
    fn from(req: CreateBusinessUnitRequest) -> Self {
        Self {
            business_unit_name: Some(req.business_unit_name),
        }
    }
}

/// Business unit as returned by the API, standalone or nested in an OKR
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessUnitResponse {
    pub business_unit_id:   i32,
    pub business_unit_name: String,
}

impl From<business_units::Model> for BusinessUnitResponse {
    fn from(model: business_units::Model) -> Self {
        Self {
            business_unit_id:   model.business_unit_id,
            business_unit_name: model.business_unit_name,
        }
    }
}
