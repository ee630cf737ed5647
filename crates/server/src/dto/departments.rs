//! # Department Data Transfer Objects

use entity::departments;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create (or fully replace) a department
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CreateDepartmentRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
}

/// Request to partially update a department
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct UpdateDepartmentRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: Option<String>,
}

impl From<CreateDepartmentRequest> for UpdateDepartmentRequest {
    fn from(req: CreateDepartmentRequest) -> Self {
        Self {
            name: Some(req.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentResponse {
    pub id:   i32,
    pub name: String,
}

impl From<departments::Model> for DepartmentResponse {
    fn from(model: departments::Model) -> Self {
        Self {
            id:   model.id,
            name: model.name,
        }
    }
}
