//! # User Data Transfer Objects
//!
//! Request and response types for user management endpoints. The password is
//! write-only and `hierarchy_path` is read-only: it is ignored on input.

use entity::{sea_orm_active_enums::UserStatus, users};
use error::{AppError, Result};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create a new user
#[derive(Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Derived from the email local part when absent or blank
    #[validate(length(max = 50, message = "Username must not exceed 50 characters"))]
    pub username:    Option<String>,
    #[validate(length(min = 1, max = 50, message = "Employee ID must be between 1 and 50 characters"))]
    pub employee_id: String,
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name:        String,
    #[validate(
        email(message = "Enter a valid email address."),
        length(max = 254, message = "Email must not exceed 254 characters")
    )]
    pub email:       String,
    #[validate(length(min = 1, max = 128, message = "Password must be between 1 and 128 characters"))]
    pub password:    Option<String>,
    #[validate(length(min = 1, max = 50, message = "Role must be between 1 and 50 characters"))]
    pub role:        String,
    pub level:       i32,
    /// Manager's user id
    pub manager:     Option<i32>,
    #[validate(length(min = 1, max = 100, message = "Org unit must be between 1 and 100 characters"))]
    pub org_unit:    String,
    #[serde(default)]
    pub status:      UserStatus,
}

/// Width of the `username` column.
pub const USERNAME_MAX_LEN: usize = 50;

impl CreateUserRequest {
    /// The username to store: the given one, or the email's local part.
    ///
    /// A derived name longer than the column is rejected, since the email
    /// rules allow a 64 character local part.
    pub fn effective_username(&self) -> Result<String> {
        let username = match self.username.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => users::username_from_email(&self.email).to_string(),
        };
        if username.chars().count() > USERNAME_MAX_LEN {
            return Err(AppError::validation(format!(
                "username: Username must not exceed {} characters",
                USERNAME_MAX_LEN
            )));
        }
        Ok(username)
    }
}

/// Request to update a user; absent fields are left unchanged
#[derive(Clone, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 50, message = "Username must be between 1 and 50 characters"))]
    pub username:    Option<String>,
    #[validate(length(min = 1, max = 50, message = "Employee ID must be between 1 and 50 characters"))]
    pub employee_id: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name:        Option<String>,
    #[validate(
        email(message = "Enter a valid email address."),
        length(max = 254, message = "Email must not exceed 254 characters")
    )]
    pub email:       Option<String>,
    #[validate(length(min = 1, max = 128, message = "Password must be between 1 and 128 characters"))]
    pub password:    Option<String>,
    #[validate(length(min = 1, max = 50, message = "Role must be between 1 and 50 characters"))]
    pub role:        Option<String>,
    pub level:       Option<i32>,
    /// `null` clears the manager
    #[serde(default, deserialize_with = "crate::dto::double_option")]
    pub manager:     Option<Option<i32>>,
    #[validate(length(min = 1, max = 100, message = "Org unit must be between 1 and 100 characters"))]
    pub org_unit:    Option<String>,
    pub status:      Option<UserStatus>,
}

impl From<CreateUserRequest> for UpdateUserRequest {
    fn from(req: CreateUserRequest) -> Self {
        let username = req.effective_username();
        Self {
            username:    Some(username),
            employee_id: Some(req.employee_id),
            name:        Some(req.name),
            email:       Some(req.email),
            password:    req.password,
            role:        Some(req.role),
            level:       Some(req.level),
            manager:     Some(req.manager),
            org_unit:    Some(req.org_unit),
            status:      Some(req.status),
        }
    }
}

/// User as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub user_id:        i32,
    pub username:       String,
    pub employee_id:    String,
    pub name:           String,
    pub email:          String,
    pub role:           String,
    pub level:          i32,
    pub manager:        Option<i32>,
    pub hierarchy_path: String,
    pub org_unit:       String,
    pub status:         UserStatus,
}

impl From<users::Model> for UserResponse {
    fn from(model: users::Model) -> Self {
        Self {
            user_id:        model.user_id,
            username:       model.username,
            employee_id:    model.employee_id,
            name:           model.name,
            email:          model.email,
            role:           model.role,
            level:          model.level,
            manager:        model.manager_id,
            hierarchy_path: model.hierarchy_path,
            org_unit:       model.org_unit,
            status:         model.status,
        }
    }
}

/// Short user record nested in mapping representations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub user_id:     i32,
    pub name:        String,
    pub email:       String,
    pub employee_id: String,
    pub role:        String,
    pub level:       i32,
}

impl From<users::Model> for UserSummary {
    fn from(model: users::Model) -> Self {
        Self {
            user_id:     model.user_id,
            name:        model.name,
            email:       model.email,
            employee_id: model.employee_id,
            role:        model.role,
            level:       model.level,
        }
    }
}
