//! # User Handlers
//!
//! Creation and deletion go through [`crate::hierarchy`], which owns the
//! materialized path. Updates never touch `hierarchy_path`.

use auth::secrecy::{ExposeSecret, SecretString};
use axum::Json;
use entity::{users, Users};
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::{debug, info};
use validator::Validate;

use super::find_or_404;
use crate::{
    dto::users::{CreateUserRequest, UpdateUserRequest, UserResponse},
    hierarchy,
    AppState,
};

/// Rejects values already taken by another user on any unique column.
async fn ensure_unique(
    state: &AppState,
    username: Option<&str>,
    employee_id: Option<&str>,
    email: Option<&str>,
    exclude: Option<i32>,
) -> Result<()> {
    let checks = [
        (users::Column::Username, username, "username"),
        (users::Column::EmployeeId, employee_id, "employee id"),
        (users::Column::Email, email, "email"),
    ];

    for (column, value, label) in checks {
        let Some(value) = value
        else {
            continue;
        };
        let mut query = Users::find().filter(column.eq(value));
        if let Some(id) = exclude {
            query = query.filter(users::Column::UserId.ne(id));
        }
        if query.one(&state.db).await?.is_some() {
            return Err(AppError::conflict(format!("user with this {} already exists.", label)));
        }
    }
    Ok(())
}

/// Hashes a plain password off the async runtime.
async fn hash(password: String) -> Result<String> {
    let secret = SecretString::from(password);
    let hashed = tokio::task::spawn_blocking(move || auth::hash_password(&secret, None))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| AppError::validation(format!("password: {}", e)))?;
    Ok(hashed.expose_secret().to_string())
}

pub async fn list_users(state: &AppState) -> Result<Json<Vec<UserResponse>>> {
    let rows = Users::find()
        .order_by_asc(users::Column::UserId)
        .all(&state.db)
        .await?;
    debug!(count = rows.len(), "Listed users");
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn get_user(state: &AppState, id: i32) -> Result<Json<UserResponse>> {
    let user = find_or_404::<Users, _>(&state.db, id, "User not found").await?;
    Ok(Json(user.into()))
}

pub async fn create_user(state: &AppState, req: CreateUserRequest) -> Result<Json<UserResponse>> {
    req.validate()?;

    let username = req.effective_username()?;
    ensure_unique(
        state,
        Some(&username),
        Some(&req.employee_id),
        Some(&req.email),
        None,
    )
    .await?;

    let password_hash = match req.password {
        Some(password) => Some(hash(password).await?),
        None => None,
    };

    let active = users::ActiveModel {
        username: Set(username),
        employee_id: Set(req.employee_id),
        name: Set(req.name),
        email: Set(req.email),
        password_hash: Set(password_hash),
        role: Set(req.role),
        level: Set(req.level),
        manager_id: Set(req.manager),
        hierarchy_path: Set(String::new()),
        org_unit: Set(req.org_unit),
        status: Set(req.status),
        ..Default::default()
    };

    let user = hierarchy::insert_user(&state.db, active, req.manager).await?;
    Ok(Json(user.into()))
}

pub async fn update_user(state: &AppState, id: i32, req: UpdateUserRequest) -> Result<Json<UserResponse>> {
    req.validate()?;
    let user = find_or_404::<Users, _>(&state.db, id, "User not found").await?;

    if let Some(Some(manager_id)) = req.manager {
        if manager_id == id {
            return Err(AppError::validation("manager: A user cannot be their own manager."));
        }
        hierarchy::manager_path(&state.db, Some(manager_id)).await?;
    }

    ensure_unique(
        state,
        req.username.as_deref(),
        req.employee_id.as_deref(),
        req.email.as_deref(),
        Some(id),
    )
    .await?;

    let mut active: users::ActiveModel = user.clone().into();
    if let Some(username) = req.username {
        active.username = Set(username);
    }
    if let Some(employee_id) = req.employee_id {
        active.employee_id = Set(employee_id);
    }
    if let Some(name) = req.name {
        active.name = Set(name);
    }
    if let Some(email) = req.email {
        active.email = Set(email);
    }
    if let Some(password) = req.password {
        active.password_hash = Set(Some(hash(password).await?));
    }
    if let Some(role) = req.role {
        active.role = Set(role);
    }
    if let Some(level) = req.level {
        active.level = Set(level);
    }
    if let Some(manager) = req.manager {
        active.manager_id = Set(manager);
    }
    if let Some(org_unit) = req.org_unit {
        active.org_unit = Set(org_unit);
    }
    if let Some(status) = req.status {
        active.status = Set(status);
    }

    let user = if active.is_changed() {
        active.update(&state.db).await?
    }
    else {
        user
    };
    info!(user_id = id, manager_id = ?user.manager_id, "User updated");
    Ok(Json(user.into()))
}

/// Deletes a user. Direct reports keep their records with `manager` cleared.
pub async fn delete_user(state: &AppState, id: i32) -> Result<()> { hierarchy::delete_user(&state.db, id).await }
