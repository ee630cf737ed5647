//! # Department Handlers

use axum::Json;
use entity::{departments, okrs, Departments, Okrs};
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait};
use tracing::{debug, info};
use validator::Validate;

use super::find_or_404;
use crate::{
    dto::departments::{CreateDepartmentRequest, DepartmentResponse, UpdateDepartmentRequest},
    AppState,
};

async fn ensure_name_free(state: &AppState, name: &str, exclude: Option<i32>) -> Result<()> {
    let mut query = Departments::find().filter(departments::Column::Name.eq(name));
    if let Some(id) = exclude {
        query = query.filter(departments::Column::Id.ne(id));
    }
    if query.one(&state.db).await?.is_some() {
        return Err(AppError::conflict("department with this name already exists."));
    }
    Ok(())
}

pub async fn list_departments(state: &AppState) -> Result<Json<Vec<DepartmentResponse>>> {
    let rows = Departments::find()
        .order_by_asc(departments::Column::Id)
        .all(&state.db)
        .await?;
    debug!(count = rows.len(), "Listed departments");
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn get_department(state: &AppState, id: i32) -> Result<Json<DepartmentResponse>> {
    let department = find_or_404::<Departments, _>(&state.db, id, "Department not found").await?;
    Ok(Json(department.into()))
}

pub async fn create_department(state: &AppState, req: CreateDepartmentRequest) -> Result<Json<DepartmentResponse>> {
    req.validate()?;
    ensure_name_free(state, &req.name, None).await?;

    let department = departments::ActiveModel {
        name: Set(req.name),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(department_id = department.id, name = %department.name, "Department created");
    Ok(Json(department.into()))
}

pub async fn update_department(
    state: &AppState,
    id: i32,
    req: UpdateDepartmentRequest,
) -> Result<Json<DepartmentResponse>> {
    req.validate()?;
    let department = find_or_404::<Departments, _>(&state.db, id, "Department not found").await?;

    let mut active: departments::ActiveModel = department.clone().into();
    if let Some(name) = req.name {
        ensure_name_free(state, &name, Some(id)).await?;
        active.name = Set(name);
    }
    let department = if active.is_changed() {
        active.update(&state.db).await?
    }
    else {
        department
    };

    info!(department_id = id, "Department updated");
    Ok(Json(department.into()))
}

/// Deletes a department. Refused while any OKR still belongs to it.
pub async fn delete_department(state: &AppState, id: i32) -> Result<()> {
    let txn = state.db.begin().await?;
    find_or_404::<Departments, _>(&txn, id, "Department not found").await?;

    let owned = Okrs::find()
        .filter(okrs::Column::DepartmentId.eq(id))
        .count(&txn)
        .await?;
    if owned > 0 {
        return Err(AppError::protected(format!(
            "Cannot delete department because it is referenced by {} OKR(s)",
            owned
        )));
    }

    Departments::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    info!(department_id = id, "Department deleted");
    Ok(())
}
