//! # OKR Handlers
//!
//! CRUD on OKRs plus the assignment operations. Side-channel id lists in
//! write bodies are handed to [`crate::reconcile`] inside the same
//! transaction as the OKR row itself.

use axum::Json;
use entity::{okrs, Departments, Okrs};
use error::{AppError, Result};
use sea_orm::{
    sea_query::Expr,
    ActiveModelTrait,
    ColumnTrait,
    ConnectionTrait,
    EntityTrait,
    QueryFilter,
    QueryOrder,
    Set,
    TransactionTrait,
};
use serde_json::Value;
use tracing::{debug, info};
use validator::Validate;

use super::find_or_404;
use crate::{
    dto::{
        business_units::BusinessUnitResponse,
        okr_user_mappings::MappingResponse,
        okrs::{AssignedUserView, CreateOkrRequest, OkrResponse, UpdateOkrRequest},
    },
    projection,
    reconcile,
    AppState,
};

/// Checks the department and parent references of a write.
async fn check_references<C>(db: &C, department: Option<i32>, parent_okr: Option<i32>) -> Result<()>
where
    C: ConnectionTrait,
{
    if let Some(department) = department {
        find_or_404::<Departments, _>(db, department, "Department not found").await?;
    }
    if let Some(parent) = parent_okr {
        find_or_404::<Okrs, _>(db, parent, "Parent OKR not found").await?;
    }
    Ok(())
}

/// Applies the side-channel id lists. Absent lists leave mappings untouched.
async fn apply_side_channels<C>(
    db: &C,
    okr_id: i32,
    business_unit_ids: Option<&[i32]>,
    assigned_user_ids: Option<&[i32]>,
    primary_user_id: Option<i32>,
) -> Result<()>
where
    C: ConnectionTrait + TransactionTrait,
{
    if let Some(ids) = business_unit_ids {
        reconcile::replace_business_units(db, okr_id, ids).await?;
    }
    if let Some(ids) = assigned_user_ids {
        reconcile::replace_assigned_users(db, okr_id, ids, primary_user_id).await?;
    }
    Ok(())
}

pub async fn list_okrs(state: &AppState) -> Result<Json<Vec<OkrResponse>>> {
    let rows = Okrs::find()
        .order_by_asc(okrs::Column::OkrId)
        .all(&state.db)
        .await?;
    debug!(count = rows.len(), "Listed OKRs");
    Ok(Json(projection::okr_views(&state.db, rows).await?))
}

pub async fn get_okr(state: &AppState, id: i32) -> Result<Json<OkrResponse>> {
    let okr = find_or_404::<Okrs, _>(&state.db, id, "OKR not found").await?;
    Ok(Json(projection::okr_view(&state.db, okr).await?))
}

pub async fn create_okr(state: &AppState, req: CreateOkrRequest) -> Result<Json<OkrResponse>> {
    req.validate()?;
    check_references(&state.db, Some(req.department), req.parent_okr).await?;

    let txn = state.db.begin().await?;
    let okr = okrs::ActiveModel {
        name: Set(req.name),
        description: Set(req.description),
        assumptions: Set(req.assumptions),
        parent_okr_id: Set(req.parent_okr),
        department_id: Set(req.department),
        start_date: Set(req.start_date),
        due_date: Set(req.due_date),
        status: Set(req.status),
        progress_percent: Set(req.progress_percent),
        is_measurable: Set(req.is_measurable),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    apply_side_channels(
        &txn,
        okr.okr_id,
        req.business_unit_ids.as_deref(),
        req.assigned_user_ids.as_deref(),
        req.primary_user_id,
    )
    .await?;
    txn.commit().await?;

    info!(okr_id = okr.okr_id, department_id = okr.department_id, "OKR created");
    Ok(Json(projection::okr_view(&state.db, okr).await?))
}

pub async fn update_okr(state: &AppState, id: i32, req: UpdateOkrRequest) -> Result<Json<OkrResponse>> {
    req.validate()?;
    let okr = find_or_404::<Okrs, _>(&state.db, id, "OKR not found").await?;

    let new_parent = req.parent_okr.flatten();
    if new_parent == Some(id) {
        return Err(AppError::validation("parent_okr: An OKR cannot be its own parent."));
    }
    check_references(&state.db, req.department, new_parent).await?;

    let mut active: okrs::ActiveModel = okr.clone().into();
    if let Some(name) = req.name {
        active.name = Set(name);
    }
    if let Some(description) = req.description {
        active.description = Set(description);
    }
    if let Some(assumptions) = req.assumptions {
        active.assumptions = Set(assumptions);
    }
    if let Some(parent) = req.parent_okr {
        active.parent_okr_id = Set(parent);
    }
    if let Some(department) = req.department {
        active.department_id = Set(department);
    }
    if let Some(start_date) = req.start_date {
        active.start_date = Set(start_date);
    }
    if let Some(due_date) = req.due_date {
        active.due_date = Set(due_date);
    }
    if let Some(status) = req.status {
        active.status = Set(status);
    }
    if let Some(progress) = req.progress_percent {
        active.progress_percent = Set(progress);
    }
    if let Some(is_measurable) = req.is_measurable {
        active.is_measurable = Set(is_measurable);
    }

    let txn = state.db.begin().await?;
    let okr = if active.is_changed() {
        active.update(&txn).await?
    }
    else {
        okr
    };
    apply_side_channels(
        &txn,
        id,
        req.business_unit_ids.as_deref(),
        req.assigned_user_ids.as_deref(),
        req.primary_user_id,
    )
    .await?;
    txn.commit().await?;

    info!(okr_id = id, "OKR updated");
    Ok(Json(projection::okr_view(&state.db, okr).await?))
}

/// Deletes an OKR. Child OKRs lose their parent; tasks, mappings and logs go
/// with it.
pub async fn delete_okr(state: &AppState, id: i32) -> Result<()> {
    let txn = state.db.begin().await?;
    find_or_404::<Okrs, _>(&txn, id, "OKR not found").await?;

    let orphaned = Okrs::update_many()
        .col_expr(okrs::Column::ParentOkrId, Expr::value(Option::<i32>::None))
        .filter(okrs::Column::ParentOkrId.eq(id))
        .exec(&txn)
        .await?
        .rows_affected;
    Okrs::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    info!(okr_id = id, detached_children = orphaned, "OKR deleted");
    Ok(())
}

pub async fn assigned_users(state: &AppState, id: i32) -> Result<Json<Vec<AssignedUserView>>> {
    find_or_404::<Okrs, _>(&state.db, id, "OKR not found").await?;
    Ok(Json(projection::assigned_users(&state.db, id).await?))
}

/// Replaces the OKR's assignees from a `[{user_id, is_primary?}]` body.
pub async fn assign_users(state: &AppState, id: i32, body: Value) -> Result<Json<Vec<MappingResponse>>> {
    find_or_404::<Okrs, _>(&state.db, id, "OKR not found").await?;
    let items = body
        .as_array()
        .ok_or_else(|| AppError::bad_request("Expected a list of user assignments"))?;

    let (user_ids, primary) = reconcile::parse_bulk_assignments(items);
    let created = logging::measure_duration!("reconcile", format!("okr {} assignees", id), {
        reconcile::replace_assigned_users(&state.db, id, &user_ids, primary).await?
    });
    Ok(Json(projection::mapping_views(&state.db, created).await?))
}

pub async fn business_units(state: &AppState, id: i32) -> Result<Json<Vec<BusinessUnitResponse>>> {
    find_or_404::<Okrs, _>(&state.db, id, "OKR not found").await?;
    Ok(Json(projection::business_units(&state.db, id).await?))
}

/// Replaces the OKR's business units from a `[id, ...]` body.
pub async fn assign_business_units(state: &AppState, id: i32, body: Value) -> Result<Json<Vec<BusinessUnitResponse>>> {
    find_or_404::<Okrs, _>(&state.db, id, "OKR not found").await?;
    let items = body
        .as_array()
        .ok_or_else(|| AppError::bad_request("Expected a list of business unit IDs"))?;

    let ids = reconcile::parse_business_unit_ids(items);
    reconcile::replace_business_units(&state.db, id, &ids).await?;
    Ok(Json(projection::business_units(&state.db, id).await?))
}
