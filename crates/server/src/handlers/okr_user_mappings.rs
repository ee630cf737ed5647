//! # OKR-User Mapping Handlers
//!
//! Direct row-level access to assignments. Unlike the reconciler endpoints
//! these do not enforce a single primary per OKR.

use axum::Json;
use chrono::Utc;
use entity::{okr_user_mappings, OkrUserMappings, Okrs, Users};
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::{debug, info};

use super::find_or_404;
use crate::{
    dto::{
        okr_user_mappings::{CreateMappingRequest, MappingListQuery, MappingResponse, UpdateMappingRequest},
        parse_id_param,
    },
    projection,
    AppState,
};

async fn render(state: &AppState, mapping: okr_user_mappings::Model) -> Result<MappingResponse> {
    let mapping_id = mapping.id;
    projection::mapping_views(&state.db, vec![mapping])
        .await?
        .pop()
        .ok_or_else(|| AppError::internal(format!("Mapping {} references a missing user", mapping_id)))
}

async fn ensure_pair_free(state: &AppState, okr_id: i32, user_id: i32, exclude: Option<i32>) -> Result<()> {
    let mut query = OkrUserMappings::find()
        .filter(okr_user_mappings::Column::OkrId.eq(okr_id))
        .filter(okr_user_mappings::Column::UserId.eq(user_id));
    if let Some(id) = exclude {
        query = query.filter(okr_user_mappings::Column::Id.ne(id));
    }
    if query.one(&state.db).await?.is_some() {
        return Err(AppError::conflict("The fields okr, user must make a unique set."));
    }
    Ok(())
}

/// Lists mappings, filtered by `okr_id` and/or `user_id`.
pub async fn list_mappings(state: &AppState, query: MappingListQuery) -> Result<Json<Vec<MappingResponse>>> {
    let okr_id = parse_id_param("okr_id", query.okr_id.as_deref())?;
    let user_id = parse_id_param("user_id", query.user_id.as_deref())?;

    let mut select = OkrUserMappings::find().order_by_asc(okr_user_mappings::Column::Id);
    if let Some(okr_id) = okr_id {
        select = select.filter(okr_user_mappings::Column::OkrId.eq(okr_id));
    }
    if let Some(user_id) = user_id {
        select = select.filter(okr_user_mappings::Column::UserId.eq(user_id));
    }
    let rows = select.all(&state.db).await?;

    debug!(count = rows.len(), okr_id = ?okr_id, user_id = ?user_id, "Listed OKR user mappings");
    Ok(Json(projection::mapping_views(&state.db, rows).await?))
}

pub async fn get_mapping(state: &AppState, id: i32) -> Result<Json<MappingResponse>> {
    let mapping = find_or_404::<OkrUserMappings, _>(&state.db, id, "Mapping not found").await?;
    Ok(Json(render(state, mapping).await?))
}

pub async fn create_mapping(state: &AppState, req: CreateMappingRequest) -> Result<Json<MappingResponse>> {
    find_or_404::<Okrs, _>(&state.db, req.okr, "OKR not found").await?;
    find_or_404::<Users, _>(&state.db, req.user, "User not found").await?;
    ensure_pair_free(state, req.okr, req.user, None).await?;

    let mapping = okr_user_mappings::ActiveModel {
        okr_id: Set(req.okr),
        user_id: Set(req.user),
        is_primary: Set(req.is_primary),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(mapping_id = mapping.id, okr_id = req.okr, user_id = req.user, "OKR user mapping created");
    Ok(Json(render(state, mapping).await?))
}

pub async fn update_mapping(state: &AppState, id: i32, req: UpdateMappingRequest) -> Result<Json<MappingResponse>> {
    let mapping = find_or_404::<OkrUserMappings, _>(&state.db, id, "Mapping not found").await?;

    if let Some(okr_id) = req.okr {
        find_or_404::<Okrs, _>(&state.db, okr_id, "OKR not found").await?;
    }
    if let Some(user_id) = req.user {
        find_or_404::<Users, _>(&state.db, user_id, "User not found").await?;
    }
    ensure_pair_free(
        state,
        req.okr.unwrap_or(mapping.okr_id),
        req.user.unwrap_or(mapping.user_id),
        Some(id),
    )
    .await?;

    let mut active: okr_user_mappings::ActiveModel = mapping.clone().into();
    if let Some(okr_id) = req.okr {
        active.okr_id = Set(okr_id);
    }
    if let Some(user_id) = req.user {
        active.user_id = Set(user_id);
    }
    if let Some(is_primary) = req.is_primary {
        active.is_primary = Set(is_primary);
    }

    let mapping = if active.is_changed() {
        active.update(&state.db).await?
    }
    else {
        mapping
    };

    info!(mapping_id = id, is_primary = mapping.is_primary, "OKR user mapping updated");
    Ok(Json(render(state, mapping).await?))
}

pub async fn delete_mapping(state: &AppState, id: i32) -> Result<()> {
    find_or_404::<OkrUserMappings, _>(&state.db, id, "Mapping not found").await?;
    OkrUserMappings::delete_by_id(id).exec(&state.db).await?;
    info!(mapping_id = id, "OKR user mapping deleted");
    Ok(())
}
