//! # Task Challenge Handlers

use axum::Json;
use chrono::Utc;
use entity::{task_challenges, TaskChallenges, Tasks};
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::{debug, info};
use validator::Validate;

use super::find_or_404;
use crate::{
    dto::{
        challenge_status,
        parse_id_param,
        task_challenges::{ChallengeListQuery, ChallengeResponse, CreateChallengeRequest, UpdateChallengeRequest},
    },
    projection,
    AppState,
};

/// Lists challenges. `task_id` and `status` filters combine.
pub async fn list_challenges(state: &AppState, query: ChallengeListQuery) -> Result<Json<Vec<ChallengeResponse>>> {
    let task_id = parse_id_param("task_id", query.task_id.as_deref())?;
    let status = parse_id_param("status", query.status.as_deref())?;

    let mut select = TaskChallenges::find().order_by_asc(task_challenges::Column::Id);
    if let Some(task_id) = task_id {
        select = select.filter(task_challenges::Column::TaskId.eq(task_id));
    }
    if let Some(status) = status {
        select = select.filter(task_challenges::Column::Status.eq(status));
    }
    let rows = select.all(&state.db).await?;

    debug!(count = rows.len(), task_id = ?task_id, status = ?status, "Listed task challenges");
    Ok(Json(projection::challenge_views(&state.db, rows).await?))
}

/// Challenges of one task. `task_id` is mandatory here.
pub async fn challenges_by_task(state: &AppState, query: ChallengeListQuery) -> Result<Json<Vec<ChallengeResponse>>> {
    let task_id = parse_id_param("task_id", query.task_id.as_deref())?
        .ok_or_else(|| AppError::bad_request("task_id parameter is required"))?;

    let rows = TaskChallenges::find()
        .filter(task_challenges::Column::TaskId.eq(task_id))
        .order_by_asc(task_challenges::Column::Id)
        .all(&state.db)
        .await?;

    debug!(count = rows.len(), task_id, "Listed challenges for task");
    Ok(Json(projection::challenge_views(&state.db, rows).await?))
}

pub async fn get_challenge(state: &AppState, id: i32) -> Result<Json<ChallengeResponse>> {
    let challenge = find_or_404::<TaskChallenges, _>(&state.db, id, "Task challenge not found").await?;
    let task = find_or_404::<Tasks, _>(&state.db, challenge.task_id, "Task not found").await?;
    Ok(Json(projection::challenge_response(challenge, &task.title)))
}

pub async fn create_challenge(state: &AppState, req: CreateChallengeRequest) -> Result<Json<ChallengeResponse>> {
    req.validate()?;
    let task = find_or_404::<Tasks, _>(&state.db, req.task, "Task not found").await?;

    let now = Utc::now();
    let challenge = task_challenges::ActiveModel {
        task_id: Set(task.task_id),
        challenge_name: Set(req.challenge_name),
        status: Set(challenge_status(req.status)?),
        due_date: Set(req.due_date),
        remarks: Set(req.remarks),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(challenge_id = challenge.id, task_id = task.task_id, "Task challenge created");
    Ok(Json(projection::challenge_response(challenge, &task.title)))
}

pub async fn update_challenge(
    state: &AppState,
    id: i32,
    req: UpdateChallengeRequest,
) -> Result<Json<ChallengeResponse>> {
    req.validate()?;
    let challenge = find_or_404::<TaskChallenges, _>(&state.db, id, "Task challenge not found").await?;
    let task_id = req.task.unwrap_or(challenge.task_id);
    let task = find_or_404::<Tasks, _>(&state.db, task_id, "Task not found").await?;

    let mut active: task_challenges::ActiveModel = challenge.clone().into();
    if let Some(task_id) = req.task {
        active.task_id = Set(task_id);
    }
    if let Some(name) = req.challenge_name {
        active.challenge_name = Set(name);
    }
    if let Some(status) = req.status {
        active.status = Set(challenge_status(status)?);
    }
    if let Some(due_date) = req.due_date {
        active.due_date = Set(due_date);
    }
    if let Some(remarks) = req.remarks {
        active.remarks = Set(remarks);
    }

    let challenge = if active.is_changed() {
        active.updated_at = Set(Utc::now());
        active.update(&state.db).await?
    }
    else {
        challenge
    };

    info!(challenge_id = id, status = %challenge.status, "Task challenge updated");
    Ok(Json(projection::challenge_response(challenge, &task.title)))
}

pub async fn delete_challenge(state: &AppState, id: i32) -> Result<()> {
    find_or_404::<TaskChallenges, _>(&state.db, id, "Task challenge not found").await?;
    TaskChallenges::delete_by_id(id).exec(&state.db).await?;
    info!(challenge_id = id, "Task challenge deleted");
    Ok(())
}
