//! # Task Handlers

use axum::Json;
use entity::{tasks, Okrs, Tasks, Users};
use error::Result;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::{debug, info};
use validator::Validate;

use super::find_or_404;
use crate::{
    dto::{
        parse_id_param,
        task_status,
        tasks::{CreateTaskRequest, TaskListQuery, TaskResponse, UpdateTaskRequest},
    },
    projection,
    AppState,
};

async fn check_references<C>(db: &C, assigned_to: Option<i32>, linked_to_okr: Option<i32>) -> Result<()>
where
    C: ConnectionTrait,
{
    if let Some(user_id) = assigned_to {
        find_or_404::<Users, _>(db, user_id, "Assigned user not found").await?;
    }
    if let Some(okr_id) = linked_to_okr {
        find_or_404::<Okrs, _>(db, okr_id, "Linked OKR not found").await?;
    }
    Ok(())
}

/// Lists tasks, restricted to one OKR when `linked_to_okr` is given.
pub async fn list_tasks(state: &AppState, query: TaskListQuery) -> Result<Json<Vec<TaskResponse>>> {
    let linked_to_okr = parse_id_param("linked_to_okr", query.linked_to_okr.as_deref())?;

    let mut select = Tasks::find().order_by_asc(tasks::Column::TaskId);
    if let Some(okr_id) = linked_to_okr {
        select = select.filter(tasks::Column::LinkedToOkrId.eq(okr_id));
    }
    let rows = select.all(&state.db).await?;

    debug!(count = rows.len(), linked_to_okr = ?linked_to_okr, "Listed tasks");
    Ok(Json(projection::task_views(&state.db, rows).await?))
}

pub async fn get_task(state: &AppState, id: i32) -> Result<Json<TaskResponse>> {
    let task = find_or_404::<Tasks, _>(&state.db, id, "Task not found").await?;
    Ok(Json(projection::task_view(&state.db, task).await?))
}

pub async fn create_task(state: &AppState, req: CreateTaskRequest) -> Result<Json<TaskResponse>> {
    req.validate()?;
    check_references(&state.db, Some(req.assigned_to), Some(req.linked_to_okr)).await?;

    let task = tasks::ActiveModel {
        title: Set(req.title),
        description: Set(req.description),
        start_date: Set(req.start_date),
        due_date: Set(req.due_date),
        status: Set(task_status(req.status)?),
        assigned_to_id: Set(req.assigned_to),
        linked_to_okr_id: Set(req.linked_to_okr),
        progress_percent: Set(req.progress_percent),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(
        task_id = task.task_id,
        okr_id = task.linked_to_okr_id,
        assigned_to = task.assigned_to_id,
        "Task created"
    );
    Ok(Json(projection::task_view(&state.db, task).await?))
}

pub async fn update_task(state: &AppState, id: i32, req: UpdateTaskRequest) -> Result<Json<TaskResponse>> {
    req.validate()?;
    let task = find_or_404::<Tasks, _>(&state.db, id, "Task not found").await?;
    check_references(&state.db, req.assigned_to, req.linked_to_okr).await?;

    let mut active: tasks::ActiveModel = task.clone().into();
    if let Some(title) = req.title {
        active.title = Set(title);
    }
    if let Some(description) = req.description {
        active.description = Set(description);
    }
    if let Some(start_date) = req.start_date {
        active.start_date = Set(start_date);
    }
    if let Some(due_date) = req.due_date {
        active.due_date = Set(due_date);
    }
    if let Some(status) = req.status {
        active.status = Set(task_status(status)?);
    }
    if let Some(assigned_to) = req.assigned_to {
        active.assigned_to_id = Set(assigned_to);
    }
    if let Some(okr_id) = req.linked_to_okr {
        active.linked_to_okr_id = Set(okr_id);
    }
    if let Some(progress) = req.progress_percent {
        active.progress_percent = Set(progress);
    }

    let task = if active.is_changed() {
        active.update(&state.db).await?
    }
    else {
        task
    };

    info!(task_id = id, status = %task.status, "Task updated");
    Ok(Json(projection::task_view(&state.db, task).await?))
}

/// Deletes a task; its challenges are removed by the cascade.
pub async fn delete_task(state: &AppState, id: i32) -> Result<()> {
    find_or_404::<Tasks, _>(&state.db, id, "Task not found").await?;
    Tasks::delete_by_id(id).exec(&state.db).await?;
    info!(task_id = id, "Task deleted");
    Ok(())
}
