//! # Task Data Transfer Objects

use chrono::NaiveDate;
use entity::sea_orm_active_enums::TaskStatus;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::task_challenges::ChallengeResponse;

fn default_task_status() -> i32 { TaskStatus::default().code() }

/// Request to create (or fully replace) a task
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title:            String,
    #[validate(length(min = 1, message = "Description must not be blank"))]
    pub description:      String,
    pub start_date:       NaiveDate,
    pub due_date:         NaiveDate,
    /// Integer status code, `4` (Yet to Start) when omitted
    #[serde(default = "default_task_status")]
    #[validate(custom(function = "super::validate_task_status"))]
    pub status:           i32,
    /// Assignee user id
    pub assigned_to:      i32,
    pub linked_to_okr:    i32,
    #[validate(custom(function = "super::validate_progress"))]
    pub progress_percent: Decimal,
}

/// Request to partially update a task
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title:            Option<String>,
    #[validate(length(min = 1, message = "Description must not be blank"))]
    pub description:      Option<String>,
    pub start_date:       Option<NaiveDate>,
    pub due_date:         Option<NaiveDate>,
    #[validate(custom(function = "super::validate_task_status"))]
    pub status:           Option<i32>,
    pub assigned_to:      Option<i32>,
    pub linked_to_okr:    Option<i32>,
    #[validate(custom(function = "super::validate_progress"))]
    pub progress_percent: Option<Decimal>,
}

impl From<CreateTaskRequest> for UpdateTaskRequest {
    fn from(req: CreateTaskRequest) -> Self {
        Self {
            title:            Some(req.title),
            description:      Some(req.description),
            start_date:       Some(req.start_date),
            due_date:         Some(req.due_date),
            status:           Some(req.status),
            assigned_to:      Some(req.assigned_to),
            linked_to_okr:    Some(req.linked_to_okr),
            progress_percent: Some(req.progress_percent),
        }
    }
}

/// Task as returned by the API, with its challenges inlined
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResponse {
    pub task_id:          i32,
    pub title:            String,
    pub description:      String,
    pub start_date:       NaiveDate,
    pub due_date:         NaiveDate,
    pub status:           i32,
    pub status_display:   String,
    pub assigned_to:      i32,
    pub linked_to_okr:    i32,
    pub progress_percent: Decimal,
    pub challenges:       Vec<ChallengeResponse>,
}

/// Query parameters of the task listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskListQuery {
    pub linked_to_okr: Option<String>,
}
