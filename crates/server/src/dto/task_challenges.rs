//! # Task Challenge Data Transfer Objects

use chrono::{DateTime, NaiveDate, Utc};
use entity::sea_orm_active_enums::ChallengeStatus;
use serde::{Deserialize, Serialize};
use validator::Validate;

fn default_challenge_status() -> i32 { ChallengeStatus::default().code() }

/// Request to create (or fully replace) a task challenge
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CreateChallengeRequest {
    pub task:           i32,
    /// May be blank; a label is synthesised from the task title on output
    #[serde(default)]
    #[validate(length(max = 200, message = "Challenge name must not exceed 200 characters"))]
    pub challenge_name: String,
    #[serde(default = "default_challenge_status")]
    #[validate(custom(function = "super::validate_challenge_status"))]
    pub status:         i32,
    pub due_date:       NaiveDate,
    #[validate(length(min = 1, max = 255, message = "Remarks must be between 1 and 255 characters"))]
    pub remarks:        String,
}

/// Request to partially update a task challenge
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct UpdateChallengeRequest {
    pub task:           Option<i32>,
    #[validate(length(max = 200, message = "Challenge name must not exceed 200 characters"))]
    pub challenge_name: Option<String>,
    #[validate(custom(function = "super::validate_challenge_status"))]
    pub status:         Option<i32>,
    pub due_date:       Option<NaiveDate>,
    #[validate(length(min = 1, max = 255, message = "Remarks must be between 1 and 255 characters"))]
    pub remarks:        Option<String>,
}

impl From<CreateChallengeRequest> for UpdateChallengeRequest {
    fn from(req: CreateChallengeRequest) -> Self {
        Self {
            task:           Some(req.task),
            challenge_name: Some(req.challenge_name),
            status:         Some(req.status),
            due_date:       Some(req.due_date),
            remarks:        Some(req.remarks),
        }
    }
}

/// Task challenge as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeResponse {
    pub id:             i32,
    pub task:           i32,
    pub challenge_name: String,
    pub status:         i32,
    pub status_display: String,
    pub due_date:       NaiveDate,
    pub remarks:        String,
    pub created_at:     DateTime<Utc>,
    pub updated_at:     DateTime<Utc>,
}

/// Query parameters of the challenge listing and of `by_task`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChallengeListQuery {
    pub task_id: Option<String>,
    pub status:  Option<String>,
}
