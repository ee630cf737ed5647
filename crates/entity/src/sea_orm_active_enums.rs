//! Status enumerations shared by entities.
//!
//! Task and challenge statuses are integer-coded on the wire and in storage;
//! the integer/label tables must not change.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Task progress status.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(into = "i32", try_from = "i32")]
pub enum TaskStatus {
    #[sea_orm(num_value = 0)]
    Completed,
    #[sea_orm(num_value = 1)]
    InProgress,
    #[sea_orm(num_value = 2)]
    Hold,
    #[sea_orm(num_value = 3)]
    Delayed,
    #[default]
    #[sea_orm(num_value = 4)]
    YetToStart,
}

impl TaskStatus {
    /// Integer code used in storage and on the wire.
    pub fn code(self) -> i32 {
        match self {
            TaskStatus::Completed => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::Hold => 2,
            TaskStatus::Delayed => 3,
            TaskStatus::YetToStart => 4,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Completed => "Completed",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Hold => "Hold",
            TaskStatus::Delayed => "Delayed",
            TaskStatus::YetToStart => "Yet to Start",
        }
    }
}

impl TryFrom<i32> for TaskStatus {
    type Error = i32;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(TaskStatus::Completed),
            1 => Ok(TaskStatus::InProgress),
            2 => Ok(TaskStatus::Hold),
            3 => Ok(TaskStatus::Delayed),
            4 => Ok(TaskStatus::YetToStart),
            other => Err(other),
        }
    }
}

impl From<TaskStatus> for i32 {
    fn from(status: TaskStatus) -> Self { status.code() }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.label()) }
}

/// Task challenge status.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(into = "i32", try_from = "i32")]
pub enum ChallengeStatus {
    #[default]
    #[sea_orm(num_value = 0)]
    YetToStart,
    #[sea_orm(num_value = 1)]
    Active,
    #[sea_orm(num_value = 2)]
    Discarded,
    #[sea_orm(num_value = 3)]
    Resolved,
}

impl ChallengeStatus {
    /// Integer code used in storage and on the wire.
    pub fn code(self) -> i32 {
        match self {
            ChallengeStatus::YetToStart => 0,
            ChallengeStatus::Active => 1,
            ChallengeStatus::Discarded => 2,
            ChallengeStatus::Resolved => 3,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            ChallengeStatus::YetToStart => "Yet to Start",
            ChallengeStatus::Active => "Active",
            ChallengeStatus::Discarded => "Discarded",
            ChallengeStatus::Resolved => "Resolved",
        }
    }
}

impl TryFrom<i32> for ChallengeStatus {
    type Error = i32;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ChallengeStatus::YetToStart),
            1 => Ok(ChallengeStatus::Active),
            2 => Ok(ChallengeStatus::Discarded),
            3 => Ok(ChallengeStatus::Resolved),
            other => Err(other),
        }
    }
}

impl From<ChallengeStatus> for i32 {
    fn from(status: ChallengeStatus) -> Self { status.code() }
}

impl std::fmt::Display for ChallengeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.label()) }
}

/// User account status enumeration
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Account is active
    #[default]
    #[sea_orm(string_value = "active")]
    Active,
    /// Account is inactive
    #[sea_orm(string_value = "inactive")]
    Inactive,
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Inactive => write!(f, "inactive"),
        }
    }
}
