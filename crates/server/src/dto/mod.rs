//! # Data Transfer Objects Module
//!
//! Request and response types for API endpoints, plus the field rules shared
//! between them.

pub mod business_units;
pub mod departments;
pub mod okr_user_mappings;
pub mod okrs;
pub mod task_challenges;
pub mod tasks;
pub mod users;

use entity::sea_orm_active_enums::{ChallengeStatus, TaskStatus};
use error::{AppError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use validator::ValidationError;

/// Largest progress value representable with five digits and two decimals.
const PROGRESS_LIMIT: i64 = 1000;

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
///
/// Use with `#[serde(default, deserialize_with = "crate::dto::double_option")]`
/// on nullable columns that PATCH may clear.
pub fn double_option<'de, T, D>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Progress is stored as DECIMAL(5, 2).
pub fn validate_progress(value: &Decimal) -> std::result::Result<(), ValidationError> {
    if value.normalize().scale() > 2 {
        return Err(ValidationError::new("decimal_places")
            .with_message("Ensure that there are no more than 2 decimal places.".into()));
    }
    if value.abs() >= Decimal::from(PROGRESS_LIMIT) {
        return Err(
            ValidationError::new("max_digits").with_message("Ensure that there are no more than 5 digits in total.".into())
        );
    }
    Ok(())
}

fn invalid_choice(code: i32) -> ValidationError {
    ValidationError::new("invalid_choice").with_message(format!("\"{}\" is not a valid choice.", code).into())
}

pub fn validate_task_status(code: i32) -> std::result::Result<(), ValidationError> {
    TaskStatus::try_from(code)
        .map(|_| ())
        .map_err(invalid_choice)
}

pub fn validate_challenge_status(code: i32) -> std::result::Result<(), ValidationError> {
    ChallengeStatus::try_from(code)
        .map(|_| ())
        .map_err(invalid_choice)
}

/// Converts an already-validated task status code.
pub fn task_status(code: i32) -> Result<TaskStatus> {
    TaskStatus::try_from(code).map_err(|c| AppError::validation(format!("status: \"{}\" is not a valid choice.", c)))
}

/// Converts an already-validated challenge status code.
pub fn challenge_status(code: i32) -> Result<ChallengeStatus> {
    ChallengeStatus::try_from(code).map_err(|c| AppError::validation(format!("status: \"{}\" is not a valid choice.", c)))
}

/// Parses an optional integer query parameter. Missing or blank values mean
/// "no filter".
pub fn parse_id_param(name: &str, value: Option<&str>) -> Result<Option<i32>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => {
            raw.parse::<i32>()
                .map(Some)
                .map_err(|_| AppError::bad_request(format!("{} must be an integer", name)))
        },
    }
}

/// Progress as it is rendered outbound: always two decimal places.
pub fn progress_display(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp(2);
    rounded.rescale(2);
    rounded
}
