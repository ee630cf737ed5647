//! # Resource Handlers
//!
//! One module per collection. Handlers take `&AppState` plus the already
//! extracted request, validate it, check that referenced records exist, and
//! only then write.

pub mod business_units;
pub mod departments;
pub mod okr_user_mappings;
pub mod okrs;
pub mod task_challenges;
pub mod tasks;
pub mod users;

use error::{AppError, Result};
use sea_orm::{ConnectionTrait, EntityTrait, PrimaryKeyTrait};

/// Fetches a record by primary key or fails with `NotFound(message)`.
pub(crate) async fn find_or_404<E, C>(
    db: &C,
    id: <E::PrimaryKey as PrimaryKeyTrait>::ValueType,
    message: &str,
) -> Result<E::Model>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    E::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found(message))
}
