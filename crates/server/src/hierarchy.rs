//! # Hierarchy Assigner
//!
//! Users form a manager tree. Each user stores a materialized path
//! (`/3/17/42`) computed once, when the user is created, from the manager's
//! path at that moment. Later manager changes do not rewrite any path.

use entity::{users, Users};
use error::{AppError, Result};
use sea_orm::{
    sea_query::Expr,
    ActiveModelTrait,
    ColumnTrait,
    ConnectionTrait,
    EntityTrait,
    QueryFilter,
    TransactionTrait,
};
use tracing::info;

/// Looks up the current path of `manager_id`.
///
/// Returns `NotFound` when the manager does not exist.
pub async fn manager_path<C>(db: &C, manager_id: Option<i32>) -> Result<Option<String>>
where
    C: ConnectionTrait,
{
    let Some(manager_id) = manager_id
    else {
        return Ok(None);
    };

    let manager = Users::find_by_id(manager_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("Manager not found"))?;

    Ok(Some(manager.hierarchy_path))
}

/// Inserts a new user and assigns its hierarchy path.
///
/// The manager is resolved before anything is written. The insert and the
/// path update share one transaction, so no user is ever visible without a
/// path.
pub async fn insert_user<C>(db: &C, user: users::ActiveModel, manager_id: Option<i32>) -> Result<users::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;

    let parent_path = manager_path(&txn, manager_id).await?;
    let created = user.insert(&txn).await?;
    let path = users::child_path(parent_path.as_deref(), created.user_id);

    Users::update_many()
        .col_expr(users::Column::HierarchyPath, Expr::value(path.clone()))
        .filter(users::Column::UserId.eq(created.user_id))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    info!(user_id = created.user_id, hierarchy_path = %path, "User created");

    Ok(users::Model {
        hierarchy_path: path,
        ..created
    })
}

/// Clears `manager_id` on the direct reports of `manager_id`. Their paths
/// are left as they are.
pub async fn detach_subordinates<C>(db: &C, manager_id: i32) -> Result<u64>
where
    C: ConnectionTrait,
{
    let result = Users::update_many()
        .col_expr(users::Column::ManagerId, Expr::value(Option::<i32>::None))
        .filter(users::Column::ManagerId.eq(manager_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Deletes a user after detaching its subordinates, in one transaction.
pub async fn delete_user<C>(db: &C, user_id: i32) -> Result<()>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;

    Users::find_by_id(user_id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let detached = detach_subordinates(&txn, user_id).await?;
    Users::delete_by_id(user_id).exec(&txn).await?;

    txn.commit().await?;

    info!(user_id, detached_subordinates = detached, "User deleted");
    Ok(())
}
