//! # Mapping Reconcilers
//!
//! Replace-all reconciliation of an OKR's user and business unit mappings:
//! every existing mapping of the OKR is deleted, then one row is inserted per
//! requested id. Both steps run in one transaction. Ids that do not resolve
//! are skipped without failing the rest.

use std::collections::HashSet;

use chrono::Utc;
use entity::{business_unit_okr_mappings, business_units, okr_user_mappings, BusinessUnitOkrMappings, BusinessUnits, OkrUserMappings, Users};
use error::Result;
use sea_orm::{
    ActiveModelTrait,
    ColumnTrait,
    ConnectionTrait,
    EntityTrait,
    QueryFilter,
    QueryOrder,
    QuerySelect,
    Set,
    TransactionTrait,
};
use tracing::info;

use crate::dto::okrs::UserAssignmentInput;

/// A planned (user, primary flag) mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserAssignment {
    pub user_id:    i32,
    pub is_primary: bool,
}

/// Removes repeated ids, keeping each id at its first position.
fn dedup_ids(ids: &[i32]) -> Vec<i32> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Plans the mapping rows for `user_ids`.
///
/// With an explicit `primary`, the entry equal to it is primary (none is, if
/// it is not in the list). Without one, the first entry is primary.
pub fn plan_user_assignments(user_ids: &[i32], primary: Option<i32>) -> Vec<UserAssignment> {
    let ids = dedup_ids(user_ids);
    let primary = primary.or_else(|| ids.first().copied());
    ids.into_iter()
        .map(|user_id| {
            UserAssignment {
                user_id,
                is_primary: Some(user_id) == primary,
            }
        })
        .collect()
}

/// Reads an `assign_users` body into ordered ids and the explicit primary.
///
/// Elements that are not objects with an integer `user_id` are skipped. The
/// explicit primary is the first element flagged `is_primary: true`.
pub fn parse_bulk_assignments(items: &[serde_json::Value]) -> (Vec<i32>, Option<i32>) {
    let inputs: Vec<(i32, bool)> = items
        .iter()
        .filter_map(|item| serde_json::from_value::<UserAssignmentInput>(item.clone()).ok())
        .filter_map(|input| input.user_id.map(|id| (id, input.is_primary == Some(true))))
        .collect();

    let ids = inputs.iter().map(|(id, _)| *id).collect();
    let primary = inputs
        .iter()
        .find(|(_, flagged)| *flagged)
        .map(|(id, _)| *id);

    (ids, primary)
}

/// Keeps only the integer elements of an `assign_business_units` body.
pub fn parse_business_unit_ids(items: &[serde_json::Value]) -> Vec<i32> {
    items
        .iter()
        .filter_map(|item| item.as_i64())
        .filter_map(|id| i32::try_from(id).ok())
        .collect()
}

/// Replaces the user mappings of `okr_id`. Returns the rows created, in input
/// order.
pub async fn replace_assigned_users<C>(
    db: &C,
    okr_id: i32,
    user_ids: &[i32],
    primary: Option<i32>,
) -> Result<Vec<okr_user_mappings::Model>>
where
    C: ConnectionTrait + TransactionTrait,
{
    let plan = plan_user_assignments(user_ids, primary);
    let txn = db.begin().await?;

    let removed = OkrUserMappings::delete_many()
        .filter(okr_user_mappings::Column::OkrId.eq(okr_id))
        .exec(&txn)
        .await?
        .rows_affected;

    let known: HashSet<i32> = if plan.is_empty() {
        HashSet::new()
    }
    else {
        Users::find()
            .select_only()
            .column(entity::users::Column::UserId)
            .filter(entity::users::Column::UserId.is_in(plan.iter().map(|a| a.user_id)))
            .into_tuple::<i32>()
            .all(&txn)
            .await?
            .into_iter()
            .collect()
    };

    let now = Utc::now();
    let mut created = Vec::with_capacity(plan.len());
    for assignment in plan.iter().filter(|a| known.contains(&a.user_id)) {
        let row = okr_user_mappings::ActiveModel {
            okr_id: Set(okr_id),
            user_id: Set(assignment.user_id),
            is_primary: Set(assignment.is_primary),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        created.push(row);
    }

    txn.commit().await?;

    info!(
        okr_id,
        removed,
        assigned = created.len(),
        skipped = plan.len() - created.len(),
        "OKR user assignments replaced"
    );

    Ok(created)
}

/// Replaces the business unit mappings of `okr_id`. Returns the business
/// units now linked, ordered by id.
pub async fn replace_business_units<C>(db: &C, okr_id: i32, business_unit_ids: &[i32]) -> Result<Vec<business_units::Model>>
where
    C: ConnectionTrait + TransactionTrait,
{
    let ids = dedup_ids(business_unit_ids);
    let txn = db.begin().await?;

    let removed = BusinessUnitOkrMappings::delete_many()
        .filter(business_unit_okr_mappings::Column::OkrId.eq(okr_id))
        .exec(&txn)
        .await?
        .rows_affected;

    let units = if ids.is_empty() {
        Vec::new()
    }
    else {
        BusinessUnits::find()
            .filter(business_units::Column::BusinessUnitId.is_in(ids.iter().copied()))
            .order_by_asc(business_units::Column::BusinessUnitId)
            .all(&txn)
            .await?
    };

    for unit in &units {
        business_unit_okr_mappings::ActiveModel {
            okr_id: Set(okr_id),
            business_unit_id: Set(unit.business_unit_id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    info!(
        okr_id,
        removed,
        linked = units.len(),
        skipped = ids.len() - units.len(),
        "OKR business units replaced"
    );

    Ok(units)
}
