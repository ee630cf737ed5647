//! # Query/Projection Layer
//!
//! Builds outbound representations that span several tables: OKRs with their
//! assigned users and business units, tasks with their challenges, challenges
//! with their synthesised names and mappings with a user summary. Related rows
//! are loaded in batches, one query per table.

use std::collections::HashMap;

use entity::{
    business_unit_okr_mappings,
    business_units,
    okr_user_mappings,
    okrs,
    task_challenges,
    tasks,
    users,
    BusinessUnitOkrMappings,
    BusinessUnits,
    OkrUserMappings,
    TaskChallenges,
    Tasks,
    Users,
};
use error::Result;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use tracing::warn;

use crate::dto::{
    business_units::BusinessUnitResponse,
    okr_user_mappings::MappingResponse,
    okrs::{AssignedUserView, OkrResponse},
    progress_display,
    task_challenges::ChallengeResponse,
    tasks::TaskResponse,
    users::UserSummary,
};

async fn users_by_id<C>(db: &C, ids: impl IntoIterator<Item = i32>) -> Result<HashMap<i32, users::Model>>
where
    C: ConnectionTrait,
{
    let mut ids: Vec<i32> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    Ok(Users::find()
        .filter(users::Column::UserId.is_in(ids))
        .all(db)
        .await?
        .into_iter()
        .map(|u| (u.user_id, u))
        .collect())
}

/// Assigned-users views for each of `okr_ids`, in mapping order.
async fn assigned_users_by_okr<C>(db: &C, okr_ids: &[i32]) -> Result<HashMap<i32, Vec<AssignedUserView>>>
where
    C: ConnectionTrait,
{
    if okr_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let mappings = OkrUserMappings::find()
        .filter(okr_user_mappings::Column::OkrId.is_in(okr_ids.iter().copied()))
        .order_by_asc(okr_user_mappings::Column::Id)
        .all(db)
        .await?;
    let users = users_by_id(db, mappings.iter().map(|m| m.user_id)).await?;

    let mut views: HashMap<i32, Vec<AssignedUserView>> = HashMap::new();
    for mapping in mappings {
        if let Some(user) = users.get(&mapping.user_id) {
            views.entry(mapping.okr_id).or_default().push(AssignedUserView {
                user_id:    user.user_id,
                name:       user.name.clone(),
                is_primary: mapping.is_primary,
            });
        }
    }
    Ok(views)
}

/// Business units linked to each of `okr_ids`, ordered by business unit id.
async fn business_units_by_okr<C>(db: &C, okr_ids: &[i32]) -> Result<HashMap<i32, Vec<BusinessUnitResponse>>>
where
    C: ConnectionTrait,
{
    if okr_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let mappings = BusinessUnitOkrMappings::find()
        .filter(business_unit_okr_mappings::Column::OkrId.is_in(okr_ids.iter().copied()))
        .order_by_asc(business_unit_okr_mappings::Column::BusinessUnitId)
        .all(db)
        .await?;
    if mappings.is_empty() {
        return Ok(HashMap::new());
    }

    let units: HashMap<i32, business_units::Model> = BusinessUnits::find()
        .filter(business_units::Column::BusinessUnitId.is_in(mappings.iter().map(|m| m.business_unit_id)))
        .all(db)
        .await?
        .into_iter()
        .map(|bu| (bu.business_unit_id, bu))
        .collect();

    let mut views: HashMap<i32, Vec<BusinessUnitResponse>> = HashMap::new();
    for mapping in mappings {
        if let Some(unit) = units.get(&mapping.business_unit_id) {
            views
                .entry(mapping.okr_id)
                .or_default()
                .push(BusinessUnitResponse::from(unit.clone()));
        }
    }
    Ok(views)
}

/// Users assigned to one OKR with their primary flag.
pub async fn assigned_users<C>(db: &C, okr_id: i32) -> Result<Vec<AssignedUserView>>
where
    C: ConnectionTrait,
{
    Ok(assigned_users_by_okr(db, &[okr_id])
        .await?
        .remove(&okr_id)
        .unwrap_or_default())
}

/// Business units reachable from one OKR through its mappings.
pub async fn business_units<C>(db: &C, okr_id: i32) -> Result<Vec<BusinessUnitResponse>>
where
    C: ConnectionTrait,
{
    Ok(business_units_by_okr(db, &[okr_id])
        .await?
        .remove(&okr_id)
        .unwrap_or_default())
}

pub async fn okr_views<C>(db: &C, okrs: Vec<okrs::Model>) -> Result<Vec<OkrResponse>>
where
    C: ConnectionTrait,
{
    let ids: Vec<i32> = okrs.iter().map(|o| o.okr_id).collect();
    let mut users = assigned_users_by_okr(db, &ids).await?;
    let mut units = business_units_by_okr(db, &ids).await?;

    Ok(okrs
        .into_iter()
        .map(|okr| {
            OkrResponse {
                assigned_users_details: users.remove(&okr.okr_id).unwrap_or_default(),
                business_units:         units.remove(&okr.okr_id).unwrap_or_default(),
                okr_id:                 okr.okr_id,
                name:                   okr.name,
                description:            okr.description,
                assumptions:            okr.assumptions,
                parent_okr:             okr.parent_okr_id,
                department:             okr.department_id,
                start_date:             okr.start_date,
                due_date:               okr.due_date,
                status:                 okr.status,
                progress_percent:       progress_display(okr.progress_percent),
                is_measurable:          okr.is_measurable,
            }
        })
        .collect())
}

pub async fn okr_view<C>(db: &C, okr: okrs::Model) -> Result<OkrResponse>
where
    C: ConnectionTrait,
{
    let okr_id = okr.okr_id;
    okr_views(db, vec![okr])
        .await?
        .pop()
        .ok_or_else(|| error::AppError::internal(format!("OKR {} vanished while rendering", okr_id)))
}

/// Renders one challenge given the title of its task.
pub fn challenge_response(challenge: task_challenges::Model, task_title: &str) -> ChallengeResponse {
    ChallengeResponse {
        challenge_name: challenge.display_name(task_title),
        id:             challenge.id,
        task:           challenge.task_id,
        status:         challenge.status.code(),
        status_display: challenge.status.label().to_string(),
        due_date:       challenge.due_date,
        remarks:        challenge.remarks,
        created_at:     challenge.created_at,
        updated_at:     challenge.updated_at,
    }
}

pub async fn challenge_views<C>(db: &C, challenges: Vec<task_challenges::Model>) -> Result<Vec<ChallengeResponse>>
where
    C: ConnectionTrait,
{
    let mut task_ids: Vec<i32> = challenges.iter().map(|c| c.task_id).collect();
    task_ids.sort_unstable();
    task_ids.dedup();

    let titles: HashMap<i32, String> = if task_ids.is_empty() {
        HashMap::new()
    }
    else {
        Tasks::find()
            .filter(tasks::Column::TaskId.is_in(task_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|t| (t.task_id, t.title))
            .collect()
    };

    Ok(challenges
        .into_iter()
        .map(|c| {
            let title = titles.get(&c.task_id).map(String::as_str).unwrap_or_default();
            challenge_response(c, title)
        })
        .collect())
}

pub async fn task_views<C>(db: &C, tasks: Vec<tasks::Model>) -> Result<Vec<TaskResponse>>
where
    C: ConnectionTrait,
{
    let ids: Vec<i32> = tasks.iter().map(|t| t.task_id).collect();
    let mut challenges: HashMap<i32, Vec<task_challenges::Model>> = HashMap::new();
    if !ids.is_empty() {
        for challenge in TaskChallenges::find()
            .filter(task_challenges::Column::TaskId.is_in(ids))
            .order_by_asc(task_challenges::Column::Id)
            .all(db)
            .await?
        {
            challenges.entry(challenge.task_id).or_default().push(challenge);
        }
    }

    Ok(tasks
        .into_iter()
        .map(|task| {
            let rendered = challenges
                .remove(&task.task_id)
                .unwrap_or_default()
                .into_iter()
                .map(|c| challenge_response(c, &task.title))
                .collect();
            TaskResponse {
                challenges:       rendered,
                task_id:          task.task_id,
                title:            task.title,
                description:      task.description,
                start_date:       task.start_date,
                due_date:         task.due_date,
                status:           task.status.code(),
                status_display:   task.status.label().to_string(),
                assigned_to:      task.assigned_to_id,
                linked_to_okr:    task.linked_to_okr_id,
                progress_percent: progress_display(task.progress_percent),
            }
        })
        .collect())
}

pub async fn task_view<C>(db: &C, task: tasks::Model) -> Result<TaskResponse>
where
    C: ConnectionTrait,
{
    let task_id = task.task_id;
    task_views(db, vec![task])
        .await?
        .pop()
        .ok_or_else(|| error::AppError::internal(format!("Task {} vanished while rendering", task_id)))
}

pub async fn mapping_views<C>(db: &C, mappings: Vec<okr_user_mappings::Model>) -> Result<Vec<MappingResponse>>
where
    C: ConnectionTrait,
{
    let users = users_by_id(db, mappings.iter().map(|m| m.user_id)).await?;

    Ok(mappings
        .into_iter()
        .filter_map(|mapping| {
            let Some(user) = users.get(&mapping.user_id)
            else {
                warn!(mapping_id = mapping.id, user_id = mapping.user_id, "Mapping references a missing user");
                return None;
            };
            Some(MappingResponse {
                id:           mapping.id,
                okr:          mapping.okr_id,
                user:         mapping.user_id,
                is_primary:   mapping.is_primary,
                created_at:   mapping.created_at,
                user_details: UserSummary::from(user.clone()),
            })
        })
        .collect())
}
