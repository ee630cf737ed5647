//! # Business Unit Handlers

use axum::Json;
use entity::{business_unit_okr_mappings, business_units, BusinessUnitOkrMappings, BusinessUnits};
use error::Result;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait};
use tracing::{debug, info};
use validator::Validate;

use super::find_or_404;
use crate::{
    dto::business_units::{BusinessUnitResponse, CreateBusinessUnitRequest, UpdateBusinessUnitRequest},
    AppState,
};

pub async fn list_business_units(state: &AppState) -> Result<Json<Vec<BusinessUnitResponse>>> {
    let rows = BusinessUnits::find()
        .order_by_asc(business_units::Column::BusinessUnitId)
        .all(&state.db)
        .await?;
    debug!(count = rows.len(), "Listed business units");
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn get_business_unit(state: &AppState, id: i32) -> Result<Json<BusinessUnitResponse>> {
    let unit = find_or_404::<BusinessUnits, _>(&state.db, id, "Business unit not found").await?;
    Ok(Json(unit.into()))
}

pub async fn create_business_unit(
    state: &AppState,
    req: CreateBusinessUnitRequest,
) -> Result<Json<BusinessUnitResponse>> {
    req.validate()?;

    let unit = business_units::ActiveModel {
        business_unit_name: Set(req.business_unit_name),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(business_unit_id = unit.business_unit_id, name = %unit.business_unit_name, "Business unit created");
    Ok(Json(unit.into()))
}

pub async fn update_business_unit(
    state: &AppState,
    id: i32,
    req: UpdateBusinessUnitRequest,
) -> Result<Json<BusinessUnitResponse>> {
    req.validate()?;
    let unit = find_or_404::<BusinessUnits, _>(&state.db, id, "Business unit not found").await?;

    let mut active: business_units::ActiveModel = unit.clone().into();
    if let Some(name) = req.business_unit_name {
        active.business_unit_name = Set(name);
    }
    let unit = if active.is_changed() {
        active.update(&state.db).await?
    }
    else {
        unit
    };

    info!(business_unit_id = id, "Business unit updated");
    Ok(Json(unit.into()))
}

/// Deletes a business unit together with its OKR mappings.
pub async fn delete_business_unit(state: &AppState, id: i32) -> Result<()> {
    let txn = state.db.begin().await?;
    find_or_404::<BusinessUnits, _>(&txn, id, "Business unit not found").await?;

    let unlinked = BusinessUnitOkrMappings::delete_many()
        .filter(business_unit_okr_mappings::Column::BusinessUnitId.eq(id))
        .exec(&txn)
        .await?
        .rows_affected;
    BusinessUnits::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    info!(business_unit_id = id, unlinked_okrs = unlinked, "Business unit deleted");
    Ok(())
}
