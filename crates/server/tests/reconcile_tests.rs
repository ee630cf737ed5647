//! OKR assignment reconciliation against a real schema.

mod common;

use common::{business_unit, department, okr, okr_request, test_state, UserFixture};
use entity::{okr_user_mappings, OkrUserMappings};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde_json::json;
use server::{
    dto::okrs::{AssignedUserView, UpdateOkrRequest},
    handlers,
    reconcile,
    AppState,
};

async fn three_users(state: &AppState) -> (i32, i32, i32) {
    let a = UserFixture::new("alice").create(state).await.user_id;
    let b = UserFixture::new("bob").create(state).await.user_id;
    let c = UserFixture::new("carol").create(state).await.user_id;
    (a, b, c)
}

fn primary_of(view: &[AssignedUserView]) -> Vec<i32> {
    view.iter()
        .filter(|u| u.is_primary)
        .map(|u| u.user_id)
        .collect()
}

fn logical_set(view: &[AssignedUserView]) -> Vec<(i32, bool)> {
    let mut set: Vec<(i32, bool)> = view.iter().map(|u| (u.user_id, u.is_primary)).collect();
    set.sort_unstable();
    set
}

#[tokio::test]
async fn test_first_user_is_primary_without_explicit_choice() {
    let state = test_state().await;
    let dept = department(&state, "Sales").await;
    let (a, b, c) = three_users(&state).await;

    let mut req = okr_request(dept.id, "Grow");
    req.assigned_user_ids = Some(vec![a, b, c]);
    let created = handlers::okrs::create_okr(&state, req).await.unwrap().0;

    assert_eq!(created.assigned_users_details.len(), 3);
    assert_eq!(primary_of(&created.assigned_users_details), vec![a]);
}

#[tokio::test]
async fn test_unknown_leading_id_leaves_no_primary() {
    let state = test_state().await;
    let dept = department(&state, "Sales").await;
    let (a, ..) = three_users(&state).await;
    let target = okr(&state, dept.id, "Grow").await;

    let created = reconcile::replace_assigned_users(&state.db, target.okr_id, &[9999, a], None)
        .await
        .unwrap();

    assert_eq!(created.len(), 1);
    assert_eq!(created[0].user_id, a);
    assert!(!created[0].is_primary);
}

#[tokio::test]
async fn test_explicit_primary_wins() {
    let state = test_state().await;
    let dept = department(&state, "Sales").await;
    let (a, b, _) = three_users(&state).await;

    let mut req = okr_request(dept.id, "Grow");
    req.assigned_user_ids = Some(vec![a, b]);
    req.primary_user_id = Some(b);
    let created = handlers::okrs::create_okr(&state, req).await.unwrap().0;

    assert_eq!(primary_of(&created.assigned_users_details), vec![b]);
    let a_view = created
        .assigned_users_details
        .iter()
        .find(|u| u.user_id == a)
        .unwrap();
    assert!(!a_view.is_primary);
}

#[tokio::test]
async fn test_reconciling_twice_yields_same_logical_set() {
    let state = test_state().await;
    let dept = department(&state, "Sales").await;
    let (a, b, c) = three_users(&state).await;
    let target = okr(&state, dept.id, "Grow").await;

    reconcile::replace_assigned_users(&state.db, target.okr_id, &[a, b, c], Some(c))
        .await
        .unwrap();
    let first = handlers::okrs::assigned_users(&state, target.okr_id).await.unwrap().0;

    reconcile::replace_assigned_users(&state.db, target.okr_id, &[a, b, c], Some(c))
        .await
        .unwrap();
    let second = handlers::okrs::assigned_users(&state, target.okr_id).await.unwrap().0;

    assert_eq!(logical_set(&first), logical_set(&second));
    assert_eq!(primary_of(&second), vec![c]);
}

#[tokio::test]
async fn test_unknown_user_is_skipped() {
    let state = test_state().await;
    let dept = department(&state, "Sales").await;
    let (a, b, _) = three_users(&state).await;
    let target = okr(&state, dept.id, "Grow").await;

    let created = reconcile::replace_assigned_users(&state.db, target.okr_id, &[a, 4242, b], None)
        .await
        .unwrap();

    assert_eq!(created.len(), 2);
    let stored = OkrUserMappings::find()
        .filter(okr_user_mappings::Column::OkrId.eq(target.okr_id))
        .all(&state.db)
        .await
        .unwrap();
    assert_eq!(stored.len(), 2);
}

#[tokio::test]
async fn test_update_without_list_keeps_mappings_and_empty_list_clears() {
    let state = test_state().await;
    let dept = department(&state, "Sales").await;
    let (a, b, _) = three_users(&state).await;

    let mut req = okr_request(dept.id, "Grow");
    req.assigned_user_ids = Some(vec![a, b]);
    let created = handlers::okrs::create_okr(&state, req).await.unwrap().0;

    let renamed = handlers::okrs::update_okr(&state, created.okr_id, UpdateOkrRequest {
        name: Some("Grow faster".to_string()),
        ..Default::default()
    })
    .await
    .unwrap()
    .0;
    assert_eq!(renamed.name, "Grow faster");
    assert_eq!(renamed.assigned_users_details.len(), 2);

    let cleared = handlers::okrs::update_okr(&state, created.okr_id, UpdateOkrRequest {
        assigned_user_ids: Some(vec![]),
        ..Default::default()
    })
    .await
    .unwrap()
    .0;
    assert!(cleared.assigned_users_details.is_empty());
}

#[tokio::test]
async fn test_removing_an_id_unassigns_that_user() {
    let state = test_state().await;
    let dept = department(&state, "Sales").await;
    let (a, b, c) = three_users(&state).await;
    let target = okr(&state, dept.id, "Grow").await;

    reconcile::replace_assigned_users(&state.db, target.okr_id, &[a, b, c], None)
        .await
        .unwrap();
    reconcile::replace_assigned_users(&state.db, target.okr_id, &[b, c], None)
        .await
        .unwrap();

    let view = handlers::okrs::assigned_users(&state, target.okr_id).await.unwrap().0;
    let ids: Vec<i32> = view.iter().map(|u| u.user_id).collect();
    assert_eq!(ids, vec![b, c]);
    assert_eq!(primary_of(&view), vec![b]);
}

#[tokio::test]
async fn test_bulk_assign_users() {
    let state = test_state().await;
    let dept = department(&state, "Sales").await;
    let (a, b, c) = three_users(&state).await;
    let target = okr(&state, dept.id, "Grow").await;

    let body = json!([
        {"user_id": a},
        {"user_id": b, "is_primary": true},
        {"is_primary": true},
        {"user_id": 9999},
        {"user_id": c}
    ]);
    let created = handlers::okrs::assign_users(&state, target.okr_id, body).await.unwrap().0;

    let ids: Vec<i32> = created.iter().map(|m| m.user).collect();
    assert_eq!(ids, vec![a, b, c]);
    let primaries: Vec<i32> = created.iter().filter(|m| m.is_primary).map(|m| m.user).collect();
    assert_eq!(primaries, vec![b]);
    assert_eq!(created[1].user_details.name, "User bob");
}

#[tokio::test]
async fn test_bulk_assign_requires_a_list() {
    let state = test_state().await;
    let dept = department(&state, "Sales").await;
    let target = okr(&state, dept.id, "Grow").await;

    let err = handlers::okrs::assign_users(&state, target.okr_id, json!({"user_id": 1}))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "BAD_REQUEST");
    assert_eq!(err.message(), "Expected a list of user assignments");

    let err = handlers::okrs::assign_business_units(&state, target.okr_id, json!("1,2"))
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Expected a list of business unit IDs");
}

#[tokio::test]
async fn test_business_unit_reconciliation() {
    let state = test_state().await;
    let dept = department(&state, "Sales").await;
    let emea = business_unit(&state, "EMEA").await;
    let apac = business_unit(&state, "APAC").await;
    let amer = business_unit(&state, "AMER").await;

    let mut req = okr_request(dept.id, "Grow");
    req.business_unit_ids = Some(vec![emea.business_unit_id, 777, apac.business_unit_id]);
    let created = handlers::okrs::create_okr(&state, req).await.unwrap().0;
    assert_eq!(created.business_units, vec![emea.clone(), apac.clone()]);

    let replaced = handlers::okrs::assign_business_units(
        &state,
        created.okr_id,
        json!([amer.business_unit_id, "x", amer.business_unit_id]),
    )
    .await
    .unwrap()
    .0;
    assert_eq!(replaced, vec![amer.clone()]);

    let view = handlers::okrs::business_units(&state, created.okr_id).await.unwrap().0;
    assert_eq!(view, vec![amer]);
}

#[tokio::test]
async fn test_deleting_business_unit_unlinks_okrs() {
    let state = test_state().await;
    let dept = department(&state, "Sales").await;
    let emea = business_unit(&state, "EMEA").await;

    let mut req = okr_request(dept.id, "Grow");
    req.business_unit_ids = Some(vec![emea.business_unit_id]);
    let created = handlers::okrs::create_okr(&state, req).await.unwrap().0;

    handlers::business_units::delete_business_unit(&state, emea.business_unit_id)
        .await
        .unwrap();

    let view = handlers::okrs::business_units(&state, created.okr_id).await.unwrap().0;
    assert!(view.is_empty());
}
