//! CRUD behaviour, delete rules and list filters of the resource handlers.

mod common;

use common::{challenge, department, okr, okr_request, task, test_state, UserFixture};
use entity::{logs, Logs, OkrUserMappings, TaskChallenges, Tasks};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};
use server::{
    dto::{
        departments::UpdateDepartmentRequest,
        okr_user_mappings::{CreateMappingRequest, MappingListQuery},
        okrs::UpdateOkrRequest,
        task_challenges::{ChallengeListQuery, UpdateChallengeRequest},
        tasks::{TaskListQuery, UpdateTaskRequest},
    },
    handlers,
};

#[tokio::test]
async fn test_department_with_okrs_is_protected() {
    let state = test_state().await;
    let owner = department(&state, "Finance").await;
    let empty = department(&state, "Legal").await;
    okr(&state, owner.id, "Cut costs").await;

    let err = handlers::departments::delete_department(&state, owner.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "PROTECTED");
    assert!(handlers::departments::get_department(&state, owner.id).await.is_ok());

    handlers::departments::delete_department(&state, empty.id)
        .await
        .unwrap();
    let err = handlers::departments::get_department(&state, empty.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
}

#[tokio::test]
async fn test_department_names_are_unique() {
    let state = test_state().await;
    department(&state, "Finance").await;
    let other = department(&state, "Legal").await;

    let err = handlers::departments::update_department(&state, other.id, UpdateDepartmentRequest {
        name: Some("Finance".to_string()),
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), "CONFLICT");
}

#[tokio::test]
async fn test_okr_references_are_checked() {
    let state = test_state().await;

    let err = handlers::okrs::create_okr(&state, okr_request(404, "Nowhere"))
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Department not found");

    let dept = department(&state, "Ops").await;
    let mut req = okr_request(dept.id, "Child");
    req.parent_okr = Some(404);
    let err = handlers::okrs::create_okr(&state, req).await.unwrap_err();
    assert_eq!(err.message(), "Parent OKR not found");
}

#[tokio::test]
async fn test_okr_cannot_be_its_own_parent() {
    let state = test_state().await;
    let dept = department(&state, "Ops").await;
    let target = okr(&state, dept.id, "Loop").await;

    let err = handlers::okrs::update_okr(&state, target.okr_id, UpdateOkrRequest {
        parent_okr: Some(Some(target.okr_id)),
        ..Default::default()
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_deleting_parent_okr_detaches_children() {
    let state = test_state().await;
    let dept = department(&state, "Ops").await;
    let parent = okr(&state, dept.id, "Parent").await;

    let mut req = okr_request(dept.id, "Child");
    req.parent_okr = Some(parent.okr_id);
    let child = handlers::okrs::create_okr(&state, req).await.unwrap().0;
    assert_eq!(child.parent_okr, Some(parent.okr_id));

    handlers::okrs::delete_okr(&state, parent.okr_id).await.unwrap();

    let child = handlers::okrs::get_okr(&state, child.okr_id).await.unwrap().0;
    assert_eq!(child.parent_okr, None);
}

#[tokio::test]
async fn test_okr_progress_renders_two_places() {
    let state = test_state().await;
    let dept = department(&state, "Ops").await;
    let created = okr(&state, dept.id, "Progress").await;

    let json = serde_json::to_value(&created).unwrap();
    assert_eq!(json["progress_percent"], "12.50");
    assert_eq!(json["isMeasurable"], false);
    assert!(json.get("assigned_user_ids").is_none());
}

#[tokio::test]
async fn test_tasks_filtered_by_okr() {
    let state = test_state().await;
    let dept = department(&state, "Ops").await;
    let user = UserFixture::new("worker").create(&state).await;
    let first = okr(&state, dept.id, "First").await;
    let second = okr(&state, dept.id, "Second").await;

    let t1 = task(&state, first.okr_id, user.user_id, "One").await;
    let t2 = task(&state, first.okr_id, user.user_id, "Two").await;
    task(&state, second.okr_id, user.user_id, "Three").await;

    let filtered = handlers::tasks::list_tasks(&state, TaskListQuery {
        linked_to_okr: Some(first.okr_id.to_string()),
    })
    .await
    .unwrap()
    .0;
    let mut ids: Vec<i32> = filtered.iter().map(|t| t.task_id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![t1.task_id, t2.task_id]);
    assert!(filtered.iter().all(|t| t.linked_to_okr == first.okr_id));

    let all = handlers::tasks::list_tasks(&state, TaskListQuery {
        linked_to_okr: Some(String::new()),
    })
    .await
    .unwrap()
    .0;
    assert_eq!(all.len(), 3);

    let err = handlers::tasks::list_tasks(&state, TaskListQuery {
        linked_to_okr: Some("first".to_string()),
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), "BAD_REQUEST");
}

#[tokio::test]
async fn test_task_status_label_and_validation() {
    let state = test_state().await;
    let dept = department(&state, "Ops").await;
    let user = UserFixture::new("worker").create(&state).await;
    let target = okr(&state, dept.id, "Ship").await;
    let created = task(&state, target.okr_id, user.user_id, "Deploy").await;

    assert_eq!(created.status, 1);
    assert_eq!(created.status_display, "In Progress");

    let done = handlers::tasks::update_task(&state, created.task_id, UpdateTaskRequest {
        status: Some(0),
        ..Default::default()
    })
    .await
    .unwrap()
    .0;
    assert_eq!(done.status_display, "Completed");

    let err = handlers::tasks::update_task(&state, created.task_id, UpdateTaskRequest {
        status: Some(9),
        ..Default::default()
    })
    .await
    .unwrap_err();
    assert_eq!(err.message(), "status: \"9\" is not a valid choice.");
}

#[tokio::test]
async fn test_task_requires_existing_assignee() {
    let state = test_state().await;
    let dept = department(&state, "Ops").await;
    let target = okr(&state, dept.id, "Ship").await;

    let err = handlers::tasks::update_task(&state, 1, UpdateTaskRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Task not found");

    let user = UserFixture::new("worker").create(&state).await;
    let created = task(&state, target.okr_id, user.user_id, "Deploy").await;
    let err = handlers::tasks::update_task(&state, created.task_id, UpdateTaskRequest {
        assigned_to: Some(999),
        ..Default::default()
    })
    .await
    .unwrap_err();
    assert_eq!(err.message(), "Assigned user not found");
}

#[tokio::test]
async fn test_challenges_inline_and_synthesised_name() {
    let state = test_state().await;
    let dept = department(&state, "Ops").await;
    let user = UserFixture::new("worker").create(&state).await;
    let target = okr(&state, dept.id, "Ship").await;
    let parent = task(&state, target.okr_id, user.user_id, "Deploy").await;

    let unnamed = challenge(&state, parent.task_id, "", 1).await;
    assert_eq!(unnamed.challenge_name, "Challenge for Task Deploy");
    assert_eq!(unnamed.status_display, "Active");

    challenge(&state, parent.task_id, "Flaky CI", 0).await;

    let with_challenges = handlers::tasks::get_task(&state, parent.task_id).await.unwrap().0;
    let names: Vec<&str> = with_challenges
        .challenges
        .iter()
        .map(|c| c.challenge_name.as_str())
        .collect();
    assert_eq!(names, vec!["Challenge for Task Deploy", "Flaky CI"]);
}

#[tokio::test]
async fn test_challenge_filters_and_by_task() {
    let state = test_state().await;
    let dept = department(&state, "Ops").await;
    let user = UserFixture::new("worker").create(&state).await;
    let target = okr(&state, dept.id, "Ship").await;
    let first = task(&state, target.okr_id, user.user_id, "First").await;
    let second = task(&state, target.okr_id, user.user_id, "Second").await;

    challenge(&state, first.task_id, "a", 0).await;
    challenge(&state, first.task_id, "b", 3).await;
    challenge(&state, second.task_id, "c", 3).await;

    let resolved = handlers::task_challenges::list_challenges(&state, ChallengeListQuery {
        task_id: None,
        status:  Some("3".to_string()),
    })
    .await
    .unwrap()
    .0;
    assert_eq!(resolved.len(), 2);

    let combined = handlers::task_challenges::list_challenges(&state, ChallengeListQuery {
        task_id: Some(first.task_id.to_string()),
        status:  Some("3".to_string()),
    })
    .await
    .unwrap()
    .0;
    assert_eq!(combined.len(), 1);
    assert_eq!(combined[0].challenge_name, "b");

    let by_task = handlers::task_challenges::challenges_by_task(&state, ChallengeListQuery {
        task_id: Some(second.task_id.to_string()),
        status:  None,
    })
    .await
    .unwrap()
    .0;
    assert_eq!(by_task.len(), 1);

    let err = handlers::task_challenges::challenges_by_task(&state, ChallengeListQuery::default())
        .await
        .unwrap_err();
    assert_eq!(err.code(), "BAD_REQUEST");
    assert_eq!(err.message(), "task_id parameter is required");
}

#[tokio::test]
async fn test_challenge_update_refreshes_timestamp() {
    let state = test_state().await;
    let dept = department(&state, "Ops").await;
    let user = UserFixture::new("worker").create(&state).await;
    let target = okr(&state, dept.id, "Ship").await;
    let parent = task(&state, target.okr_id, user.user_id, "Deploy").await;
    let created = challenge(&state, parent.task_id, "Blocked", 0).await;

    let updated = handlers::task_challenges::update_challenge(&state, created.id, UpdateChallengeRequest {
        status: Some(2),
        ..Default::default()
    })
    .await
    .unwrap()
    .0;

    assert_eq!(updated.status_display, "Discarded");
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn test_deleting_okr_cascades_to_tasks_and_challenges() {
    let state = test_state().await;
    let dept = department(&state, "Ops").await;
    let user = UserFixture::new("worker").create(&state).await;
    let target = okr(&state, dept.id, "Ship").await;
    let parent = task(&state, target.okr_id, user.user_id, "Deploy").await;
    challenge(&state, parent.task_id, "Blocked", 0).await;

    handlers::okrs::delete_okr(&state, target.okr_id).await.unwrap();

    assert_eq!(Tasks::find().count(&state.db).await.unwrap(), 0);
    assert_eq!(TaskChallenges::find().count(&state.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_progress_logs_follow_their_okr() {
    let state = test_state().await;
    let dept = department(&state, "Ops").await;
    let user = UserFixture::new("reporter").create(&state).await;
    let target = okr(&state, dept.id, "Ship").await;
    let now = chrono::Utc::now();

    logs::ActiveModel {
        date: Set(common::date("2026-02-15")),
        okr_id: Set(target.okr_id),
        user_id: Set(user.user_id),
        progress_percent: Set(Decimal::new(4000, 2)),
        status: Set("On Track".to_string()),
        confidence_level: Set(7),
        comment: Set("Weekly check-in".to_string()),
        is_auto_generated: Set(false),
        source: Set("manual".to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .unwrap();
    assert_eq!(Logs::find().count(&state.db).await.unwrap(), 1);

    handlers::okrs::delete_okr(&state, target.okr_id).await.unwrap();
    assert_eq!(Logs::find().count(&state.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_deleting_user_cascades_to_their_tasks_and_mappings() {
    let state = test_state().await;
    let dept = department(&state, "Ops").await;
    let leaving = UserFixture::new("leaving").create(&state).await;
    let staying = UserFixture::new("staying").create(&state).await;

    let mut req = okr_request(dept.id, "Ship");
    req.assigned_user_ids = Some(vec![leaving.user_id, staying.user_id]);
    let target = handlers::okrs::create_okr(&state, req).await.unwrap().0;
    let gone = task(&state, target.okr_id, leaving.user_id, "Handover").await;
    challenge(&state, gone.task_id, "Docs missing", 1).await;
    let kept = task(&state, target.okr_id, staying.user_id, "Carry on").await;

    handlers::users::delete_user(&state, leaving.user_id).await.unwrap();

    let tasks = Tasks::find().all(&state.db).await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].task_id, kept.task_id);
    assert_eq!(TaskChallenges::find().count(&state.db).await.unwrap(), 0);

    let mappings = OkrUserMappings::find().all(&state.db).await.unwrap();
    assert_eq!(mappings.len(), 1);
    assert_eq!(mappings[0].user_id, staying.user_id);
    assert!(handlers::okrs::get_okr(&state, target.okr_id).await.is_ok());
}

#[tokio::test]
async fn test_mapping_crud_and_filters() {
    let state = test_state().await;
    let dept = department(&state, "Ops").await;
    let a = UserFixture::new("a").create(&state).await;
    let b = UserFixture::new("b").create(&state).await;
    let first = okr(&state, dept.id, "First").await;
    let second = okr(&state, dept.id, "Second").await;

    for (okr_id, user_id) in [(first.okr_id, a.user_id), (first.okr_id, b.user_id), (second.okr_id, a.user_id)] {
        handlers::okr_user_mappings::create_mapping(&state, CreateMappingRequest {
            okr:        okr_id,
            user:       user_id,
            is_primary: false,
        })
        .await
        .unwrap();
    }

    let by_okr = handlers::okr_user_mappings::list_mappings(&state, MappingListQuery {
        okr_id:  Some(first.okr_id.to_string()),
        user_id: None,
    })
    .await
    .unwrap()
    .0;
    assert_eq!(by_okr.len(), 2);

    let by_both = handlers::okr_user_mappings::list_mappings(&state, MappingListQuery {
        okr_id:  Some(second.okr_id.to_string()),
        user_id: Some(a.user_id.to_string()),
    })
    .await
    .unwrap()
    .0;
    assert_eq!(by_both.len(), 1);
    assert_eq!(by_both[0].user_details.email, "a@example.com");

    let err = handlers::okr_user_mappings::create_mapping(&state, CreateMappingRequest {
        okr:        first.okr_id,
        user:       a.user_id,
        is_primary: true,
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), "CONFLICT");

    let err = handlers::okr_user_mappings::create_mapping(&state, CreateMappingRequest {
        okr:        first.okr_id,
        user:       999,
        is_primary: false,
    })
    .await
    .unwrap_err();
    assert_eq!(err.message(), "User not found");
}
