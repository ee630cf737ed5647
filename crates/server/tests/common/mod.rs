//! # Common Test Utilities
//!
//! Shared test infrastructure: an `AppState` over a migrated in-memory SQLite
//! database, HTTP helpers for driving the router, and record fixtures.

#![allow(dead_code)]

use std::sync::Once;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use migration::{DatabaseConfig, Migrator, MigratorTrait};
use rust_decimal::Decimal;
use server::{
    dto::{
        business_units::{BusinessUnitResponse, CreateBusinessUnitRequest},
        departments::{CreateDepartmentRequest, DepartmentResponse},
        okrs::{CreateOkrRequest, OkrResponse},
        task_challenges::{ChallengeResponse, CreateChallengeRequest},
        tasks::{CreateTaskRequest, TaskResponse},
        users::{CreateUserRequest, UserResponse},
    },
    handlers,
    AppState,
};
use tower::ServiceExt;

/// Initialize test logging (run once per test session)
static INIT: Once = Once::new();

/// Initialize test environment including structured logging
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Fresh application state over its own migrated in-memory database
pub async fn test_state() -> AppState {
    init_test_env();
    let db = DatabaseConfig::sqlite_memory()
        .connect()
        .await
        .expect("in-memory database");
    Migrator::up(&db, None).await.expect("migrations");
    AppState::new(db)
}

/// Sends one request through the full application router
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<serde_json::Value>) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => {
            builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap()
        },
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    }
    else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, json)
}

pub fn date(s: &str) -> NaiveDate { NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap() }

pub async fn department(state: &AppState, name: &str) -> DepartmentResponse {
    handlers::departments::create_department(state, CreateDepartmentRequest {
        name: name.to_string(),
    })
    .await
    .unwrap()
    .0
}

pub async fn business_unit(state: &AppState, name: &str) -> BusinessUnitResponse {
    handlers::business_units::create_business_unit(state, CreateBusinessUnitRequest {
        business_unit_name: name.to_string(),
    })
    .await
    .unwrap()
    .0
}

/// Test fixtures for user data
pub struct UserFixture {
    pub employee_id: String,
    pub name:        String,
    pub email:       String,
    pub username:    Option<String>,
    pub manager:     Option<i32>,
    pub password:    Option<String>,
}

impl UserFixture {
    /// A user whose unique fields derive from `key`
    #[must_use]
    pub fn new(key: &str) -> Self {
        Self {
            employee_id: format!("EMP-{}", key),
            name:        format!("User {}", key),
            email:       format!("{}@example.com", key),
            username:    None,
            manager:     None,
            password:    None,
        }
    }

    /// Set the manager
    #[must_use]
    pub fn with_manager(mut self, manager: i32) -> Self {
        self.manager = Some(manager);
        self
    }

    /// Set the username
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the password
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn request(self) -> CreateUserRequest {
        serde_json::from_value(serde_json::json!({
            "username": self.username,
            "employee_id": self.employee_id,
            "name": self.name,
            "email": self.email,
            "password": self.password,
            "role": "Engineer",
            "level": 2,
            "manager": self.manager,
            "org_unit": "Platform",
        }))
        .unwrap()
    }

    pub async fn create(self, state: &AppState) -> UserResponse {
        handlers::users::create_user(state, self.request()).await.unwrap().0
    }
}

/// Create body for an OKR in `department`
pub fn okr_request(department: i32, name: &str) -> CreateOkrRequest {
    CreateOkrRequest {
        name:              name.to_string(),
        description:       format!("{} description", name),
        assumptions:       None,
        parent_okr:        None,
        department,
        start_date:        date("2026-01-01"),
        due_date:          date("2026-12-31"),
        status:            true,
        progress_percent:  Decimal::new(1250, 2),
        is_measurable:     false,
        business_unit_ids: None,
        assigned_user_ids: None,
        primary_user_id:   None,
    }
}

pub async fn okr(state: &AppState, department: i32, name: &str) -> OkrResponse {
    handlers::okrs::create_okr(state, okr_request(department, name))
        .await
        .unwrap()
        .0
}

pub async fn task(state: &AppState, okr_id: i32, user_id: i32, title: &str) -> TaskResponse {
    handlers::tasks::create_task(state, CreateTaskRequest {
        title:            title.to_string(),
        description:      format!("{} description", title),
        start_date:       date("2026-02-01"),
        due_date:         date("2026-03-01"),
        status:           1,
        assigned_to:      user_id,
        linked_to_okr:    okr_id,
        progress_percent: Decimal::ZERO,
    })
    .await
    .unwrap()
    .0
}

pub async fn challenge(state: &AppState, task_id: i32, name: &str, status: i32) -> ChallengeResponse {
    handlers::task_challenges::create_challenge(state, CreateChallengeRequest {
        task:           task_id,
        challenge_name: name.to_string(),
        status,
        due_date:       date("2026-02-15"),
        remarks:        "Needs follow-up".to_string(),
    })
    .await
    .unwrap()
    .0
}
