//! # API Router Configuration
//!
//! Configures API routes for the OKR tracker. Every collection gets the same
//! six operations under `/api/{collection}`; the wrappers below only extract
//! and hand over to [`crate::handlers`].

use axum::{
    extract::State as AxumState,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json,
    Router,
};
use error::{ApiResponse, Result};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::{
    dto,
    extract::{AppJson, AppPath, AppQuery},
    handlers,
    middleware::{cors::CorsConfig, request_id::request_id_middleware},
    AppState,
};

/// Creates the API router with all resource routes
///
/// # Arguments
///
/// * `state` - Application state containing the DB pool
///
/// # Returns
///
/// Router with every route nested under `/api`
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/departments", get(list_departments).post(create_department))
        .route(
            "/departments/:id",
            get(get_department)
                .put(replace_department)
                .patch(patch_department)
                .delete(delete_department),
        )
        .route("/business-units", get(list_business_units).post(create_business_unit))
        .route(
            "/business-units/:id",
            get(get_business_unit)
                .put(replace_business_unit)
                .patch(patch_business_unit)
                .delete(delete_business_unit),
        )
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user)
                .put(replace_user)
                .patch(patch_user)
                .delete(delete_user),
        )
        .route("/okrs", get(list_okrs).post(create_okr))
        .route(
            "/okrs/:id",
            get(get_okr)
                .put(replace_okr)
                .patch(patch_okr)
                .delete(delete_okr),
        )
        .route("/okrs/:id/assigned_users", get(okr_assigned_users))
        .route("/okrs/:id/assign_users", post(okr_assign_users))
        .route("/okrs/:id/business_units", get(okr_business_units))
        .route("/okrs/:id/assign_business_units", post(okr_assign_business_units))
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/:id",
            get(get_task)
                .put(replace_task)
                .patch(patch_task)
                .delete(delete_task),
        )
        .route("/okr-user-mappings", get(list_mappings).post(create_mapping))
        .route(
            "/okr-user-mappings/:id",
            get(get_mapping)
                .put(replace_mapping)
                .patch(patch_mapping)
                .delete(delete_mapping),
        )
        .route("/task-challenges", get(list_challenges).post(create_challenge))
        .route(
            "/task-challenges/:id",
            get(get_challenge)
                .put(replace_challenge)
                .patch(patch_challenge)
                .delete(delete_challenge),
        )
        .route("/task-challenges/by_task", get(challenges_by_task));

    Router::new().nest("/api", api).with_state(state)
}

async fn list_departments(AxumState(state): AxumState<AppState>) -> Result<Json<Vec<dto::departments::DepartmentResponse>>> {
    handlers::departments::list_departments(&state).await
}

async fn create_department(
    AxumState(state): AxumState<AppState>,
    AppJson(req): AppJson<dto::departments::CreateDepartmentRequest>,
) -> Result<(StatusCode, Json<dto::departments::DepartmentResponse>)> {
    Ok((StatusCode::CREATED, handlers::departments::create_department(&state, req).await?))
}

async fn get_department(
    AxumState(state): AxumState<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<dto::departments::DepartmentResponse>> {
    handlers::departments::get_department(&state, id).await
}

/// PUT: every required field must be present.
async fn replace_department(
    AxumState(state): AxumState<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(req): AppJson<dto::departments::CreateDepartmentRequest>,
) -> Result<Json<dto::departments::DepartmentResponse>> {
    handlers::departments::update_department(&state, id, req.into()).await
}

async fn patch_department(
    AxumState(state): AxumState<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(req): AppJson<dto::departments::UpdateDepartmentRequest>,
) -> Result<Json<dto::departments::DepartmentResponse>> {
    handlers::departments::update_department(&state, id, req).await
}

async fn delete_department(AxumState(state): AxumState<AppState>, AppPath(id): AppPath<i32>) -> Result<StatusCode> {
    handlers::departments::delete_department(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_business_units(AxumState(state): AxumState<AppState>) -> Result<Json<Vec<dto::business_units::BusinessUnitResponse>>> {
    handlers::business_units::list_business_units(&state).await
}

async fn create_business_unit(
    AxumState(state): AxumState<AppState>,
    AppJson(req): AppJson<dto::business_units::CreateBusinessUnitRequest>,
) -> Result<(StatusCode, Json<dto::business_units::BusinessUnitResponse>)> {
    Ok((StatusCode::CREATED, handlers::business_units::create_business_unit(&state, req).await?))
}

async fn get_business_unit(
    AxumState(state): AxumState<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<dto::business_units::BusinessUnitResponse>> {
    handlers::business_units::get_business_unit(&state, id).await
}

/// PUT: every required field must be present.
async fn replace_business_unit(
    AxumState(state): AxumState<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(req): AppJson<dto::business_units::CreateBusinessUnitRequest>,
) -> Result<Json<dto::business_units::BusinessUnitResponse>> {
    handlers::business_units::update_business_unit(&state, id, req.into()).await
}

async fn patch_business_unit(
    AxumState(state): AxumState<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(req): AppJson<dto::business_units::UpdateBusinessUnitRequest>,
) -> Result<Json<dto::business_units::BusinessUnitResponse>> {
    handlers::business_units::update_business_unit(&state, id, req).await
}

async fn delete_business_unit(AxumState(state): AxumState<AppState>, AppPath(id): AppPath<i32>) -> Result<StatusCode> {
    handlers::business_units::delete_business_unit(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_users(AxumState(state): AxumState<AppState>) -> Result<Json<Vec<dto::users::UserResponse>>> {
    handlers::users::list_users(&state).await
}

async fn create_user(
    AxumState(state): AxumState<AppState>,
    AppJson(req): AppJson<dto::users::CreateUserRequest>,
) -> Result<(StatusCode, Json<dto::users::UserResponse>)> {
    Ok((StatusCode::CREATED, handlers::users::create_user(&state, req).await?))
}

async fn get_user(
    AxumState(state): AxumState<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<dto::users::UserResponse>> {
    handlers::users::get_user(&state, id).await
}

/// PUT: every required field must be present.
async fn replace_user(
    AxumState(state): AxumState<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(req): AppJson<dto::users::CreateUserRequest>,
) -> Result<Json<dto::users::UserResponse>> {
    handlers::users::update_user(&state, id, req.into()).await
}

async fn patch_user(
    AxumState(state): AxumState<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(req): AppJson<dto::users::UpdateUserRequest>,
) -> Result<Json<dto::users::UserResponse>> {
    handlers::users::update_user(&state, id, req).await
}

async fn delete_user(AxumState(state): AxumState<AppState>, AppPath(id): AppPath<i32>) -> Result<StatusCode> {
    handlers::users::delete_user(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_okrs(AxumState(state): AxumState<AppState>) -> Result<Json<Vec<dto::okrs::OkrResponse>>> {
    handlers::okrs::list_okrs(&state).await
}

async fn create_okr(
    AxumState(state): AxumState<AppState>,
    AppJson(req): AppJson<dto::okrs::CreateOkrRequest>,
) -> Result<(StatusCode, Json<dto::okrs::OkrResponse>)> {
    Ok((StatusCode::CREATED, handlers::okrs::create_okr(&state, req).await?))
}

async fn get_okr(
    AxumState(state): AxumState<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<dto::okrs::OkrResponse>> {
    handlers::okrs::get_okr(&state, id).await
}

/// PUT: every required field must be present.
async fn replace_okr(
    AxumState(state): AxumState<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(req): AppJson<dto::okrs::CreateOkrRequest>,
) -> Result<Json<dto::okrs::OkrResponse>> {
    handlers::okrs::update_okr(&state, id, req.into()).await
}

async fn patch_okr(
    AxumState(state): AxumState<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(req): AppJson<dto::okrs::UpdateOkrRequest>,
) -> Result<Json<dto::okrs::OkrResponse>> {
    handlers::okrs::update_okr(&state, id, req).await
}

async fn delete_okr(AxumState(state): AxumState<AppState>, AppPath(id): AppPath<i32>) -> Result<StatusCode> {
    handlers::okrs::delete_okr(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn okr_assigned_users(
    AxumState(state): AxumState<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<Vec<dto::okrs::AssignedUserView>>> {
    handlers::okrs::assigned_users(&state, id).await
}

async fn okr_assign_users(
    AxumState(state): AxumState<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(body): AppJson<Value>,
) -> Result<(StatusCode, Json<Vec<dto::okr_user_mappings::MappingResponse>>)> {
    Ok((StatusCode::CREATED, handlers::okrs::assign_users(&state, id, body).await?))
}

async fn okr_business_units(
    AxumState(state): AxumState<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<Vec<dto::business_units::BusinessUnitResponse>>> {
    handlers::okrs::business_units(&state, id).await
}

async fn okr_assign_business_units(
    AxumState(state): AxumState<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(body): AppJson<Value>,
) -> Result<Json<Vec<dto::business_units::BusinessUnitResponse>>> {
    handlers::okrs::assign_business_units(&state, id, body).await
}

async fn list_tasks(
    AxumState(state): AxumState<AppState>,
    AppQuery(query): AppQuery<dto::tasks::TaskListQuery>,
) -> Result<Json<Vec<dto::tasks::TaskResponse>>> {
    handlers::tasks::list_tasks(&state, query).await
}

async fn create_task(
    AxumState(state): AxumState<AppState>,
    AppJson(req): AppJson<dto::tasks::CreateTaskRequest>,
) -> Result<(StatusCode, Json<dto::tasks::TaskResponse>)> {
    Ok((StatusCode::CREATED, handlers::tasks::create_task(&state, req).await?))
}

async fn get_task(
    AxumState(state): AxumState<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<dto::tasks::TaskResponse>> {
    handlers::tasks::get_task(&state, id).await
}

/// PUT: every required field must be present.
async fn replace_task(
    AxumState(state): AxumState<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(req): AppJson<dto::tasks::CreateTaskRequest>,
) -> Result<Json<dto::tasks::TaskResponse>> {
    handlers::tasks::update_task(&state, id, req.into()).await
}

async fn patch_task(
    AxumState(state): AxumState<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(req): AppJson<dto::tasks::UpdateTaskRequest>,
) -> Result<Json<dto::tasks::TaskResponse>> {
    handlers::tasks::update_task(&state, id, req).await
}

async fn delete_task(AxumState(state): AxumState<AppState>, AppPath(id): AppPath<i32>) -> Result<StatusCode> {
    handlers::tasks::delete_task(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_mappings(
    AxumState(state): AxumState<AppState>,
    AppQuery(query): AppQuery<dto::okr_user_mappings::MappingListQuery>,
) -> Result<Json<Vec<dto::okr_user_mappings::MappingResponse>>> {
    handlers::okr_user_mappings::list_mappings(&state, query).await
}

async fn create_mapping(
    AxumState(state): AxumState<AppState>,
    AppJson(req): AppJson<dto::okr_user_mappings::CreateMappingRequest>,
) -> Result<(StatusCode, Json<dto::okr_user_mappings::MappingResponse>)> {
    Ok((StatusCode::CREATED, handlers::okr_user_mappings::create_mapping(&state, req).await?))
}

async fn get_mapping(
    AxumState(state): AxumState<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<dto::okr_user_mappings::MappingResponse>> {
    handlers::okr_user_mappings::get_mapping(&state, id).await
}

/// PUT: every required field must be present.
async fn replace_mapping(
    AxumState(state): AxumState<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(req): AppJson<dto::okr_user_mappings::CreateMappingRequest>,
) -> Result<Json<dto::okr_user_mappings::MappingResponse>> {
    handlers::okr_user_mappings::update_mapping(&state, id, req.into()).await
}

async fn patch_mapping(
    AxumState(state): AxumState<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(req): AppJson<dto::okr_user_mappings::UpdateMappingRequest>,
) -> Result<Json<dto::okr_user_mappings::MappingResponse>> {
    handlers::okr_user_mappings::update_mapping(&state, id, req).await
}

async fn delete_mapping(AxumState(state): AxumState<AppState>, AppPath(id): AppPath<i32>) -> Result<StatusCode> {
    handlers::okr_user_mappings::delete_mapping(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_challenges(
    AxumState(state): AxumState<AppState>,
    AppQuery(query): AppQuery<dto::task_challenges::ChallengeListQuery>,
) -> Result<Json<Vec<dto::task_challenges::ChallengeResponse>>> {
    handlers::task_challenges::list_challenges(&state, query).await
}

async fn create_challenge(
    AxumState(state): AxumState<AppState>,
    AppJson(req): AppJson<dto::task_challenges::CreateChallengeRequest>,
) -> Result<(StatusCode, Json<dto::task_challenges::ChallengeResponse>)> {
    Ok((StatusCode::CREATED, handlers::task_challenges::create_challenge(&state, req).await?))
}

async fn get_challenge(
    AxumState(state): AxumState<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<dto::task_challenges::ChallengeResponse>> {
    handlers::task_challenges::get_challenge(&state, id).await
}

/// PUT: every required field must be present.
async fn replace_challenge(
    AxumState(state): AxumState<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(req): AppJson<dto::task_challenges::CreateChallengeRequest>,
) -> Result<Json<dto::task_challenges::ChallengeResponse>> {
    handlers::task_challenges::update_challenge(&state, id, req.into()).await
}

async fn patch_challenge(
    AxumState(state): AxumState<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(req): AppJson<dto::task_challenges::UpdateChallengeRequest>,
) -> Result<Json<dto::task_challenges::ChallengeResponse>> {
    handlers::task_challenges::update_challenge(&state, id, req).await
}

async fn delete_challenge(AxumState(state): AxumState<AppState>, AppPath(id): AppPath<i32>) -> Result<StatusCode> {
    handlers::task_challenges::delete_challenge(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn challenges_by_task(
    AxumState(state): AxumState<AppState>,
    AppQuery(query): AppQuery<dto::task_challenges::ChallengeListQuery>,
) -> Result<Json<Vec<dto::task_challenges::ChallengeResponse>>> {
    handlers::task_challenges::challenges_by_task(&state, query).await
}

/// Liveness probe with process uptime
async fn health_handler(AxumState(state): AxumState<AppState>) -> Json<ApiResponse<Value>> {
    Json(ApiResponse::ok(json!({
        "status": "ok",
        "uptime_seconds": state.start_time.elapsed().as_secs(),
    })))
}

/// Creates the health check router
pub fn create_health_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Creates the main application router
///
/// # Arguments
///
/// * `state` - Application state containing the DB pool
///
/// # Returns
///
/// Main router with health checks, API routes, request ids, tracing and CORS
pub fn create_app_router(state: AppState) -> Router {
    create_app_router_with_cors(state, &CorsConfig::from_env())
}

/// Same as [`create_app_router`] with an explicit CORS configuration.
pub fn create_app_router_with_cors(state: AppState, cors: &CorsConfig) -> Router {
    Router::new()
        .merge(create_health_router(state.clone()))
        .merge(create_router(state))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors.layer())
}
