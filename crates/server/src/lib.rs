//! # OKR Tracker API Server
//!
//! Axum-based HTTP API over the OKR tracker entity store.
//!
//! ## Modules
//!
//! - [`dto`]: Request/response data transfer objects
//! - [`handlers`]: Resource operations, one module per collection
//! - [`hierarchy`]: Materialized manager paths for users
//! - [`reconcile`]: Replace-all reconciliation of OKR mappings
//! - [`projection`]: Outbound views assembled from several tables
//! - [`middleware`]: HTTP middleware (request ids, CORS)
//! - [`router`]: API route configuration

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod hierarchy;
pub mod middleware;
pub mod projection;
pub mod reconcile;
pub mod router;

pub use router::create_app_router;

/// Application state shared across request handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection pool
    pub db:         sea_orm::DbConn,
    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Wraps an established connection, starting the uptime clock now.
    pub fn new(db: sea_orm::DbConn) -> Self {
        Self {
            db,
            start_time: std::time::Instant::now(),
        }
    }
}

/// Server initialization result
#[derive(Debug)]
pub struct ServerResult {
    /// The address the server is bound to
    pub address:    String,
    /// Server start timestamp for logging
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl ServerResult {
    /// Creates a new server result
    #[must_use]
    pub fn new(address: &str) -> Self {
        Self {
            address:    address.to_string(),
            started_at: chrono::Utc::now(),
        }
    }
}
