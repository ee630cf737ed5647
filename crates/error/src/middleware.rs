//! # Error Responses
//!
//! Conversion of [`AppError`] into HTTP responses.
//!
//! Client errors (4xx) always carry their message. Server errors hide theirs
//! behind a generic text unless detailed errors are switched on through the
//! `OKR_DETAILED_ERRORS` environment variable.

use std::sync::OnceLock;

use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};

use crate::{response::ApiResponse, AppError};

/// Environment variable enabling detailed 5xx messages.
pub const DETAILED_ERRORS_ENV: &str = "OKR_DETAILED_ERRORS";

/// Error handler that converts errors to HTTP responses.
#[derive(Debug, Clone, Copy)]
pub struct ErrorHandler {
    /// Whether to include server error details in the response.
    pub include_details: bool,
}

impl ErrorHandler {
    /// Create a new error handler.
    #[inline]
    pub fn new(include_details: bool) -> Self {
        Self {
            include_details,
        }
    }

    /// Handler configured from `OKR_DETAILED_ERRORS` (`1`/`true`/`yes`), read once per process.
    pub fn from_env() -> Self {
        static DETAILED: OnceLock<bool> = OnceLock::new();
        let include_details = *DETAILED.get_or_init(|| {
            std::env::var(DETAILED_ERRORS_ENV)
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false)
        });
        Self::new(include_details)
    }

    /// Message that will be shown to the client for `err`.
    pub fn public_message(&self, err: &AppError) -> String {
        if self.include_details || err.is_client_error() {
            err.message()
        }
        else {
            "Internal server error".to_string()
        }
    }

    /// Convert an error to a response.
    pub fn to_response(&self, err: &AppError) -> Response {
        let status = err.status();

        if status.is_server_error() {
            tracing::error!(code = err.code(), error = %err, "Request failed");
        }
        else {
            tracing::debug!(code = err.code(), error = %err, "Request rejected");
        }

        let body = ApiResponse::<()>::error(err.code(), self.public_message(err));
        let mut res = (status, Json(body)).into_response();
        res.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        res
    }
}

impl Default for ErrorHandler {
    fn default() -> Self { Self::from_env() }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response { ErrorHandler::from_env().to_response(&self) }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use http_body_util::BodyExt;

    use super::*;

    async fn body_json(res: Response) -> serde_json::Value {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_client_error_keeps_message() {
        let handler = ErrorHandler::new(false);
        let res = handler.to_response(&AppError::not_found("Task not found"));
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let json = body_json(res).await;
        assert_eq!(json["status"], "error");
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Task not found");
    }

    #[tokio::test]
    async fn test_server_error_hides_message() {
        let handler = ErrorHandler::new(false);
        let res = handler.to_response(&AppError::database("relation \"okrs\" does not exist"));
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(res).await;
        assert_eq!(json["code"], "DATABASE_ERROR");
        assert_eq!(json["message"], "Internal server error");
    }

    #[tokio::test]
    async fn test_server_error_with_details() {
        let handler = ErrorHandler::new(true);
        let res = handler.to_response(&AppError::internal("pool exhausted"));
        let json = body_json(res).await;
        assert_eq!(json["message"], "pool exhausted");
    }

    #[test]
    fn test_protected_maps_to_conflict_status() {
        let res = ErrorHandler::new(false).to_response(&AppError::protected("in use"));
        assert_eq!(res.status(), StatusCode::CONFLICT);
        assert_eq!(
            res.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }
}
