//! # OKR Tracker Error Infrastructure
//!
//! Error types and API error envelopes shared by every crate of the OKR tracker.

pub mod middleware;
pub mod rejection;
pub mod response;
pub mod traits;

pub use middleware::ErrorHandler;
pub use response::ApiResponse;
pub use traits::ResultExt;

/// Convenience type alias for Result with AppError.
pub type Result<T, E = AppError> = std::result::Result<T, E>;

/// Main application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("NotFound: {message}")]
    NotFound {
        message: String,
    },

    #[error("BadRequest: {message}")]
    BadRequest {
        message: String,
    },

    #[error("Validation: {message}")]
    Validation {
        message: String,
    },

    #[error("Conflict: {message}")]
    Conflict {
        message: String,
    },

    /// Deleting a record that other records still depend on.
    #[error("Protected: {message}")]
    Protected {
        message: String,
    },

    #[error("Internal: {message}")]
    Internal {
        message: String,
    },

    #[error("Database: {message}")]
    Database {
        message: String,
    },

    #[error("IO: {message}")]
    Io {
        message: String,
    },

    #[error("Config: {message}")]
    Config {
        message: String,
    },

    #[error("Migration: {message}")]
    Migration {
        message: String,
    },
}

impl AppError {
    /// Create a not found error.
    #[inline]
    pub fn not_found(resource: impl ToString) -> Self {
        Self::NotFound {
            message: resource.to_string(),
        }
    }

    /// Create a bad request error.
    #[inline]
    pub fn bad_request(message: impl ToString) -> Self {
        Self::BadRequest {
            message: message.to_string(),
        }
    }

    /// Create a validation error.
    #[inline]
    pub fn validation(message: impl ToString) -> Self {
        Self::Validation {
            message: message.to_string(),
        }
    }

    /// Create a conflict error.
    #[inline]
    pub fn conflict(message: impl ToString) -> Self {
        Self::Conflict {
            message: message.to_string(),
        }
    }

    /// Create a protected-delete error.
    #[inline]
    pub fn protected(message: impl ToString) -> Self {
        Self::Protected {
            message: message.to_string(),
        }
    }

    /// Create an internal error.
    #[inline]
    pub fn internal(message: impl ToString) -> Self {
        Self::Internal {
            message: message.to_string(),
        }
    }

    /// Create a database error.
    #[inline]
    pub fn database(message: impl ToString) -> Self {
        Self::Database {
            message: message.to_string(),
        }
    }

    /// Create a config error.
    #[inline]
    pub fn config(message: impl ToString) -> Self {
        Self::Config {
            message: message.to_string(),
        }
    }

    /// Create a migration error.
    #[inline]
    pub fn migration(message: impl ToString) -> Self {
        Self::Migration {
            message: message.to_string(),
        }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> http::StatusCode {
        match self {
            AppError::NotFound {
                ..
            } => http::StatusCode::NOT_FOUND,
            AppError::BadRequest {
                ..
            } => http::StatusCode::BAD_REQUEST,
            AppError::Validation {
                ..
            } => http::StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Conflict {
                ..
            } => http::StatusCode::CONFLICT,
            AppError::Protected {
                ..
            } => http::StatusCode::CONFLICT,
            AppError::Internal {
                ..
            } |
            AppError::Database {
                ..
            } |
            AppError::Io {
                ..
            } |
            AppError::Config {
                ..
            } |
            AppError::Migration {
                ..
            } => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound {
                ..
            } => "NOT_FOUND",
            AppError::BadRequest {
                ..
            } => "BAD_REQUEST",
            AppError::Validation {
                ..
            } => "VALIDATION_ERROR",
            AppError::Conflict {
                ..
            } => "CONFLICT",
            AppError::Protected {
                ..
            } => "PROTECTED",
            AppError::Internal {
                ..
            } => "INTERNAL_ERROR",
            AppError::Database {
                ..
            } => "DATABASE_ERROR",
            AppError::Io {
                ..
            } => "IO_ERROR",
            AppError::Config {
                ..
            } => "CONFIG_ERROR",
            AppError::Migration {
                ..
            } => "MIGRATION_ERROR",
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::NotFound {
                message,
            } |
            AppError::BadRequest {
                message,
            } |
            AppError::Validation {
                message,
            } |
            AppError::Conflict {
                message,
            } |
            AppError::Protected {
                message,
            } |
            AppError::Internal {
                message,
            } |
            AppError::Database {
                message,
            } |
            AppError::Io {
                message,
            } |
            AppError::Config {
                message,
            } |
            AppError::Migration {
                message,
            } => message.clone(),
        }
    }

    /// Whether the error originates from the client rather than the server.
    pub fn is_client_error(&self) -> bool { self.status().is_client_error() }

    /// Add context to the error, keeping its kind.
    #[inline]
    pub fn context(self, context: impl ToString) -> Self {
        let context_msg = context.to_string();
        let prefix = |message: String| format!("{}: {}", context_msg, message);
        match self {
            AppError::NotFound {
                message,
            } => {
                Self::NotFound {
                    message: prefix(message),
                }
            },
            AppError::BadRequest {
                message,
            } => {
                Self::BadRequest {
                    message: prefix(message),
                }
            },
            AppError::Validation {
                message,
            } => {
                Self::Validation {
                    message: prefix(message),
                }
            },
            AppError::Conflict {
                message,
            } => {
                Self::Conflict {
                    message: prefix(message),
                }
            },
            AppError::Protected {
                message,
            } => {
                Self::Protected {
                    message: prefix(message),
                }
            },
            AppError::Internal {
                message,
            } => {
                Self::Internal {
                    message: prefix(message),
                }
            },
            AppError::Database {
                message,
            } => {
                Self::Database {
                    message: prefix(message),
                }
            },
            AppError::Io {
                message,
            } => {
                Self::Io {
                    message: prefix(message),
                }
            },
            AppError::Config {
                message,
            } => {
                Self::Config {
                    message: prefix(message),
                }
            },
            AppError::Migration {
                message,
            } => {
                Self::Migration {
                    message: prefix(message),
                }
            },
        }
    }
}

/// Convert anyhow errors to AppError.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal {
            message: err.to_string(),
        }
    }
}

/// Convert std::io errors to AppError.
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

/// Convert Sea-ORM database errors to AppError.
///
/// Constraint violations are client errors: a duplicate unique value or a
/// dangling/blocked foreign key is reported as a conflict.
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => {
                Self::Conflict {
                    message: format!("A record with the same unique value already exists ({})", detail),
                }
            },
            Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(detail)) => {
                Self::Conflict {
                    message: format!("Operation violates a reference between records ({})", detail),
                }
            },
            _ => {
                Self::Database {
                    message: err.to_string(),
                }
            },
        }
    }
}

/// Convert validator validation errors to AppError.
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = err
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors
                    .iter()
                    .map(|e| {
                        let text = e
                            .message
                            .as_ref()
                            .map(|s| s.to_string())
                            .unwrap_or_else(|| "Invalid value".to_string());
                        format!("{}: {}", field, text)
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        messages.sort();

        let message = if messages.is_empty() {
            "Validation failed".to_string()
        }
        else {
            messages.join(", ")
        };

        Self::Validation {
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_not_found() {
        let err = AppError::not_found("OKR not found");
        assert_eq!(err.status(), http::StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "NOT_FOUND");
        assert!(err.to_string().contains("NotFound"));
    }

    #[test]
    fn test_error_bad_request() {
        let err = AppError::bad_request("task_id parameter is required");
        assert_eq!(err.status(), http::StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "BAD_REQUEST");
    }

    #[test]
    fn test_error_protected() {
        let err = AppError::protected("Department still owns OKRs");
        assert_eq!(err.status(), http::StatusCode::CONFLICT);
        assert_eq!(err.code(), "PROTECTED");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_error_validation() {
        let err = AppError::validation("name: This field is required");
        assert_eq!(err.status(), http::StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_server_errors_are_not_client_errors() {
        assert!(!AppError::database("boom").is_client_error());
        assert!(!AppError::internal("boom").is_client_error());
        assert!(!AppError::migration("boom").is_client_error());
    }

    #[test]
    fn test_context_keeps_kind() {
        let err = AppError::conflict("duplicate").context("Creating department");
        assert_eq!(err.code(), "CONFLICT");
        assert_eq!(err.message(), "Creating department: duplicate");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: AppError = io_err.into();
        assert_eq!(err.code(), "IO_ERROR");
    }

    #[test]
    fn test_from_anyhow() {
        let err: AppError = anyhow::anyhow!("boom").into();
        assert_eq!(err.code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_from_plain_db_error() {
        let err: AppError = sea_orm::DbErr::Custom("connection reset".to_string()).into();
        assert_eq!(err.code(), "DATABASE_ERROR");
        assert_eq!(err.status(), http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_from_validation_errors() {
        use validator::Validate;

        #[derive(Validate)]
        struct Payload {
            #[validate(length(min = 1, message = "Name must not be blank"))]
            name: String,
        }

        let errors = Payload {
            name: String::new(),
        }
        .validate()
        .unwrap_err();
        let app_error: AppError = errors.into();

        match app_error {
            AppError::Validation {
                message,
            } => {
                assert_eq!(message, "name: Name must not be blank");
            },
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }
}
