//! # API Response Envelope
//!
//! Responses that are not plain resource representations (errors and service
//! endpoints such as `/health`) share a tagged envelope:
//!
//! ```json
//! { "status": "error", "code": "NOT_FOUND", "message": "OKR not found" }
//! ```

use serde::{Deserialize, Serialize};

/// API response type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum ApiResponse<T> {
    /// Success response.
    Success {
        /// Response data.
        data: T,
    },

    /// Error response.
    Error {
        /// Error code.
        code: String,

        /// Error message.
        message: String,
    },
}

impl<T> ApiResponse<T> {
    /// Create a success response with data.
    #[inline]
    pub fn ok(data: T) -> Self {
        ApiResponse::Success {
            data,
        }
    }

    /// Create an error response.
    #[inline]
    pub fn error(code: impl ToString, message: impl ToString) -> Self {
        ApiResponse::Error {
            code:    code.to_string(),
            message: message.to_string(),
        }
    }

    /// Get a reference to the data if this is a success response.
    #[inline]
    pub fn data(&self) -> Option<&T> {
        match self {
            ApiResponse::Success {
                data,
            } => Some(data),
            ApiResponse::Error {
                ..
            } => None,
        }
    }

    /// Check if this is an error response.
    #[inline]
    pub fn is_error(&self) -> bool { matches!(self, ApiResponse::Error { .. }) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_shape() {
        let response = ApiResponse::<()>::error("NOT_FOUND", "OKR not found");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "status": "error", "code": "NOT_FOUND", "message": "OKR not found" })
        );
    }

    #[test]
    fn test_success_envelope_shape() {
        let response = ApiResponse::ok(serde_json::json!({ "uptime_seconds": 3 }));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"]["uptime_seconds"], 3);
        assert_eq!(response.data().unwrap()["uptime_seconds"], 3);
    }

    #[test]
    fn test_is_error() {
        assert!(ApiResponse::<()>::error("CONFLICT", "dup").is_error());
        assert!(!ApiResponse::ok(1).is_error());
    }
}
