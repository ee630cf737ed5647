//! # Rejection Conversions
//!
//! Converts Axum extractor rejections into [`AppError`] so malformed requests
//! get the same envelope as every other failure. Extractors name
//! [`AppError`] as their rejection type, or handlers take
//! `Result<Json<T>, JsonRejection>` and apply `?`.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};

use crate::AppError;

/// Turn serde's "missing field `x` at line 1 column 2" into "x: This field is required."
fn missing_field_message(error_message: &str) -> Option<String> {
    let start = error_message.find("missing field `")? + "missing field `".len();
    let end = error_message[start ..].find('`')?;
    Some(format!(
        "{}: This field is required.",
        &error_message[start .. start + end]
    ))
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => {
                let text = err.body_text();
                match missing_field_message(&text) {
                    Some(message) => AppError::validation(message),
                    None => AppError::validation(text),
                }
            },
            JsonRejection::JsonSyntaxError(err) => AppError::bad_request(format!("Malformed JSON: {}", err.body_text())),
            JsonRejection::MissingJsonContentType(_) => {
                AppError::bad_request("Expected request with `Content-Type: application/json`")
            },
            other => AppError::bad_request(other.body_text()),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(format!("Query string deserialization error: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(rejection = %rejection.body_text(), "Path parameter rejected");
        AppError::not_found("Not found.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let msg = missing_field_message("Failed to deserialize the JSON body into the target type: missing field `name` at line 1 column 2");
        assert_eq!(msg.as_deref(), Some("name: This field is required."));
    }

    #[test]
    fn test_other_messages_pass_through() {
        assert_eq!(missing_field_message("invalid type: string \"x\", expected i32"), None);
    }
}
