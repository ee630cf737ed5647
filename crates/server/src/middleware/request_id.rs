//! # Request ID Middleware
//!
//! Tags every request with a CUID2 request id. A valid `X-Request-ID` sent by
//! the client is reused, otherwise a fresh one is generated. The id is stored
//! in the request extensions, attached to the request span and echoed back in
//! the response headers.

use std::time::Instant;

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use logging::{request_id::from_header_or_new, RequestId, REQUEST_ID_HEADER};
use tracing::Instrument;

pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id: RequestId = from_header_or_new(
        request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok()),
    );

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    request.extensions_mut().insert(request_id.clone());

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
    );

    let start = Instant::now();
    let mut response = next.run(request).instrument(span.clone()).await;
    let duration_ms = start.elapsed().as_millis();

    span.in_scope(|| {
        logging::log_api_request!(method, path, response.status().as_u16(), duration_ms);
    });

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    response
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::StatusCode, middleware::from_fn, routing::get, Extension, Router};
    use tower::ServiceExt;

    use super::*;

    async fn echo_id(Extension(id): Extension<RequestId>) -> String { id.into_string() }

    fn app() -> Router {
        Router::new()
            .route("/test", get(echo_id))
            .layer(from_fn(request_id_middleware))
    }

    #[tokio::test]
    async fn test_generates_request_id() {
        let request = Request::builder().uri("/test").body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let header = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(!header.is_empty());
    }

    #[tokio::test]
    async fn test_reuses_valid_client_id() {
        let client_id = "clientsuppliedrequestid01";
        let request = Request::builder()
            .uri("/test")
            .header(REQUEST_ID_HEADER, client_id)
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.headers().get(REQUEST_ID_HEADER).unwrap(), client_id);
    }

    #[tokio::test]
    async fn test_replaces_invalid_client_id() {
        let request = Request::builder()
            .uri("/test")
            .header(REQUEST_ID_HEADER, "bad id!")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_ne!(response.headers().get(REQUEST_ID_HEADER).unwrap(), "bad id!");
    }
}
