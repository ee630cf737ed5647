//! # CORS Configuration
//!
//! Cross-origin settings for browser clients, turned into a `tower-http`
//! [`CorsLayer`].

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

pub const CORS_ALLOWED_ORIGINS_ENV: &str = "OKR_CORS_ALLOWED_ORIGINS";
pub const CORS_MAX_AGE_ENV: &str = "OKR_CORS_MAX_AGE";

/// CORS configuration for the API
#[derive(Clone, Debug)]
pub struct CorsConfig {
    /// Allowed origins; `*` allows any origin
    pub allowed_origins: Vec<String>,
    /// Allowed HTTP methods
    pub allowed_methods: Vec<Method>,
    /// Request headers the server accepts
    pub allowed_headers: Vec<String>,
    /// Response headers the client may read
    pub exposed_headers: Vec<String>,
    /// Maximum age for the preflight cache (seconds)
    pub max_age:         u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allowed_methods: vec![
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ],
            allowed_headers: vec![
                "content-type".to_string(),
                "accept".to_string(),
                "origin".to_string(),
                "x-requested-with".to_string(),
                logging::REQUEST_ID_HEADER.to_string(),
            ],
            exposed_headers: vec![logging::REQUEST_ID_HEADER.to_string()],
            max_age:         3600,
        }
    }
}

impl CorsConfig {
    /// Reads `OKR_CORS_ALLOWED_ORIGINS` (comma separated) and `OKR_CORS_MAX_AGE`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let allowed_origins = std::env::var(CORS_ALLOWED_ORIGINS_ENV)
            .ok()
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|origins| !origins.is_empty())
            .unwrap_or(defaults.allowed_origins);
        let max_age = std::env::var(CORS_MAX_AGE_ENV)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_age);

        Self {
            allowed_origins,
            max_age,
            ..Self::default()
        }
    }

    fn allows_any_origin(&self) -> bool { self.allowed_origins.iter().any(|o| o == "*") }

    /// Builds the layer. Origins or header names that are not valid header
    /// values are dropped.
    pub fn layer(&self) -> CorsLayer {
        let origin = if self.allows_any_origin() {
            AllowOrigin::any()
        }
        else {
            AllowOrigin::list(
                self.allowed_origins
                    .iter()
                    .filter_map(|o| HeaderValue::from_str(o).ok()),
            )
        };

        let headers = |names: &[String]| -> Vec<HeaderName> {
            names
                .iter()
                .filter_map(|n| HeaderName::try_from(n.to_ascii_lowercase()).ok())
                .collect()
        };

        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(self.allowed_methods.clone())
            .allow_headers(headers(&self.allowed_headers))
            .expose_headers(headers(&self.exposed_headers))
            .max_age(Duration::from_secs(self.max_age))
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, extract::Request, http::StatusCode, routing::get, Router};
    use serial_test::serial;
    use tower::ServiceExt;

    use super::*;

    async fn dummy_handler() -> &'static str { "OK" }

    fn app(config: &CorsConfig) -> Router {
        Router::new()
            .route("/test", get(dummy_handler))
            .layer(config.layer())
    }

    #[tokio::test]
    async fn test_cors_wildcard_origin() {
        let request = Request::builder()
            .uri("/test")
            .header("Origin", "http://localhost:3000")
            .body(Body::empty())
            .unwrap();

        let response = app(&CorsConfig::default()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_cors_listed_origin() {
        let config = CorsConfig {
            allowed_origins: vec!["https://okr.example.com".to_string()],
            ..CorsConfig::default()
        };
        let request = Request::builder()
            .uri("/test")
            .header("Origin", "https://okr.example.com")
            .body(Body::empty())
            .unwrap();

        let response = app(&config).oneshot(request).await.unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "https://okr.example.com"
        );
    }

    #[tokio::test]
    async fn test_cors_disallows_unlisted_origin() {
        let config = CorsConfig {
            allowed_origins: vec!["https://okr.example.com".to_string()],
            ..CorsConfig::default()
        };
        let request = Request::builder()
            .uri("/test")
            .header("Origin", "https://evil.example.com")
            .body(Body::empty())
            .unwrap();

        let response = app(&config).oneshot(request).await.unwrap();

        assert!(!response
            .headers()
            .contains_key("access-control-allow-origin"));
    }

    #[tokio::test]
    async fn test_cors_preflight_exposes_request_id() {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/test")
            .header("Origin", "http://localhost:3000")
            .header("Access-Control-Request-Method", "PATCH")
            .body(Body::empty())
            .unwrap();

        let response = app(&CorsConfig::default()).oneshot(request).await.unwrap();

        let methods = response
            .headers()
            .get("access-control-allow-methods")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(methods.contains("PATCH"));
    }

    #[test]
    #[serial]
    fn test_from_env_origins() {
        std::env::set_var(CORS_ALLOWED_ORIGINS_ENV, "https://a.example.com, https://b.example.com");
        std::env::set_var(CORS_MAX_AGE_ENV, "60");
        let config = CorsConfig::from_env();
        std::env::remove_var(CORS_ALLOWED_ORIGINS_ENV);
        std::env::remove_var(CORS_MAX_AGE_ENV);

        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example.com".to_string(), "https://b.example.com".to_string()]
        );
        assert_eq!(config.max_age, 60);
    }

    #[test]
    #[serial]
    fn test_from_env_defaults_to_any_origin() {
        std::env::remove_var(CORS_ALLOWED_ORIGINS_ENV);
        let config = CorsConfig::from_env();
        assert!(config.allows_any_origin());
    }
}
