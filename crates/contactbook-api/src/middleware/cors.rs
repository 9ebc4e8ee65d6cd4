//! CORS policy for browser clients of the contacts API.

use std::time::Duration;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use contactbook_core::config::CorsConfig;

/// `"*"` anywhere in `allowed_origins` opens the API to every origin;
/// otherwise unparsable origins and methods are skipped.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins = if config.allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            config
                .allowed_origins
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok()),
        )
    };

    let methods = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse::<Method>().ok())
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(Any)
        .max_age(Duration::from_secs(config.max_age_seconds))
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, header};
    use axum::routing::get;
    use tower::ServiceExt;

    use super::*;

    fn config(origins: &[&str]) -> CorsConfig {
        CorsConfig {
            allowed_origins: origins.iter().map(|o| o.to_string()).collect(),
            ..CorsConfig::default()
        }
    }

    async fn allowed_origin(config: &CorsConfig, origin: &str) -> Option<String> {
        let app = Router::new()
            .route("/api/contacts", get(|| async { "ok" }))
            .layer(build_cors_layer(config));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/contacts")
                    .header(header::ORIGIN, origin)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn test_listed_origin_is_echoed() {
        let cfg = config(&["https://app.example.com"]);
        assert_eq!(
            allowed_origin(&cfg, "https://app.example.com").await.as_deref(),
            Some("https://app.example.com")
        );
        assert!(allowed_origin(&cfg, "https://evil.example.com").await.is_none());
    }

    #[tokio::test]
    async fn test_wildcard_allows_any_origin() {
        let cfg = config(&["*"]);
        assert_eq!(
            allowed_origin(&cfg, "https://anything.example.com").await.as_deref(),
            Some("*")
        );
    }
}
