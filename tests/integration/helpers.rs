//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use chrono::NaiveDate;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use contactbook_api::{AppState, build_app};
use contactbook_cache::provider::CacheManager;
use contactbook_core::config::{AppConfig, RateLimitConfig, RateLimitRule};
use contactbook_core::traits::{Clock, FixedClock};
use contactbook_database::Database;
use contactbook_storage::LocalStorageProvider;

/// Password that satisfies the sign-up strength policy.
pub const PASSWORD: &str = "Vx9#mQ2!tLp7&wZ";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
    /// Scratch storage root, removed on drop
    _storage_dir: TempDir,
}

impl TestApp {
    /// App with generous rate limits and "today" pinned to 2024-06-01.
    pub async fn new() -> Self {
        let generous = RateLimitRule::new(10_000, 1);
        Self::with_options(
            FixedClock(NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")),
            RateLimitConfig {
                enabled: true,
                reads: generous,
                writes: generous,
                lookups: generous,
            },
        )
        .await
    }

    pub async fn with_options(clock: impl Clock, rate_limit: RateLimitConfig) -> Self {
        let storage_dir = tempfile::tempdir().expect("Failed to create storage dir");

        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-test-secret".to_string();
        config.storage.root_path = storage_dir.path().display().to_string();
        config.rate_limit = rate_limit;

        let cache = Arc::new(
            CacheManager::new(&config.cache)
                .await
                .expect("Failed to init cache"),
        );
        let storage = LocalStorageProvider::new(storage_dir.path())
            .await
            .expect("Failed to init storage");

        let state = AppState::new(
            config.clone(),
            Database::memory(),
            cache,
            Arc::new(storage),
            Arc::new(clock),
        );

        Self {
            router: build_app(state),
            config,
            _storage_dir: storage_dir,
        }
    }

    /// Register an account and return an access token for it.
    pub async fn signup_and_login(&self, username: &str) -> String {
        let email = format!("{username}@example.com");
        let signup = self
            .request(
                "POST",
                "/api/auth/signup",
                Some(json!({ "username": username, "email": email, "password": PASSWORD })),
                None,
            )
            .await;
        assert_eq!(signup.status, StatusCode::CREATED, "Signup failed: {:?}", signup.body);

        self.login(&email).await["access_token"]
            .as_str()
            .expect("No access_token in login response")
            .to_string()
    }

    /// Log in and return the token payload.
    pub async fn login(&self, email: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(json!({ "email": email, "password": PASSWORD })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "Login failed: {:?}", response.body);
        response.body["data"].clone()
    }

    /// Create a person and return its id.
    pub async fn create_person(&self, token: &str, first_name: &str, last_name: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/persons",
                Some(json!({ "first_name": first_name, "last_name": last_name })),
                Some(token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["data"]["id"].as_str().expect("person id").to_string()
    }

    /// Create a contact and return the response.
    pub async fn create_contact(
        &self,
        token: &str,
        person_id: &str,
        email: &str,
        phone: &str,
        date_of_birth: &str,
    ) -> TestResponse {
        self.request(
            "POST",
            "/api/contacts",
            Some(json!({
                "person_id": person_id,
                "email": email,
                "phone": phone,
                "date_of_birth": date_of_birth,
                "note": null,
            })),
            Some(token),
        )
        .await
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        self.send(req.body(Body::from(body_str)).expect("Failed to build request"))
            .await
    }

    /// Send a prebuilt request
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let raw = axum::body::to_bytes(response.into_body(), 4 * 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&raw).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
            raw,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed JSON body (`Null` when not JSON)
    pub body: Value,
    pub raw: Bytes,
}
