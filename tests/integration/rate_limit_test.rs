//! Integration tests for per-route rate limiting.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::NaiveDate;

use contactbook_core::config::{RateLimitConfig, RateLimitRule};
use contactbook_core::traits::FixedClock;

use crate::helpers::TestApp;

async fn limited_app() -> TestApp {
    TestApp::with_options(
        FixedClock(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()),
        RateLimitConfig {
            enabled: true,
            reads: RateLimitRule::new(2, 60),
            writes: RateLimitRule::new(1, 60),
            lookups: RateLimitRule::new(1, 60),
        },
    )
    .await
}

fn list_request(token: &str, client: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri("/api/contacts")
        .header("Authorization", format!("Bearer {token}"))
        .header("X-Forwarded-For", client)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_reads_limited_per_client() {
    let app = limited_app().await;
    let token = app.signup_and_login("alice").await;

    for _ in 0..2 {
        let ok = app.send(list_request(&token, "203.0.113.7")).await;
        assert_eq!(ok.status, StatusCode::OK);
    }

    let limited = app.send(list_request(&token, "203.0.113.7")).await;
    assert_eq!(limited.status, StatusCode::TOO_MANY_REQUESTS);
    let retry_after: u64 = limited.headers[header::RETRY_AFTER]
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!((1..=30).contains(&retry_after));

    // a different client has its own bucket
    let other = app.send(list_request(&token, "198.51.100.1")).await;
    assert_eq!(other.status, StatusCode::OK);
}

#[tokio::test]
async fn test_policies_are_separate() {
    let app = limited_app().await;
    let token = app.signup_and_login("alice").await;

    let first = app
        .request("GET", "/api/contacts/birthdays", None, Some(&token))
        .await;
    assert_eq!(first.status, StatusCode::NO_CONTENT);
    let second = app
        .request("GET", "/api/contacts/birthdays", None, Some(&token))
        .await;
    assert_eq!(second.status, StatusCode::TOO_MANY_REQUESTS);

    // lookups being exhausted leaves reads untouched
    let list = app.request("GET", "/api/contacts", None, Some(&token)).await;
    assert_eq!(list.status, StatusCode::OK);

    // persons are not rate limited
    for _ in 0..3 {
        let persons = app.request("GET", "/api/persons", None, Some(&token)).await;
        assert_eq!(persons.status, StatusCode::OK);
    }
}
