//! Integration tests for person endpoints.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_person_crud() {
    let app = TestApp::new().await;
    let token = app.signup_and_login("alice").await;
    let id = app.create_person(&token, "Jon", "Doe").await;

    let fetched = app.request("GET", &format!("/api/persons/{id}"), None, Some(&token)).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["data"]["first_name"], "Jon");

    let updated = app
        .request(
            "PUT",
            &format!("/api/persons/{id}"),
            Some(json!({ "first_name": "John", "last_name": "Doe" })),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["first_name"], "John");

    let list = app.request("GET", "/api/persons", None, Some(&token)).await;
    assert_eq!(list.body["data"].as_array().unwrap().len(), 1);

    let deleted = app.request("DELETE", &format!("/api/persons/{id}"), None, Some(&token)).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["data"]["id"], id.as_str());

    let gone = app.request("GET", &format!("/api/persons/{id}"), None, Some(&token)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.body["message"], "Person not found");
}

#[tokio::test]
async fn test_duplicate_name_conflicts_per_owner() {
    let app = TestApp::new().await;
    let alice = app.signup_and_login("alice").await;
    let bob = app.signup_and_login("bob").await;
    app.create_person(&alice, "Jon", "Doe").await;

    let dup = app
        .request(
            "POST",
            "/api/persons",
            Some(json!({ "first_name": "Jon", "last_name": "Doe" })),
            Some(&alice),
        )
        .await;
    assert_eq!(dup.status, StatusCode::CONFLICT);

    // another owner may use the same name
    app.create_person(&bob, "Jon", "Doe").await;
}

#[tokio::test]
async fn test_person_delete_cascades() {
    let app = TestApp::new().await;
    let token = app.signup_and_login("alice").await;
    let id = app.create_person(&token, "Jon", "Doe").await;
    let contact = app
        .create_contact(&token, &id, "jon@example.com", "+380501112233", "1990-06-05")
        .await;
    assert_eq!(contact.status, StatusCode::CREATED);

    let listed = app
        .request("GET", &format!("/api/persons/{id}/contacts"), None, Some(&token))
        .await;
    assert_eq!(listed.body["data"].as_array().unwrap().len(), 1);

    app.request("DELETE", &format!("/api/persons/{id}"), None, Some(&token)).await;

    let contacts = app.request("GET", "/api/contacts", None, Some(&token)).await;
    assert!(contacts.body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_person_body() {
    let app = TestApp::new().await;
    let token = app.signup_and_login("alice").await;

    let response = app
        .request(
            "POST",
            "/api/persons",
            Some(json!({ "first_name": "", "last_name": "Doe" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body["details"]["first_name"].is_array());
}
