//! Integration tests for contact endpoints.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_contact_round_trip() {
    let app = TestApp::new().await;
    let token = app.signup_and_login("alice").await;
    let person = app.create_person(&token, "Jon", "Doe").await;

    let created = app
        .create_contact(&token, &person, "jon@example.com", "+380501112233", "1990-06-05")
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(created.body["data"]["blocked"], false);

    let fetched = app.request("GET", &format!("/api/contacts/{id}"), None, Some(&token)).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["data"]["email"], "jon@example.com");
    assert_eq!(fetched.body["data"]["date_of_birth"], "1990-06-05");
    assert_eq!(fetched.body["data"]["person_id"], person.as_str());

    let by_email = app
        .request("GET", "/api/contacts/by-email/jon@example.com", None, Some(&token))
        .await;
    assert_eq!(by_email.body["data"]["id"], id.as_str());

    let by_phone = app
        .request("GET", "/api/contacts/by-phone/+380501112233", None, Some(&token))
        .await;
    assert_eq!(by_phone.status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_delete_and_missing() {
    let app = TestApp::new().await;
    let token = app.signup_and_login("alice").await;
    let person = app.create_person(&token, "Jon", "Doe").await;
    let created = app
        .create_contact(&token, &person, "jon@example.com", "+380501112233", "1990-06-05")
        .await;
    let id = created.body["data"]["id"].as_str().unwrap().to_string();

    let updated = app
        .request(
            "PUT",
            &format!("/api/contacts/{id}"),
            Some(json!({
                "person_id": person,
                "email": "jon.doe@example.com",
                "phone": "+380507778899",
                "date_of_birth": "1985-01-02",
                "note": "college",
                "blocked": true,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["email"], "jon.doe@example.com");
    assert_eq!(updated.body["data"]["note"], "college");
    assert_eq!(updated.body["data"]["blocked"], true);

    let missing_id = "0190a5b2-3c4d-7e8f-9a0b-1c2d3e4f5a6b";
    let missing = app
        .request(
            "PUT",
            &format!("/api/contacts/{missing_id}"),
            Some(json!({
                "person_id": person,
                "email": "x@example.com",
                "phone": "+380500000000",
                "date_of_birth": "1985-01-02",
                "note": null,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["message"], "Contact not found");

    let deleted = app.request("DELETE", &format!("/api/contacts/{id}"), None, Some(&token)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    let again = app.request("DELETE", &format!("/api/contacts/{id}"), None, Some(&token)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_owner_isolation() {
    let app = TestApp::new().await;
    let alice = app.signup_and_login("alice").await;
    let bob = app.signup_and_login("bob").await;
    let person = app.create_person(&alice, "Jon", "Doe").await;
    let created = app
        .create_contact(&alice, &person, "jon@example.com", "+380501112233", "1990-06-05")
        .await;
    let id = created.body["data"]["id"].as_str().unwrap().to_string();

    let peek = app.request("GET", &format!("/api/contacts/{id}"), None, Some(&bob)).await;
    assert_eq!(peek.status, StatusCode::NOT_FOUND);

    let list = app.request("GET", "/api/contacts", None, Some(&bob)).await;
    assert!(list.body["data"].as_array().unwrap().is_empty());

    // bob cannot attach a contact to alice's person
    let foreign = app
        .create_contact(&bob, &person, "bob@example.com", "+380509990000", "1990-06-05")
        .await;
    assert_eq!(foreign.status, StatusCode::NOT_FOUND);
    assert_eq!(foreign.body["message"], "Person not found");
}

#[tokio::test]
async fn test_duplicate_email_and_phone() {
    let app = TestApp::new().await;
    let alice = app.signup_and_login("alice").await;
    let bob = app.signup_and_login("bob").await;
    let jon = app.create_person(&alice, "Jon", "Doe").await;
    let ann = app.create_person(&bob, "Ann", "Lee").await;
    app.create_contact(&alice, &jon, "jon@example.com", "+380501112233", "1990-06-05")
        .await;

    let email = app
        .create_contact(&bob, &ann, "jon@example.com", "+380509990000", "1990-06-05")
        .await;
    assert_eq!(email.status, StatusCode::CONFLICT);
    assert_eq!(email.body["message"], "Contact with this email already exists");

    let phone = app
        .create_contact(&bob, &ann, "ann@example.com", "+380501112233", "1990-06-05")
        .await;
    assert_eq!(phone.status, StatusCode::CONFLICT);
    assert_eq!(phone.body["message"], "Contact with this phone already exists");
}

#[tokio::test]
async fn test_validation_errors() {
    let app = TestApp::new().await;
    let token = app.signup_and_login("alice").await;
    let person = app.create_person(&token, "Jon", "Doe").await;

    let bad_email = app
        .create_contact(&token, &person, "nope", "+380501112233", "1990-06-05")
        .await;
    assert_eq!(bad_email.status, StatusCode::UNPROCESSABLE_ENTITY);

    let short_phone = app
        .create_contact(&token, &person, "jon@example.com", "123", "1990-06-05")
        .await;
    assert_eq!(short_phone.status, StatusCode::UNPROCESSABLE_ENTITY);

    let bad_date = app
        .create_contact(&token, &person, "jon@example.com", "+380501112233", "1990-13-40")
        .await;
    assert_eq!(bad_date.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_pagination() {
    let app = TestApp::new().await;
    let token = app.signup_and_login("alice").await;
    let person = app.create_person(&token, "Jon", "Doe").await;
    for i in 0..5 {
        let created = app
            .create_contact(
                &token,
                &person,
                &format!("jon{i}@example.com"),
                &format!("+38050000000{i}"),
                "1990-06-05",
            )
            .await;
        assert_eq!(created.status, StatusCode::CREATED);
    }

    let page = app
        .request("GET", "/api/contacts?limit=2&offset=1", None, Some(&token))
        .await;
    let items = page.body["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["email"], "jon1@example.com");
    assert_eq!(items[1]["email"], "jon2@example.com");

    let too_big = app.request("GET", "/api/contacts?limit=301", None, Some(&token)).await;
    assert_eq!(too_big.status, StatusCode::UNPROCESSABLE_ENTITY);

    let max = app.request("GET", "/api/contacts?limit=300", None, Some(&token)).await;
    assert_eq!(max.body["data"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_blacklist_toggle() {
    let app = TestApp::new().await;
    let token = app.signup_and_login("alice").await;
    let person = app.create_person(&token, "Jon", "Doe").await;
    let created = app
        .create_contact(&token, &person, "jon@example.com", "+380501112233", "1990-06-05")
        .await;
    let id = created.body["data"]["id"].as_str().unwrap().to_string();

    let blocked = app
        .request(
            "PATCH",
            &format!("/api/contacts/{id}/blacklist"),
            Some(json!({ "blocked": true })),
            Some(&token),
        )
        .await;
    assert_eq!(blocked.status, StatusCode::OK);
    assert_eq!(blocked.body["data"]["blocked"], true);

    let unblocked = app
        .request(
            "PATCH",
            &format!("/api/contacts/{id}/blacklist"),
            Some(json!({ "blocked": false })),
            Some(&token),
        )
        .await;
    assert_eq!(unblocked.body["data"]["blocked"], false);
}

#[tokio::test]
async fn test_search() {
    let app = TestApp::new().await;
    let token = app.signup_and_login("alice").await;
    let jon = app.create_person(&token, "Jon", "Doe").await;
    let first = app
        .create_contact(&token, &jon, "jon@example.com", "+380501112233", "1990-06-05")
        .await;
    app.create_contact(&token, &jon, "jon.work@example.com", "+380501112244", "1990-06-05")
        .await;

    let by_name = app
        .request("GET", "/api/contacts/search?find=Jon", None, Some(&token))
        .await;
    assert_eq!(by_name.status, StatusCode::OK);
    let found = by_name.body["data"].as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["id"], first.body["data"]["id"]);

    let by_email = app
        .request("GET", "/api/contacts/search?find=jon.work@example.com", None, Some(&token))
        .await;
    assert_eq!(by_email.body["data"][0]["email"], "jon.work@example.com");

    let nothing = app
        .request("GET", "/api/contacts/search?find=Nobody", None, Some(&token))
        .await;
    assert_eq!(nothing.status, StatusCode::NOT_FOUND);

    let short = app
        .request("GET", "/api/contacts/search?find=J", None, Some(&token))
        .await;
    assert_eq!(short.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_birthdays_window() {
    // TestApp pins today to 2024-06-01
    let app = TestApp::new().await;
    let token = app.signup_and_login("alice").await;
    let person = app.create_person(&token, "Jon", "Doe").await;

    let empty = app.request("GET", "/api/contacts/birthdays", None, Some(&token)).await;
    assert_eq!(empty.status, StatusCode::NO_CONTENT);

    app.create_contact(&token, &person, "in@example.com", "+380500000001", "1990-06-05")
        .await;
    app.create_contact(&token, &person, "out@example.com", "+380500000002", "1990-06-09")
        .await;
    app.create_contact(&token, &person, "past@example.com", "+380500000003", "1990-05-31")
        .await;

    let upcoming = app.request("GET", "/api/contacts/birthdays", None, Some(&token)).await;
    assert_eq!(upcoming.status, StatusCode::OK);
    let items = upcoming.body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["email"], "in@example.com");
}
