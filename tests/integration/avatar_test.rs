//! Integration tests for avatar upload and static serving.

use std::io::Cursor;

use axum::body::Body;
use axum::http::{Request, StatusCode};

use crate::helpers::TestApp;

const BOUNDARY: &str = "contactbook-test-boundary";

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = image::DynamicImage::new_rgb8(width, height);
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

fn multipart_upload(token: &str, field: &str, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"avatar.png\"\r\n\
             Content-Type: image/png\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("PATCH")
        .uri("/api/users/avatar")
        .header("Authorization", format!("Bearer {token}"))
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_avatar_upload_is_served_as_square_png() {
    let app = TestApp::new().await;
    let token = app.signup_and_login("alice").await;

    let response = app.send(multipart_upload(&token, "file", &png(640, 480))).await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let url = response.body["data"]["avatar_url"].as_str().unwrap().to_string();
    let base = &app.config.storage.avatar.public_base_url;
    assert!(url.starts_with(&format!("{base}/avatars/contactbook/")));

    let me = app.request("GET", "/api/users/me", None, Some(&token)).await;
    assert_eq!(me.body["data"]["avatar_url"], url.as_str());

    let path = url
        .trim_start_matches(base.as_str())
        .split('?')
        .next()
        .unwrap()
        .to_string();
    let served = app
        .send(
            Request::builder()
                .uri(format!("/static{path}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(served.status, StatusCode::OK);

    let img = image::load_from_memory(&served.raw).unwrap();
    assert_eq!((img.width(), img.height()), (250, 250));
}

#[tokio::test]
async fn test_avatar_requires_file_field_and_image() {
    let app = TestApp::new().await;
    let token = app.signup_and_login("alice").await;

    let wrong_field = app.send(multipart_upload(&token, "picture", &png(10, 10))).await;
    assert_eq!(wrong_field.status, StatusCode::UNPROCESSABLE_ENTITY);

    let garbage = app.send(multipart_upload(&token, "file", b"definitely not a png")).await;
    assert_eq!(garbage.status, StatusCode::UNPROCESSABLE_ENTITY);
}
