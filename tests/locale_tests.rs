// SPDX-License-Identifier: MIT

//! Locale cookie endpoint tests.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

async fn set_locale(locale: &str) -> axum::response::Response {
    let (app, _) = common::create_test_app();
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/locale")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                serde_json::json!({ "locale": locale }).to_string(),
            ))
            .unwrap(),
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn supported_locale_is_written() {
    let response = set_locale("ko").await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.starts_with("locale=ko"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=31536000"));
    assert!(!cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn unsupported_locale_falls_back_to_the_default() {
    let response = set_locale("zz").await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.starts_with("locale=en"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["locale"], "en");
}
