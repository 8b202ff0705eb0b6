// SPDX-License-Identifier: MIT

//! Onboarding and profile-edit flows, end to end against the mock
//! store, including the gate evaluation that follows a completed
//! onboarding.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
};
use gymbuddy::models::{Gender, Profile};
use tower::ServiceExt;

mod common;

async fn json_body(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Partially filled row: basics from an earlier session, fitness
/// fields still missing.
fn partial_profile(id: &str) -> Profile {
    let mut profile = Profile::empty(id);
    profile.first_name = Some("A".to_string());
    profile.last_name = Some("B".to_string());
    profile.gender = Some(Gender::Male);
    profile
}

#[tokio::test]
async fn finishing_onboarding_sets_the_flag_and_the_gate_honors_it() {
    let (app, state) = common::create_test_app();
    state.profiles.mock_insert(partial_profile(common::USER_ID));

    // Finish onboarding: the form submits the whole draft, basics
    // included, with the fitness step now filled in.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/onboarding",
            serde_json::json!({
                "user_id": common::USER_ID,
                "first_name": "A",
                "last_name": "B",
                "gender": "male",
                "goal": "fat_loss",
                "experience_level": "beginner",
                "commitment_level": "casual",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("completeness cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("profile_complete=1"));
    assert!(set_cookie.contains("Max-Age=31536000"));

    let body = json_body(response).await;
    assert_eq!(body["error"], serde_json::Value::Null);
    assert_eq!(body["destination"], "/profile");

    // The store row is now complete.
    let row = state
        .profiles
        .get(common::USER_ID)
        .await
        .unwrap()
        .expect("row");
    assert!(row.is_complete());

    // Next navigation to home with both flags redirects to the profile
    // page.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::COOKIE, "auth_logged_in=1; profile_complete=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/profile");
}

#[tokio::test]
async fn onboarding_with_missing_fields_is_rejected_before_the_store() {
    let (app, state) = common::create_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/onboarding",
            serde_json::json!({
                "user_id": common::USER_ID,
                "first_name": "A",
                "last_name": "B",
                "gender": "male",
                // fitness step omitted
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.headers().get(header::SET_COOKIE).is_none());

    let body = json_body(response).await;
    assert_eq!(body["error"], "validation_failed");
    assert_eq!(body["field_errors"]["goal"], "goal is required");
    assert_eq!(
        body["field_errors"]["experience_level"],
        "experience_level is required"
    );

    // Nothing was written.
    assert!(state.profiles.get(common::USER_ID).await.unwrap().is_none());
}

#[tokio::test]
async fn store_rejection_reports_an_error_and_sets_no_cookie() {
    let (app, state) = common::create_test_app();
    state.profiles.mock_fail_updates(true);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/onboarding",
            serde_json::json!({
                "user_id": common::USER_ID,
                "first_name": "A",
                "last_name": "B",
                "gender": "male",
                "goal": "fat_loss",
                "experience_level": "beginner",
                "commitment_level": "casual",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());

    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("update rejected"));
    assert_eq!(body.get("destination"), None);
}

#[tokio::test]
async fn profile_edit_updates_the_row_without_touching_cookies() {
    let (app, state) = common::create_test_app();
    state
        .profiles
        .mock_insert(common::complete_profile(common::USER_ID));

    let response = app
        .oneshot(json_request(
            "PATCH",
            &format!("/api/profile/{}", common::USER_ID),
            serde_json::json!({
                "first_name": "Alexis",
                "last_name": "Kim",
                "gender": "male",
                "goal": "cardio",
                "experience_level": "intermediate",
                "commitment_level": "regular",
                "bio": "early mornings",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());

    let body = json_body(response).await;
    assert_eq!(body["error"], serde_json::Value::Null);

    let row = state
        .profiles
        .get(common::USER_ID)
        .await
        .unwrap()
        .expect("row");
    assert_eq!(row.first_name.as_deref(), Some("Alexis"));
    assert_eq!(row.bio.as_deref(), Some("early mornings"));
    assert!(row.is_complete());
}

#[tokio::test]
async fn profile_edit_enforces_the_same_required_subset() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(json_request(
            "PATCH",
            &format!("/api/profile/{}", common::USER_ID),
            serde_json::json!({
                "first_name": "",
                "bio": "hi",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["field_errors"]["first_name"], "first_name is required");
    assert_eq!(
        body["field_errors"]["commitment_level"],
        "commitment_level is required"
    );
}

#[tokio::test]
async fn get_profile_returns_the_row_or_404() {
    let (app, state) = common::create_test_app();
    state
        .profiles
        .mock_insert(common::complete_profile(common::USER_ID));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/profile/{}", common::USER_ID))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["id"], common::USER_ID);
    assert_eq!(body["first_name"], "Alex");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/profile/nobody")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
