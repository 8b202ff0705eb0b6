// SPDX-License-Identifier: MIT

//! Reconciliation race tests.
//!
//! The listener must handle both orderings - session resolved before it
//! starts, or only after an auth event - and must navigate exactly once
//! with no subscription left behind.

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use gymbuddy::models::{AuthUser, Session};
use gymbuddy::services::{AuthEvent, AuthClient, ProfileStore, Reconciler};
use tower::ServiceExt;

mod common;

fn session_for(id: &str) -> Session {
    Session {
        access_token: format!("token-{id}"),
        refresh_token: None,
        expires_in: Some(3600),
        user: AuthUser {
            id: id.to_string(),
            email: None,
        },
    }
}

fn mock_auth() -> AuthClient {
    AuthClient::new_mock(
        [(common::USER_EMAIL, common::USER_PASSWORD, common::USER_ID)],
        [(common::AUTH_CODE, common::USER_EMAIL)],
    )
}

#[tokio::test]
async fn session_available_synchronously_resolves_without_subscribing() {
    let auth = mock_auth();
    auth.emit(AuthEvent::SignedIn(session_for(common::USER_ID)))
        .await;

    let reconciler = Reconciler::new(auth.clone(), ProfileStore::new_mock());
    let outcome = reconciler.run().await.expect("reconciled");

    // No profile row yet: incomplete, onboarding.
    assert!(!outcome.profile_complete);
    assert_eq!(outcome.destination, "/onboarding");
    assert_eq!(auth.receiver_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn delayed_sign_in_event_resolves_exactly_once() {
    let auth = mock_auth();
    let profiles = ProfileStore::new_mock();
    profiles.mock_insert(common::complete_profile(common::USER_ID));

    let reconciler = Reconciler::new(auth.clone(), profiles);

    let emitter = {
        let auth = auth.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            auth.emit(AuthEvent::SignedIn(session_for(common::USER_ID)))
                .await;
        })
    };

    let started = tokio::time::Instant::now();
    let outcome = reconciler.run().await.expect("reconciled");
    emitter.await.unwrap();

    // Resolved only after the event fired.
    assert!(started.elapsed() >= Duration::from_millis(50));
    assert!(outcome.profile_complete);
    assert_eq!(outcome.destination, "/profile");
    // The one-shot subscription tore itself down.
    assert_eq!(auth.receiver_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn unrelated_events_are_ignored_until_a_sign_in() {
    let auth = mock_auth();
    let reconciler = Reconciler::new(auth.clone(), ProfileStore::new_mock());

    let emitter = {
        let auth = auth.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            auth.emit(AuthEvent::SignedOut).await;
            tokio::time::sleep(Duration::from_millis(10)).await;
            auth.emit(AuthEvent::InitialSession(session_for(common::USER_ID)))
                .await;
        })
    };

    let outcome = reconciler.run().await.expect("reconciled");
    emitter.await.unwrap();

    assert_eq!(outcome.destination, "/onboarding");
    assert_eq!(auth.receiver_count(), 0);
}

#[tokio::test]
async fn callback_with_code_reconciles_and_sets_cookies() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/auth/callback?code={}", common::AUTH_CODE))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/onboarding"
    );

    let cookies: Vec<String> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert!(cookies
        .iter()
        .any(|c| c.starts_with("auth_logged_in=1")));
}

#[tokio::test]
async fn callback_with_complete_profile_lands_on_profile() {
    let (app, state) = common::create_test_app();
    state
        .profiles
        .mock_insert(common::complete_profile(common::USER_ID));

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/auth/callback?code={}", common::AUTH_CODE))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/profile");

    let cookies: Vec<String> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert!(cookies
        .iter()
        .any(|c| c.starts_with("profile_complete=1")));
}

#[tokio::test]
async fn callback_with_invalid_code_falls_back_to_login() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/callback?code=bogus")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn callback_without_markers_is_a_no_op_redirect_home() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/callback")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}
