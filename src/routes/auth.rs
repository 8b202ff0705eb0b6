// SPDX-License-Identifier: MIT

//! Auth routes: login, signup, logout, and the provider redirect
//! callback that reconciles session and profile state.

use axum::{
    extract::{Query, RawQuery, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::Result;
use crate::middleware::cookies;
use crate::models::{AuthUser, Profile};
use crate::routes::{field_errors_from, paths, ValidationErrorBody};
use crate::services::{reconcile, Reconciler};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/logout", post(logout))
        .route("/auth/callback", get(auth_callback))
}

/// Envelope returned by the login/signup endpoints. Provider failures
/// land in `error` instead of an HTTP error status.
#[derive(Serialize)]
pub struct AuthResponse {
    pub user: Option<AuthUser>,
    pub profile: Option<Profile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    pub error: Option<String>,
}

impl AuthResponse {
    fn failure(message: String) -> Self {
        Self {
            user: None,
            profile: None,
            destination: None,
            error: Some(message),
        }
    }
}

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "email is invalid"))]
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginQuery {
    /// Page to land on after a successful login with a complete profile.
    #[serde(default)]
    pub redirect: Option<String>,
}

/// Password login. On success the session cookie pair is written and
/// the response names the landing page: onboarding when the profile is
/// incomplete, otherwise the requested redirect or home.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(query): Query<LoginQuery>,
    Json(request): Json<LoginRequest>,
) -> Result<Response> {
    if let Err(errors) = request.validate() {
        return Ok(ValidationErrorBody::new(field_errors_from(&errors)).into_response());
    }

    let session = match state
        .auth
        .sign_in_with_password(&request.email, &request.password)
        .await
    {
        Ok(session) => session,
        Err(err) => {
            tracing::info!(email = %request.email, error = %err, "login rejected");
            return Ok(Json(AuthResponse::failure(err.to_string())).into_response());
        }
    };

    // Profile fetch failure is not a login failure; the user simply
    // starts out incomplete and lands on onboarding.
    let profile = match state.profiles.get(&session.user.id).await {
        Ok(profile) => profile,
        Err(err) => {
            tracing::warn!(error = %err, user_id = %session.user.id, "profile fetch failed at login");
            None
        }
    };
    let complete = profile.as_ref().is_some_and(Profile::is_complete);

    let jar = cookies::login_cookies(jar, complete, state.config.secure_cookies);

    let destination = if complete {
        query.redirect.unwrap_or_else(|| paths::HOME.to_string())
    } else {
        paths::ONBOARDING.to_string()
    };

    tracing::info!(user_id = %session.user.id, profile_complete = complete, "login successful");

    let body = AuthResponse {
        user: Some(session.user),
        profile,
        destination: Some(destination),
        error: None,
    };
    Ok((jar, Json(body)).into_response())
}

#[derive(Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "email is invalid"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    pub confirm_password: String,
}

/// Register a new account. Local validation failures never reach the
/// provider; the user confirms by email and then logs in.
async fn signup(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SignupRequest>,
) -> Result<Response> {
    if request.password != request.confirm_password {
        let mut errors = std::collections::BTreeMap::new();
        errors.insert(
            "confirm_password".to_string(),
            "passwords do not match".to_string(),
        );
        return Ok(ValidationErrorBody::new(errors).into_response());
    }
    if let Err(errors) = request.validate() {
        return Ok(ValidationErrorBody::new(field_errors_from(&errors)).into_response());
    }

    let user = match state.auth.sign_up(&request.email, &request.password).await {
        Ok(user) => user,
        Err(err) => {
            tracing::info!(email = %request.email, error = %err, "signup rejected");
            return Ok(Json(AuthResponse::failure(err.to_string())).into_response());
        }
    };

    tracing::info!(user_id = %user.id, "signup successful");

    let body = AuthResponse {
        user: Some(user),
        profile: None,
        destination: Some(paths::LOGIN.to_string()),
        error: None,
    };
    Ok(Json(body).into_response())
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub error: Option<String>,
}

/// Sign out. Both session flags are cleared even if the provider call
/// fails; the failure is reported in the envelope.
async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Json<LogoutResponse>) {
    let error = state.auth.sign_out().await.err().map(|e| e.to_string());
    if let Some(err) = &error {
        tracing::warn!(error = %err, "provider sign-out failed");
    }
    let jar = cookies::clear_auth_cookies(jar);
    (jar, Json(LogoutResponse { error }))
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Identity-provider redirect target.
///
/// Only runs the reconciliation when the URL carries redirect markers.
/// The code exchange runs concurrently with the session check: the
/// provider may have established the session through another path
/// already, or it may resolve only after the exchange completes. Either
/// ordering ends in exactly one redirect.
async fn auth_callback(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    RawQuery(raw_query): RawQuery,
    Query(params): Query<CallbackParams>,
) -> Response {
    let raw_query = raw_query.unwrap_or_default();
    if !reconcile::has_redirect_markers(&raw_query) {
        return Redirect::temporary(paths::HOME).into_response();
    }

    if let Some(err) = params.error {
        tracing::warn!(error = %err, "provider redirect carried an error");
        return Redirect::temporary(paths::LOGIN).into_response();
    }

    let reconciler = Reconciler::new(state.auth.clone(), state.profiles.clone());

    let auth = state.auth.clone();
    let exchange = async move {
        match params.code {
            Some(code) => auth.exchange_code(&code).await.map(|_| ()),
            // Token-in-fragment flows resolve through the event stream.
            None => Ok(()),
        }
    };
    tokio::pin!(exchange);

    let run = reconciler.run();
    tokio::pin!(run);

    let outcome = tokio::select! {
        outcome = &mut run => outcome,
        result = &mut exchange => match result {
            Ok(()) => run.await,
            Err(err) => {
                tracing::warn!(error = %err, "code exchange failed");
                None
            }
        },
    };

    match outcome {
        Some(reconciled) => {
            let jar =
                cookies::login_cookies(jar, reconciled.profile_complete, state.config.secure_cookies);
            tracing::info!(
                profile_complete = reconciled.profile_complete,
                destination = reconciled.destination,
                "reconciliation complete"
            );
            (jar, Redirect::temporary(reconciled.destination)).into_response()
        }
        None => Redirect::temporary(paths::LOGIN).into_response(),
    }
}
