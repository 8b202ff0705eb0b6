// SPDX-License-Identifier: MIT

//! Profile routes: read, first-time onboarding, and edit.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::cookies;
use crate::models::{Profile, ProfileUpdate};
use crate::routes::{paths, ValidationErrorBody};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/profile/{user_id}", get(get_profile))
        .route("/api/profile/{user_id}", patch(update_profile))
        .route("/api/onboarding", post(complete_onboarding))
}

/// Fetch a profile row.
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Profile>> {
    let profile = state
        .profiles
        .get(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {user_id} not found")))?;
    Ok(Json(profile))
}

/// Envelope for profile mutations. Store rejections land in `error`;
/// nothing is partially committed.
#[derive(Serialize)]
pub struct MutationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    pub error: Option<String>,
}

#[derive(Deserialize)]
pub struct OnboardingRequest {
    pub user_id: String,
    #[serde(flatten)]
    pub profile: ProfileUpdate,
}

/// Finish first-time onboarding.
///
/// Validates the required subset, writes the collected fields, and sets
/// the `profile_complete` cookie directly: the required-field check
/// here lists exactly the completeness rule's fields, so a draft that
/// passes it is complete by construction (see
/// `ProfileUpdate::missing_required_fields`).
async fn complete_onboarding(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(request): Json<OnboardingRequest>,
) -> Response {
    let missing = request.profile.missing_required_fields();
    if !missing.is_empty() {
        return ValidationErrorBody::missing(&missing).into_response();
    }

    if let Err(err) = state.profiles.update(&request.user_id, &request.profile).await {
        tracing::warn!(error = %err, user_id = %request.user_id, "onboarding update rejected");
        return Json(MutationResponse {
            destination: None,
            error: Some(err.to_string()),
        })
        .into_response();
    }

    let jar = cookies::profile_complete_cookie(jar, state.config.secure_cookies);
    tracing::info!(user_id = %request.user_id, "onboarding complete");

    (
        jar,
        Json(MutationResponse {
            destination: Some(paths::PROFILE.to_string()),
            error: None,
        }),
    )
        .into_response()
}

/// Edit an existing profile. Same required subset as onboarding; the
/// completeness cookie is already set and stays untouched.
async fn update_profile(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(changes): Json<ProfileUpdate>,
) -> Response {
    let missing = changes.missing_required_fields();
    if !missing.is_empty() {
        return ValidationErrorBody::missing(&missing).into_response();
    }

    if let Err(err) = state.profiles.update(&user_id, &changes).await {
        tracing::warn!(error = %err, user_id = %user_id, "profile update rejected");
        return Json(MutationResponse {
            destination: None,
            error: Some(err.to_string()),
        })
        .into_response();
    }

    tracing::info!(user_id = %user_id, "profile updated");
    Json(MutationResponse {
        destination: None,
        error: None,
    })
    .into_response()
}
