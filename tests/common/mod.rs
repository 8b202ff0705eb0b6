// SPDX-License-Identifier: MIT

use gymbuddy::config::Config;
use gymbuddy::models::{CommitmentLevel, ExperienceLevel, Gender, Goal, Profile};
use gymbuddy::routes::create_router;
use gymbuddy::services::{AuthClient, ContentClient, ProfileStore};
use gymbuddy::AppState;
use std::sync::Arc;

/// Credentials known to the mock identity provider.
#[allow(dead_code)]
pub const USER_EMAIL: &str = "alex@example.com";
#[allow(dead_code)]
pub const USER_PASSWORD: &str = "password123";
#[allow(dead_code)]
pub const USER_ID: &str = "user-1";
/// Authorization code the mock provider accepts for USER_EMAIL.
#[allow(dead_code)]
pub const AUTH_CODE: &str = "valid-code";

/// Create a test app with offline mock collaborators.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let auth = AuthClient::new_mock(
        [(USER_EMAIL, USER_PASSWORD, USER_ID)],
        [(AUTH_CODE, USER_EMAIL)],
    );
    let profiles = ProfileStore::new_mock();
    let content = ContentClient::new(&config.content_api_url);

    let state = Arc::new(AppState {
        config,
        auth,
        profiles,
        content,
    });

    (create_router(state.clone()), state)
}

/// A profile row satisfying the completeness rule.
#[allow(dead_code)]
pub fn complete_profile(id: &str) -> Profile {
    let mut profile = Profile::empty(id);
    profile.first_name = Some("Alex".to_string());
    profile.last_name = Some("Kim".to_string());
    profile.gender = Some(Gender::Male);
    profile.goal = Some(Goal::MuscleGain);
    profile.experience_level = Some(ExperienceLevel::Intermediate);
    profile.commitment_level = Some(CommitmentLevel::Regular);
    profile
}
