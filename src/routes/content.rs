// SPDX-License-Identifier: MIT

//! Demo content routes, proxied through the content client.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use crate::error::Result;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/creatures/random", get(random_creature))
        .route("/api/creatures/{name_or_id}", get(get_creature))
        .route("/api/contest-types/random", get(random_contest_type))
        .route("/api/contest-types/{name_or_id}", get(get_contest_type))
}

async fn get_creature(
    State(state): State<Arc<AppState>>,
    Path(name_or_id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    Ok(Json(state.content.get_creature(&name_or_id).await?))
}

async fn random_creature(State(state): State<Arc<AppState>>) -> Result<Json<serde_json::Value>> {
    Ok(Json(state.content.get_random_creature().await?))
}

async fn get_contest_type(
    State(state): State<Arc<AppState>>,
    Path(name_or_id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    Ok(Json(state.content.get_contest_type(&name_or_id).await?))
}

async fn random_contest_type(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>> {
    Ok(Json(state.content.get_random_contest_type().await?))
}
