// SPDX-License-Identifier: MIT

//! Gymbuddy API server.
//!
//! Gates page navigation on the session cookie pair and bridges the
//! frontend to the managed identity provider and profile store.

use gymbuddy::{
    config::Config,
    services::{AuthClient, ContentClient, ProfileStore},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Gymbuddy API");

    // Identity provider client (sessions, sign-in/up/out, auth events)
    let auth = AuthClient::new(&config.auth_url, &config.auth_api_key);
    tracing::info!(url = %config.auth_url, "Identity provider client initialized");

    // Profile store client (read/update profile rows)
    let profiles = ProfileStore::new(&config.profile_store_url, &config.profile_service_key);
    tracing::info!(url = %config.profile_store_url, "Profile store client initialized");

    // Demo content API client
    let content = ContentClient::new(&config.content_api_url);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        auth,
        profiles,
        content,
    });

    // Build router
    let app = gymbuddy::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gymbuddy=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
