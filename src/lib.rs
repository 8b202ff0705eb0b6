// SPDX-License-Identifier: MIT

//! Gymbuddy: backend for a gym-partner-matching web app.
//!
//! This crate provides the route-gating middleware, the auth redirect
//! flow, and the profile plumbing that sit between the frontend routes
//! and the managed identity/profile services.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::{AuthClient, ContentClient, ProfileStore};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub auth: AuthClient,
    pub profiles: ProfileStore,
    pub content: ContentClient,
}
