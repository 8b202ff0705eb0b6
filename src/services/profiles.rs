// SPDX-License-Identifier: MIT

//! Profile store client.
//!
//! Typed operations over the managed database's REST endpoint for the
//! `profiles` table: read one row by user id, patch a partial field
//! set. The mock backend keeps rows in memory for the test harness.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use crate::error::AppError;
use crate::models::{Profile, ProfileUpdate};

const TABLE: &str = "profiles";

/// Profile store client.
#[derive(Clone)]
pub struct ProfileStore {
    backend: Arc<Backend>,
}

enum Backend {
    Http {
        http: reqwest::Client,
        base_url: String,
        service_key: String,
    },
    Mock {
        rows: DashMap<String, Profile>,
        fail_updates: AtomicBool,
    },
}

impl ProfileStore {
    /// Create a client against the store's REST API.
    pub fn new(base_url: &str, service_key: &str) -> Self {
        Self {
            backend: Arc::new(Backend::Http {
                http: reqwest::Client::new(),
                base_url: base_url.trim_end_matches('/').to_string(),
                service_key: service_key.to_string(),
            }),
        }
    }

    /// Create an offline in-memory store for tests.
    pub fn new_mock() -> Self {
        Self {
            backend: Arc::new(Backend::Mock {
                rows: DashMap::new(),
                fail_updates: AtomicBool::new(false),
            }),
        }
    }

    /// Seed a row in the mock store.
    pub fn mock_insert(&self, profile: Profile) {
        if let Backend::Mock { rows, .. } = &*self.backend {
            rows.insert(profile.id.clone(), profile);
        }
    }

    /// Make subsequent mock updates fail, to exercise the rejection path.
    pub fn mock_fail_updates(&self, fail: bool) {
        if let Backend::Mock { fail_updates, .. } = &*self.backend {
            fail_updates.store(fail, Ordering::Relaxed);
        }
    }

    /// Read a profile row. A missing row is `Ok(None)`, never an error.
    pub async fn get(&self, user_id: &str) -> Result<Option<Profile>, AppError> {
        match &*self.backend {
            Backend::Http {
                http,
                base_url,
                service_key,
            } => {
                let response = http
                    .get(format!("{base_url}/{TABLE}"))
                    .header("apikey", service_key)
                    .bearer_auth(service_key)
                    .query(&[("id", format!("eq.{user_id}")), ("limit", "1".to_string())])
                    .send()
                    .await
                    .map_err(|e| AppError::ProfileStore(e.to_string()))?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(AppError::ProfileStore(format!("HTTP {status}: {body}")));
                }

                let mut rows: Vec<Profile> = response
                    .json()
                    .await
                    .map_err(|e| AppError::ProfileStore(format!("JSON parse error: {e}")))?;
                Ok(rows.pop())
            }
            Backend::Mock { rows, .. } => Ok(rows.get(user_id).map(|r| r.clone())),
        }
    }

    /// Patch a profile row with the collected fields only.
    pub async fn update(&self, user_id: &str, changes: &ProfileUpdate) -> Result<(), AppError> {
        match &*self.backend {
            Backend::Http {
                http,
                base_url,
                service_key,
            } => {
                let response = http
                    .patch(format!("{base_url}/{TABLE}"))
                    .header("apikey", service_key)
                    .bearer_auth(service_key)
                    .query(&[("id", format!("eq.{user_id}"))])
                    .json(changes)
                    .send()
                    .await
                    .map_err(|e| AppError::ProfileStore(e.to_string()))?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(AppError::ProfileStore(format!("HTTP {status}: {body}")));
                }
                Ok(())
            }
            Backend::Mock { rows, fail_updates } => {
                if fail_updates.load(Ordering::Relaxed) {
                    return Err(AppError::ProfileStore("update rejected".to_string()));
                }
                // The real store has a row per registered user; create
                // on demand so tests need not pre-seed every user.
                let mut row = rows
                    .entry(user_id.to_string())
                    .or_insert_with(|| Profile::empty(user_id));
                changes.apply_to(&mut row);
                Ok(())
            }
        }
    }
}
