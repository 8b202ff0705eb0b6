// SPDX-License-Identifier: MIT

//! Demo content API client.
//!
//! Proxies two resource kinds from the public creature API by name or
//! id, plus "random" pickers constrained to the known valid id ranges.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::error::AppError;

/// First-generation creatures.
pub const CREATURE_ID_RANGE: RangeInclusive<u32> = 1..=151;
/// The five contest types.
pub const CONTEST_TYPE_ID_RANGE: RangeInclusive<u32> = 1..=5;

/// Demo content API client.
#[derive(Clone)]
pub struct ContentClient {
    http: reqwest::Client,
    base_url: String,
}

impl ContentClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Get a creature by name or id. The payload is passed through
    /// untyped; its shape belongs to the demo API.
    pub async fn get_creature(&self, name_or_id: &str) -> Result<serde_json::Value, AppError> {
        self.get_json(&format!("{}/pokemon/{}", self.base_url, name_or_id))
            .await
    }

    /// Get a contest type by name or id.
    pub async fn get_contest_type(&self, name_or_id: &str) -> Result<serde_json::Value, AppError> {
        self.get_json(&format!("{}/contest-type/{}", self.base_url, name_or_id))
            .await
    }

    /// Get a random first-generation creature.
    pub async fn get_random_creature(&self) -> Result<serde_json::Value, AppError> {
        self.get_creature(&random_creature_id().to_string()).await
    }

    /// Get a random contest type.
    pub async fn get_random_contest_type(&self) -> Result<serde_json::Value, AppError> {
        self.get_contest_type(&random_contest_type_id().to_string())
            .await
    }

    async fn get_json(&self, url: &str) -> Result<serde_json::Value, AppError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::ContentApi(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::ContentApi(format!(
                "HTTP {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::ContentApi(format!("JSON parse error: {e}")))
    }
}

pub fn random_creature_id() -> u32 {
    rand::thread_rng().gen_range(CREATURE_ID_RANGE)
}

pub fn random_contest_type_id() -> u32 {
    rand::thread_rng().gen_range(CONTEST_TYPE_ID_RANGE)
}
