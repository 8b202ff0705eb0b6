// SPDX-License-Identifier: MIT

//! Locale preference endpoint.

use axum::{extract::State, routing::post, Json, Router};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::Config;
use crate::middleware::cookies;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/locale", post(set_locale))
}

#[derive(Deserialize)]
pub struct LocaleRequest {
    pub locale: String,
}

#[derive(Serialize)]
pub struct LocaleResponse {
    /// The locale actually written, after validation.
    pub locale: String,
}

/// Validate the requested locale against the supported set; an unknown
/// value silently falls back to the default rather than erroring.
pub fn validate_locale(config: &Config, requested: &str) -> String {
    if config.supported_locales.iter().any(|l| l == requested) {
        requested.to_string()
    } else {
        config.default_locale.clone()
    }
}

async fn set_locale(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(request): Json<LocaleRequest>,
) -> (CookieJar, Json<LocaleResponse>) {
    let locale = validate_locale(&state.config, &request.locale);
    let jar = jar.add(cookies::locale_cookie(&locale));
    (jar, Json(LocaleResponse { locale }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_locale_is_kept() {
        let config = Config::test_default();
        assert_eq!(validate_locale(&config, "ko"), "ko");
        assert_eq!(validate_locale(&config, "en"), "en");
    }

    #[test]
    fn unsupported_locale_falls_back_to_default() {
        let config = Config::test_default();
        assert_eq!(validate_locale(&config, "xx"), "en");
        assert_eq!(validate_locale(&config, ""), "en");
    }
}
