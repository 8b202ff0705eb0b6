// SPDX-License-Identifier: MIT

//! The request gate.
//!
//! Runs on every incoming page request before any handler. Reads the
//! session cookie pair, classifies the path, and either lets the
//! request through (with the pathname and query string attached as
//! informational headers for server-rendered pages) or redirects.

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use super::cookies;
use crate::routes::paths;

/// Header carrying the normalized pathname to downstream handlers.
pub const PATHNAME_HEADER: &str = "x-pathname";
/// Header carrying the serialized query string.
pub const SEARCH_PARAMS_HEADER: &str = "x-search-params";

/// The session cookie pair, decoded once per request.
///
/// Presence-encoded: a flag is true iff its cookie exists with value
/// `"1"`. Nothing else in the crate compares cookie values directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionFlags {
    pub logged_in: bool,
    pub profile_complete: bool,
}

impl SessionFlags {
    pub fn from_jar(jar: &CookieJar) -> Self {
        let flag = |name: &str| jar.get(name).map(|c| c.value()) == Some("1");
        Self {
            logged_in: flag(cookies::LOGGED_IN),
            profile_complete: flag(cookies::PROFILE_COMPLETE),
        }
    }
}

/// Outcome of a gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Continue,
    Redirect(&'static str),
}

/// Pure decision function. First match wins:
///
/// 1. `/api/*` and `/admin/*` are outside the gate.
/// 2. Logged in + complete profile never see the guest-only or
///    onboarding pages; they land on the profile page instead.
/// 3. Logged in + complete profile hitting the home path go to the
///    profile page.
/// 4. Logged in + incomplete profile are forced onto onboarding from
///    anywhere except onboarding itself and the guest-only pages.
/// 5. Everything else continues.
pub fn decide(flags: SessionFlags, path: &str) -> GateDecision {
    if path.starts_with("/api") || path.starts_with("/admin") {
        return GateDecision::Continue;
    }

    let guest_only = paths::GUEST_ONLY.iter().any(|p| path.starts_with(p));
    let onboarding = path.starts_with(paths::ONBOARDING);

    if flags.logged_in && flags.profile_complete && (guest_only || onboarding) {
        return GateDecision::Redirect(paths::PROFILE);
    }

    if flags.logged_in && flags.profile_complete && path == paths::HOME {
        return GateDecision::Redirect(paths::PROFILE);
    }

    if flags.logged_in && !flags.profile_complete && !onboarding && !guest_only {
        return GateDecision::Redirect(paths::ONBOARDING);
    }

    GateDecision::Continue
}

/// Axum middleware wrapping [`decide`].
pub async fn gate(jar: CookieJar, mut request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    if paths::is_asset_path(&path) {
        return next.run(request).await;
    }

    let query = request.uri().query().unwrap_or("").to_owned();
    let flags = SessionFlags::from_jar(&jar);

    match decide(flags, &path) {
        GateDecision::Continue => {
            let headers = request.headers_mut();
            headers.insert(
                PATHNAME_HEADER,
                HeaderValue::from_str(&path).unwrap_or_else(|_| HeaderValue::from_static("/")),
            );
            headers.insert(
                SEARCH_PARAMS_HEADER,
                HeaderValue::from_str(&query).unwrap_or_else(|_| HeaderValue::from_static("")),
            );
            next.run(request).await
        }
        GateDecision::Redirect(to) => {
            tracing::debug!(from = %path, to, "gate redirect");
            Redirect::temporary(to).into_response()
        }
    }
}
