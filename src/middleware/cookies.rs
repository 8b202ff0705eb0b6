// SPDX-License-Identifier: MIT

//! The session cookie contract.
//!
//! Two presence-encoded flags drive the request gate: `auth_logged_in`
//! (active provider session) and `profile_complete` (profile satisfies
//! the completeness rule). Absence means false; the value is always
//! `"1"`. A third cookie stores the UI locale.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

pub const LOGGED_IN: &str = "auth_logged_in";
pub const PROFILE_COMPLETE: &str = "profile_complete";
pub const LOCALE: &str = "locale";

const LOGGED_IN_MAX_AGE: Duration = Duration::days(30);
// Effectively "until logout"
const PROFILE_COMPLETE_MAX_AGE: Duration = Duration::days(365);
const LOCALE_MAX_AGE: Duration = Duration::days(365);

fn flag(name: &'static str, max_age: Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((name, "1"))
        .path("/")
        .same_site(SameSite::Lax)
        .http_only(true)
        .secure(secure)
        .max_age(max_age)
        .build()
}

fn removal(name: &'static str) -> Cookie<'static> {
    Cookie::build(name).path("/").build()
}

/// Persist the session flags after a successful login or reconciliation.
///
/// Always sets `auth_logged_in`; sets `profile_complete` only when the
/// completeness rule holds, and deletes it otherwise so a stale flag
/// from an earlier session cannot survive.
pub fn login_cookies(jar: CookieJar, profile_complete: bool, secure: bool) -> CookieJar {
    let jar = jar.add(flag(LOGGED_IN, LOGGED_IN_MAX_AGE, secure));
    if profile_complete {
        jar.add(flag(PROFILE_COMPLETE, PROFILE_COMPLETE_MAX_AGE, secure))
    } else {
        jar.remove(removal(PROFILE_COMPLETE))
    }
}

/// Set `profile_complete` alone. Used by the onboarding finish step,
/// whose own required-field validation guarantees the completeness rule
/// holds (the two field lists are kept in lockstep, see
/// `models::profile::REQUIRED_FIELDS`).
pub fn profile_complete_cookie(jar: CookieJar, secure: bool) -> CookieJar {
    jar.add(flag(PROFILE_COMPLETE, PROFILE_COMPLETE_MAX_AGE, secure))
}

/// Delete both session flags on logout.
pub fn clear_auth_cookies(jar: CookieJar) -> CookieJar {
    jar.remove(removal(LOGGED_IN)).remove(removal(PROFILE_COMPLETE))
}

/// Locale preference cookie. Not HttpOnly: the frontend reads it.
pub fn locale_cookie(locale: &str) -> Cookie<'static> {
    Cookie::build((LOCALE, locale.to_string()))
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(LOCALE_MAX_AGE)
        .build()
}
