// SPDX-License-Identifier: MIT

//! Session/profile reconciliation after an identity-provider redirect.
//!
//! Some provider flows resolve the session before this code runs (the
//! code was already exchanged); others resolve it afterwards. The
//! reconciler checks the session slot first and falls back to a
//! one-shot watch on the auth-event stream, so neither ordering is
//! missed and at most one navigation results.

use tokio::sync::broadcast::error::RecvError;

use crate::models::{Profile, Session};
use crate::routes::paths;
use crate::services::{AuthClient, AuthEvent, ProfileStore};

/// Whether a request URL carries the provider's redirect markers
/// (an access token or an authorization code).
pub fn has_redirect_markers(query: &str) -> bool {
    query.contains("access_token") || query.contains("code=")
}

/// Outcome of a reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciled {
    pub profile_complete: bool,
    pub destination: &'static str,
}

/// One reconciliation pass per provider redirect.
#[derive(Clone)]
pub struct Reconciler {
    auth: AuthClient,
    profiles: ProfileStore,
}

impl Reconciler {
    pub fn new(auth: AuthClient, profiles: ProfileStore) -> Self {
        Self { auth, profiles }
    }

    /// Resolve the session, derive completeness, and pick a landing
    /// page. Returns `None` only if the event stream closes without a
    /// sign-in; if the provider never emits one, the future stays
    /// pending (no retry, no timeout).
    pub async fn run(&self) -> Option<Reconciled> {
        let session = match self.auth.session().await {
            Some(session) => session,
            None => self.wait_for_sign_in().await?,
        };

        let profile = match self.profiles.get(&session.user.id).await {
            Ok(profile) => profile,
            Err(err) => {
                // A fetch failure must not block the navigation; the
                // user lands on onboarding instead.
                tracing::warn!(error = %err, user_id = %session.user.id,
                    "profile fetch failed during reconciliation");
                None
            }
        };

        let complete = profile.as_ref().is_some_and(Profile::is_complete);
        Some(Reconciled {
            profile_complete: complete,
            destination: if complete {
                paths::PROFILE
            } else {
                paths::ONBOARDING
            },
        })
    }

    /// Watch the auth-event stream until a sign-in (or initial session)
    /// carries a user. The receiver is dropped as soon as one matches,
    /// tearing the subscription down before any navigation happens.
    async fn wait_for_sign_in(&self) -> Option<Session> {
        let mut events = self.auth.subscribe();
        // The session may have resolved between the caller's check and
        // the subscription; anything earlier is visible in the slot,
        // anything later arrives on the stream.
        if let Some(session) = self.auth.session().await {
            return Some(session);
        }
        loop {
            match events.recv().await {
                Ok(AuthEvent::SignedIn(session)) | Ok(AuthEvent::InitialSession(session)) => {
                    return Some(session);
                }
                Ok(AuthEvent::SignedOut) => continue,
                Err(RecvError::Lagged(_)) => {
                    // Missed events; the session slot is authoritative.
                    if let Some(session) = self.auth.session().await {
                        return Some(session);
                    }
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
