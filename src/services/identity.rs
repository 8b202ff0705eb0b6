// SPDX-License-Identifier: MIT

//! Identity provider client.
//!
//! Wraps the managed auth service's HTTP API and keeps the current
//! session in memory, the way the provider's browser SDK does. Auth
//! state changes are published on a broadcast stream so the
//! reconciliation flow can observe a sign-in that resolves after it
//! started watching.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::{broadcast, RwLock};

use crate::models::{AuthUser, Session};

/// Identity provider failures.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The provider rejected the request (bad credentials, duplicate
    /// signup, invalid code). The message is surfaced to the user.
    #[error("{0}")]
    Provider(String),

    #[error("auth request failed: {0}")]
    Transport(String),
}

/// Auth state change events, mirroring the provider SDK's stream.
#[derive(Debug, Clone)]
pub enum AuthEvent {
    SignedIn(Session),
    InitialSession(Session),
    SignedOut,
}

impl AuthEvent {
    /// The session for events that establish one.
    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthEvent::SignedIn(s) | AuthEvent::InitialSession(s) => Some(s),
            AuthEvent::SignedOut => None,
        }
    }
}

/// Identity provider client with an in-memory session slot.
#[derive(Clone)]
pub struct AuthClient {
    inner: Arc<Inner>,
}

struct Inner {
    backend: Backend,
    session: RwLock<Option<Session>>,
    events: broadcast::Sender<AuthEvent>,
}

enum Backend {
    Http {
        http: reqwest::Client,
        base_url: String,
        api_key: String,
    },
    /// Offline directory for tests: email -> (password, user id), plus
    /// authorization codes accepted by the exchange endpoint.
    Mock {
        users: HashMap<String, (String, String)>,
        codes: HashMap<String, String>,
    },
}

/// Error body shape used by the provider.
#[derive(Deserialize)]
struct ProviderError {
    #[serde(alias = "error_description", alias = "msg")]
    message: Option<String>,
}

impl AuthClient {
    /// Create a client against the provider's HTTP API.
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self::with_backend(Backend::Http {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Create an offline client with a fixed credential directory.
    pub fn new_mock(
        users: impl IntoIterator<Item = (&'static str, &'static str, &'static str)>,
        codes: impl IntoIterator<Item = (&'static str, &'static str)>,
    ) -> Self {
        Self::with_backend(Backend::Mock {
            users: users
                .into_iter()
                .map(|(email, password, id)| {
                    (email.to_string(), (password.to_string(), id.to_string()))
                })
                .collect(),
            codes: codes
                .into_iter()
                .map(|(code, email)| (code.to_string(), email.to_string()))
                .collect(),
        })
    }

    fn with_backend(backend: Backend) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            inner: Arc::new(Inner {
                backend,
                session: RwLock::new(None),
                events,
            }),
        }
    }

    /// The current session, if one has been established.
    pub async fn session(&self) -> Option<Session> {
        self.inner.session.read().await.clone()
    }

    /// Subscribe to auth state changes.
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.inner.events.subscribe()
    }

    /// Number of live subscriptions. Lets tests assert that one-shot
    /// listeners tear themselves down.
    pub fn receiver_count(&self) -> usize {
        self.inner.events.receiver_count()
    }

    /// Publish an auth event without going through the provider. Test
    /// hook for simulating a session that resolves asynchronously.
    pub async fn emit(&self, event: AuthEvent) {
        if let Some(session) = event.session() {
            *self.inner.session.write().await = Some(session.clone());
        }
        let _ = self.inner.events.send(event);
    }

    /// Password sign-in. Stores the session and broadcasts `SignedIn`.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let session = match &self.inner.backend {
            Backend::Http {
                http,
                base_url,
                api_key,
            } => {
                let response = http
                    .post(format!("{base_url}/token?grant_type=password"))
                    .header("apikey", api_key)
                    .json(&serde_json::json!({ "email": email, "password": password }))
                    .send()
                    .await
                    .map_err(|e| AuthError::Transport(e.to_string()))?;
                check_json::<Session>(response).await?
            }
            Backend::Mock { users, .. } => match users.get(email) {
                Some((stored, id)) if stored == password => mock_session(id, email),
                _ => return Err(AuthError::Provider("Invalid login credentials".to_string())),
            },
        };

        self.store_session(session.clone()).await;
        Ok(session)
    }

    /// Register a new user. No session is established; the provider
    /// sends a confirmation email before the first sign-in.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        match &self.inner.backend {
            Backend::Http {
                http,
                base_url,
                api_key,
            } => {
                let response = http
                    .post(format!("{base_url}/signup"))
                    .header("apikey", api_key)
                    .json(&serde_json::json!({ "email": email, "password": password }))
                    .send()
                    .await
                    .map_err(|e| AuthError::Transport(e.to_string()))?;
                check_json::<AuthUser>(response).await
            }
            Backend::Mock { users, .. } => {
                if users.contains_key(email) {
                    return Err(AuthError::Provider("User already registered".to_string()));
                }
                Ok(AuthUser {
                    id: format!("mock-{email}"),
                    email: Some(email.to_string()),
                })
            }
        }
    }

    /// Sign out. Clears the local session and broadcasts `SignedOut`
    /// whether or not the provider call succeeds.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let session = self.inner.session.write().await.take();
        let _ = self.inner.events.send(AuthEvent::SignedOut);

        match &self.inner.backend {
            Backend::Http {
                http,
                base_url,
                api_key,
            } => {
                let mut request = http.post(format!("{base_url}/logout")).header("apikey", api_key);
                if let Some(session) = session {
                    request = request.bearer_auth(session.access_token);
                }
                let response = request
                    .send()
                    .await
                    .map_err(|e| AuthError::Transport(e.to_string()))?;
                check_status(response).await
            }
            Backend::Mock { .. } => Ok(()),
        }
    }

    /// Exchange an authorization code from the provider redirect for a
    /// session. Stores it and broadcasts `SignedIn`.
    pub async fn exchange_code(&self, code: &str) -> Result<Session, AuthError> {
        let session = match &self.inner.backend {
            Backend::Http {
                http,
                base_url,
                api_key,
            } => {
                let response = http
                    .post(format!("{base_url}/token?grant_type=authorization_code"))
                    .header("apikey", api_key)
                    .json(&serde_json::json!({ "auth_code": code }))
                    .send()
                    .await
                    .map_err(|e| AuthError::Transport(e.to_string()))?;
                check_json::<Session>(response).await?
            }
            Backend::Mock { users, codes } => {
                let email = codes
                    .get(code)
                    .ok_or_else(|| AuthError::Provider("invalid authorization code".to_string()))?;
                let (_, id) = users
                    .get(email)
                    .ok_or_else(|| AuthError::Provider("unknown user for code".to_string()))?;
                mock_session(id, email)
            }
        };

        self.store_session(session.clone()).await;
        Ok(session)
    }

    async fn store_session(&self, session: Session) {
        *self.inner.session.write().await = Some(session.clone());
        let _ = self.inner.events.send(AuthEvent::SignedIn(session));
    }
}

fn mock_session(id: &str, email: &str) -> Session {
    Session {
        access_token: format!("mock-token-{id}"),
        refresh_token: None,
        expires_in: Some(3600),
        user: AuthUser {
            id: id.to_string(),
            email: Some(email.to_string()),
        },
    }
}

async fn check_status(response: reqwest::Response) -> Result<(), AuthError> {
    if response.status().is_success() {
        return Ok(());
    }
    Err(provider_error(response).await)
}

async fn check_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, AuthError> {
    if !response.status().is_success() {
        return Err(provider_error(response).await);
    }
    response
        .json()
        .await
        .map_err(|e| AuthError::Transport(format!("JSON parse error: {e}")))
}

async fn provider_error(response: reqwest::Response) -> AuthError {
    let status = response.status();
    let message = response
        .json::<ProviderError>()
        .await
        .ok()
        .and_then(|e| e.message)
        .unwrap_or_else(|| format!("HTTP {status}"));
    AuthError::Provider(message)
}
