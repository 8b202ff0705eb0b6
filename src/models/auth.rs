//! Identity provider session types.

use serde::{Deserialize, Serialize};

/// User identity as reported by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    /// May be None if the provider does not share it
    pub email: Option<String>,
}

/// An active provider session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Seconds until the access token expires
    #[serde(default)]
    pub expires_in: Option<u64>,
    pub user: AuthUser,
}
