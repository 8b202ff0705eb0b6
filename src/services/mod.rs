// SPDX-License-Identifier: MIT

//! Services module - clients for the external collaborators.

pub mod content;
pub mod identity;
pub mod profiles;
pub mod reconcile;

pub use content::ContentClient;
pub use identity::{AuthClient, AuthError, AuthEvent};
pub use profiles::ProfileStore;
pub use reconcile::Reconciler;
