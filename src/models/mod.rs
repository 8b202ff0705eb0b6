// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod auth;
pub mod profile;

pub use auth::{AuthUser, Session};
pub use profile::{
    CommitmentLevel, ExperienceLevel, Gender, Goal, PreferredGender, Profile, ProfileUpdate,
};
