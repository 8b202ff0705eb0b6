// SPDX-License-Identifier: MIT

//! Middleware modules (request gate, cookie contract).

pub mod cookies;
pub mod gate;

pub use gate::{gate, GateDecision, SessionFlags};
