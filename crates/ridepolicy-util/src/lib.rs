//! Shared utilities for ridepolicy
//!
//! This crate provides:
//! - Wall-clock helpers (mockable `now()`, hour formatting, hour arithmetic)
//! - Error types
//! - Default paths for the policy database

mod error;
mod paths;
mod time;

pub use error::*;
pub use paths::*;
pub use time::*;
