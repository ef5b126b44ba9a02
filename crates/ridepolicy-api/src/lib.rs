//! Result types for ridepolicy
//!
//! This crate defines what the engine hands back to its callers:
//! - Booking decisions (`Allowed` / `Denied` with a structured reason)
//! - The projected booking window for a trip

mod types;

pub use types::*;
