//! Booking policy and pricing rules for ridepolicy
//!
//! This crate is the decision layer:
//! - Booking window evaluation (which day, which hours)
//! - The ordered booking eligibility chain
//! - Cancellation and reschedule deadlines
//! - Dynamic pricing and student discounts
//! - Reminder timing
//!
//! Every rule is a pure function over a `SchedulingPolicy` snapshot.
//! `PolicyEngine` loads that snapshot once per call and threads it through.

mod deadlines;
mod eligibility;
mod engine;
mod pricing;
mod reminders;
mod window;

pub use deadlines::*;
pub use eligibility::*;
pub use engine::*;
pub use pricing::*;
pub use reminders::*;
pub use window::*;
