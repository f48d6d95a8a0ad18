//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Monotonic time (fire-rate gate)
//! - The JS-facing session wrapper (wasm32 only)

pub mod clock;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use clock::{Clock, ManualClock, MonotonicClock};
