//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time (monotonic clock, sleeping)
//! - Fixed cadence scheduling of simulation ticks

pub mod time;

pub use time::{Clock, FixedTicker, ManualClock, StopHandle, SystemClock};
