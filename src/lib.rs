//! Tilt Maze - sensor fusion compass/level and a gyroscope ball maze
//!
//! Core modules:
//! - `orientation`: Accelerometer + magnetometer heading, gyroscope tilt integration
//! - `sim`: Deterministic ball simulation (tilt -> acceleration, obstacles, goal)
//! - `sensors`: Sensor sample types and the sensor source seam
//! - `readouts`: Barometric altitude and sound level readouts
//! - `platform`: Fixed cadence scheduling
//! - `snapshot`: Renderer-facing view of the current state
//! - `settings`: Data-driven tuning and maze layout

pub mod error;
pub mod orientation;
pub mod platform;
pub mod readouts;
pub mod sensors;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use error::SetupError;
pub use orientation::{OrientationEstimator, TiltState};
pub use settings::Settings;
pub use sim::{BoardState, Simulator};
pub use snapshot::Snapshot;

/// Tuning constants (defaults for [`Settings`])
pub mod consts {
    /// Nominal simulation tick (16 ms, ~60 Hz)
    pub const TICK_MS: u64 = 16;
    /// Nominal simulation timestep in seconds
    pub const SIM_DT: f32 = TICK_MS as f32 / 1000.0;

    /// Ball acceleration at full tilt (units/s²)
    pub const ACCEL_SCALE: f32 = 1600.0;
    /// Per-tick velocity multiplier (not a per-second rate)
    pub const DAMPING: f32 = 0.97;
    /// Velocity scale applied when bouncing off an obstacle
    pub const BOUNCE: f32 = 0.6;
    /// Tilt angle (degrees) that produces full acceleration
    pub const TILT_FULL_SCALE_DEG: f32 = 60.0;
    /// Roll/pitch clamp (degrees)
    pub const MAX_TILT_DEG: f32 = 90.0;

    /// Ball radius in board units
    pub const BALL_RADIUS: f32 = 14.0;
    /// Start position as board fractions
    pub const START_FRACTION: (f32, f32) = (0.5, 0.85);

    /// Nanoseconds per second (sensor timestamps are in ns)
    pub const NANOS_PER_SEC: f32 = 1_000_000_000.0;

    /// Standard gravity (m/s²)
    pub const STANDARD_GRAVITY: f32 = 9.81;
    /// Standard sea level pressure (hPa)
    pub const SEA_LEVEL_PRESSURE: f32 = 1013.25;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = (degrees + 360.0) % 360.0;
    if wrapped < 0.0 {
        wrapped + 360.0
    } else if wrapped >= 360.0 {
        // f32 rounding of values just below 0
        0.0
    } else {
        wrapped
    }
}
