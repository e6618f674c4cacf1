//! Roll/pitch from integrated gyroscope angular velocity

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_TILT_DEG, NANOS_PER_SEC};

/// Device tilt in degrees, each axis clamped to [-90, 90]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TiltState {
    /// Rotation about the device X axis
    pub roll: f32,
    /// Rotation about the device Y axis
    pub pitch: f32,
}

impl TiltState {
    pub fn new(roll: f32, pitch: f32) -> Self {
        Self {
            roll: clamp_tilt(roll),
            pitch: clamp_tilt(pitch),
        }
    }

    /// Level gauge fill fraction for an angle, 0 at -90°, 1 at +90°
    pub fn gauge_progress(angle: f32) -> f32 {
        ((angle + MAX_TILT_DEG) / (2.0 * MAX_TILT_DEG)).clamp(0.0, 1.0)
    }
}

#[inline]
fn clamp_tilt(angle: f32) -> f32 {
    if angle.is_nan() {
        return 0.0;
    }
    angle.clamp(-MAX_TILT_DEG, MAX_TILT_DEG)
}

/// Integrates gyroscope samples into a [`TiltState`]
///
/// The first sample of a stream (or the first after [`GyroIntegrator::resync`])
/// only records its timestamp. Integration starts with the second sample.
#[derive(Debug, Clone, Default)]
pub struct GyroIntegrator {
    tilt: TiltState,
    last_timestamp_ns: Option<i64>,
}

impl GyroIntegrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tilt(&self) -> TiltState {
        self.tilt
    }

    /// Forget the previous timestamp (stream gap); tilt is kept
    pub fn resync(&mut self) {
        self.last_timestamp_ns = None;
    }

    /// Zero the tilt and forget the previous timestamp
    pub fn reset(&mut self) {
        self.tilt = TiltState::default();
        self.last_timestamp_ns = None;
    }

    /// Integrate one gyroscope sample (rad/s, timestamp in ns)
    ///
    /// Returns true if the sample was integrated, false if it only
    /// synchronized the timestamp.
    pub fn integrate(&mut self, angular_velocity: Vec3, timestamp_ns: i64) -> bool {
        let Some(last) = self.last_timestamp_ns.replace(timestamp_ns) else {
            return false;
        };

        let Some(delta_ns) = timestamp_ns.checked_sub(last) else {
            return false;
        };
        let dt = delta_ns as f32 / NANOS_PER_SEC;
        if dt <= 0.0 || !angular_velocity.is_finite() {
            // Out-of-order or bogus sample: treat as a resync point
            return false;
        }

        self.tilt.roll = clamp_tilt(self.tilt.roll + (angular_velocity.x * dt).to_degrees());
        self.tilt.pitch = clamp_tilt(self.tilt.pitch + (angular_velocity.y * dt).to_degrees());
        true
    }
}
