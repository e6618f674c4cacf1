//! Sensor sample types and the sensor source seam
//!
//! A sensor source is a lazy, infinite, non-restartable stream of
//! timestamped 3-axis samples. The core subscribes to the kinds it needs
//! and pulls samples; it never knows how the host delivers them.

pub mod scripted;

pub use scripted::{ScriptStep, ScriptedSource};

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Sensor types consumed by the core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorKind {
    /// m/s², includes gravity
    Accelerometer,
    /// µT
    Magnetometer,
    /// rad/s
    Gyroscope,
}

impl SensorKind {
    pub const ALL: [SensorKind; 3] = [
        SensorKind::Accelerometer,
        SensorKind::Magnetometer,
        SensorKind::Gyroscope,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SensorKind::Accelerometer => "accelerometer",
            SensorKind::Magnetometer => "magnetometer",
            SensorKind::Gyroscope => "gyroscope",
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single timestamped 3-axis reading in sensor-native units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    pub kind: SensorKind,
    pub values: Vec3,
    /// Monotonic timestamp in nanoseconds
    pub timestamp_ns: i64,
}

impl SensorSample {
    pub fn new(kind: SensorKind, values: Vec3, timestamp_ns: i64) -> Self {
        Self {
            kind,
            values,
            timestamp_ns,
        }
    }
}

/// Availability of a sensor, checked once at setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SensorStatus {
    /// Not yet checked (component not started)
    #[default]
    Unknown,
    Available,
    /// Permanent for the session, never retried
    Unavailable,
}

impl SensorStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, SensorStatus::Available)
    }
}

/// Host-provided stream of sensor samples
pub trait SensorSource {
    /// Whether the device has this sensor at all
    fn has_sensor(&self, kind: SensorKind) -> bool;

    /// Start delivering samples of `kind`. Returns false if unavailable.
    fn subscribe(&mut self, kind: SensorKind) -> bool;

    /// Stop delivering samples of `kind`
    fn unsubscribe(&mut self, kind: SensorKind);

    /// Next sample for any subscribed kind, or None if none is pending
    fn next_sample(&mut self) -> Option<SensorSample>;
}
