//! Stateful orientation estimator
//!
//! Owns the latest accelerometer/magnetometer vectors, the derived heading
//! and the gyroscope tilt. Samples arrive asynchronously per sensor; every
//! accelerometer or magnetometer sample triggers a heading recomputation.

use glam::Vec3;

use super::heading::{cardinal, compute_heading};
use super::tilt::{GyroIntegrator, TiltState};
use crate::error::{Result, SetupError};
use crate::sensors::{SensorKind, SensorSample, SensorSource, SensorStatus};

/// Compass heading + gyroscope level
#[derive(Debug, Clone, Default)]
pub struct OrientationEstimator {
    /// Latest accelerometer reading (m/s²), None until the first sample
    accel: Option<Vec3>,
    /// Latest magnetometer reading (µT), None until the first sample
    magnet: Option<Vec3>,
    heading: Option<f32>,
    gyro: GyroIntegrator,
    status: [SensorStatus; 3],
    running: bool,
}

fn status_index(kind: SensorKind) -> usize {
    match kind {
        SensorKind::Accelerometer => 0,
        SensorKind::Magnetometer => 1,
        SensorKind::Gyroscope => 2,
    }
}

impl OrientationEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to all three sensors
    ///
    /// Sensors that exist are subscribed even if another one is missing.
    /// A missing sensor is permanent for the session; the first one found
    /// is returned as the error.
    pub fn start<S: SensorSource + ?Sized>(&mut self, source: &mut S) -> Result<()> {
        let mut first_missing = None;
        for kind in SensorKind::ALL {
            let status = if source.subscribe(kind) {
                SensorStatus::Available
            } else {
                log::warn!("{} not available, readings depending on it stay empty", kind);
                if first_missing.is_none() {
                    first_missing = Some(kind);
                }
                SensorStatus::Unavailable
            };
            self.status[status_index(kind)] = status;
        }
        self.running = true;
        log::info!("Orientation estimator started");

        match first_missing {
            Some(kind) => Err(SetupError::SensorUnavailable(kind)),
            None => Ok(()),
        }
    }

    /// Unsubscribe from all sensors. The next gyroscope sample after a
    /// restart is treated as a new stream.
    pub fn stop<S: SensorSource + ?Sized>(&mut self, source: &mut S) {
        for kind in SensorKind::ALL {
            if self.status[status_index(kind)].is_available() {
                source.unsubscribe(kind);
            }
        }
        self.gyro.resync();
        self.running = false;
        log::info!("Orientation estimator stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn status(&self, kind: SensorKind) -> SensorStatus {
        self.status[status_index(kind)]
    }

    /// Drain up to `max_samples` pending samples from the source
    pub fn pump<S: SensorSource + ?Sized>(&mut self, source: &mut S, max_samples: usize) -> usize {
        if !self.running {
            return 0;
        }
        let mut handled = 0;
        while handled < max_samples {
            let Some(sample) = source.next_sample() else {
                break;
            };
            self.on_sample(&sample);
            handled += 1;
        }
        handled
    }

    /// Dispatch a sample by sensor kind
    pub fn on_sample(&mut self, sample: &SensorSample) {
        match sample.kind {
            SensorKind::Accelerometer => self.on_accelerometer_sample(sample.values),
            SensorKind::Magnetometer => self.on_magnetometer_sample(sample.values),
            SensorKind::Gyroscope => self.on_gyroscope_sample(sample.values, sample.timestamp_ns),
        }
    }

    pub fn on_accelerometer_sample(&mut self, values: Vec3) {
        self.accel = Some(values);
        self.refresh_heading();
    }

    pub fn on_magnetometer_sample(&mut self, values: Vec3) {
        self.magnet = Some(values);
        self.refresh_heading();
    }

    pub fn on_gyroscope_sample(&mut self, angular_velocity: Vec3, timestamp_ns: i64) {
        if !self.gyro.integrate(angular_velocity, timestamp_ns) {
            log::trace!("Gyroscope synced at {} ns", timestamp_ns);
        }
    }

    /// Heading from the two latest vectors, degrees in [0, 360)
    ///
    /// None if either vector was never populated or the rotation matrix
    /// is degenerate.
    pub fn compute_heading(&self) -> Option<f32> {
        compute_heading(self.accel?, self.magnet?)
    }

    /// Heading as of the latest accelerometer/magnetometer sample
    pub fn heading(&self) -> Option<f32> {
        self.heading
    }

    pub fn tilt(&self) -> TiltState {
        self.gyro.tilt()
    }

    /// Zero the tilt (level calibration); heading inputs are kept
    pub fn reset_tilt(&mut self) {
        self.gyro.reset();
    }

    fn refresh_heading(&mut self) {
        let heading = self.compute_heading();
        match (self.heading, heading) {
            (None, Some(h)) => log::debug!("Heading acquired: {:.1}°", h),
            (Some(_), None) => log::debug!("Heading lost (degenerate orientation)"),
            _ => {}
        }
        self.heading = heading;
    }

    /// One-line summary for the compass/level screen
    pub fn status_line(&self) -> String {
        let tilt = self.tilt();
        let compass = match self.heading {
            Some(h) => format!("{:.1}° {}", h, cardinal(h)),
            None if self.status(SensorKind::Magnetometer) == SensorStatus::Unavailable => {
                "unavailable".to_string()
            }
            None => "--".to_string(),
        };
        format!(
            "Compass {} | Roll {:.1}° | Pitch {:.1}°",
            compass, tilt.roll, tilt.pitch
        )
    }
}
