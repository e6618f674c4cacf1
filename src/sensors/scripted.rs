//! Deterministic scripted sensor source
//!
//! Plays back a list of motion steps as an endless sample stream. Used by
//! the demo binary and tests in place of real hardware.

use std::collections::{HashSet, VecDeque};

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{SensorKind, SensorSample, SensorSource};
use crate::consts::STANDARD_GRAVITY;

/// Horizontal component of the simulated geomagnetic field (µT)
const FIELD_HORIZONTAL: f32 = 20.0;
/// Vertical component (µT, negative = pointing into the ground)
const FIELD_VERTICAL: f32 = -45.0;

/// One segment of scripted device motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptStep {
    /// How long this step lasts
    pub duration_ms: u32,
    /// Compass heading the device faces (device held roughly flat)
    pub heading_deg: f32,
    /// Angular velocity reported by the gyroscope (rad/s)
    pub gyro: Vec3,
}

impl ScriptStep {
    pub fn new(duration_ms: u32, heading_deg: f32, gyro: Vec3) -> Self {
        Self {
            duration_ms,
            heading_deg,
            gyro,
        }
    }

    /// Device resting at `heading_deg`
    pub fn still(duration_ms: u32, heading_deg: f32) -> Self {
        Self::new(duration_ms, heading_deg, Vec3::ZERO)
    }
}

/// Accelerometer reading for a flat device
pub fn flat_gravity() -> Vec3 {
    Vec3::new(0.0, 0.0, STANDARD_GRAVITY)
}

/// Magnetometer reading for a flat device facing `heading_deg`
pub fn field_for_heading(heading_deg: f32) -> Vec3 {
    let h = heading_deg.to_radians();
    Vec3::new(
        -FIELD_HORIZONTAL * h.sin(),
        FIELD_HORIZONTAL * h.cos(),
        FIELD_VERTICAL,
    )
}

/// Endless sample stream driven by a motion script
///
/// After the last step the device stays still at the final heading.
pub struct ScriptedSource {
    steps: Vec<ScriptStep>,
    step_index: usize,
    step_elapsed_ns: i64,
    interval_ns: i64,
    now_ns: i64,
    available: HashSet<SensorKind>,
    subscribed: HashSet<SensorKind>,
    pending: VecDeque<SensorSample>,
    rng: Pcg32,
    noise: f32,
}

impl ScriptedSource {
    /// Create a source emitting one sample per subscribed sensor every `interval_ms`
    pub fn new(steps: Vec<ScriptStep>, interval_ms: u32, seed: u64) -> Self {
        Self {
            steps,
            step_index: 0,
            step_elapsed_ns: 0,
            interval_ns: i64::from(interval_ms.max(1)) * 1_000_000,
            now_ns: 0,
            available: SensorKind::ALL.into_iter().collect(),
            subscribed: HashSet::new(),
            pending: VecDeque::new(),
            rng: Pcg32::seed_from_u64(seed),
            noise: 0.0,
        }
    }

    /// Add uniform noise of +/- `amplitude` to every axis
    pub fn with_noise(mut self, amplitude: f32) -> Self {
        self.noise = amplitude.abs();
        self
    }

    /// Remove a sensor from the simulated device
    pub fn without(mut self, kind: SensorKind) -> Self {
        self.available.remove(&kind);
        self
    }

    /// Timestamp of the most recently generated frame
    pub fn now_ns(&self) -> i64 {
        self.now_ns
    }

    fn current_step(&self) -> ScriptStep {
        match self.steps.get(self.step_index) {
            Some(step) => *step,
            None => {
                let heading = self.steps.last().map(|s| s.heading_deg).unwrap_or(0.0);
                ScriptStep::still(0, heading)
            }
        }
    }

    fn advance_clock(&mut self) {
        self.now_ns += self.interval_ns;
        self.step_elapsed_ns += self.interval_ns;
        while let Some(step) = self.steps.get(self.step_index) {
            let step_ns = i64::from(step.duration_ms) * 1_000_000;
            if self.step_elapsed_ns <= step_ns {
                break;
            }
            self.step_elapsed_ns -= step_ns;
            self.step_index += 1;
        }
    }

    fn jitter(&mut self, v: Vec3) -> Vec3 {
        if self.noise <= 0.0 {
            return v;
        }
        let n = self.noise;
        v + Vec3::new(
            self.rng.random_range(-n..=n),
            self.rng.random_range(-n..=n),
            self.rng.random_range(-n..=n),
        )
    }

    /// Generate one frame of samples for all subscribed sensors
    fn generate_frame(&mut self) {
        self.advance_clock();
        let step = self.current_step();

        // Fixed order keeps playback deterministic
        for kind in SensorKind::ALL {
            if !self.subscribed.contains(&kind) {
                continue;
            }
            let clean = match kind {
                SensorKind::Accelerometer => flat_gravity(),
                SensorKind::Magnetometer => field_for_heading(step.heading_deg),
                SensorKind::Gyroscope => step.gyro,
            };
            let values = self.jitter(clean);
            self.pending
                .push_back(SensorSample::new(kind, values, self.now_ns));
        }
    }
}

impl SensorSource for ScriptedSource {
    fn has_sensor(&self, kind: SensorKind) -> bool {
        self.available.contains(&kind)
    }

    fn subscribe(&mut self, kind: SensorKind) -> bool {
        if !self.has_sensor(kind) {
            return false;
        }
        self.subscribed.insert(kind);
        true
    }

    fn unsubscribe(&mut self, kind: SensorKind) {
        self.subscribed.remove(&kind);
        self.pending.retain(|s| s.kind != kind);
    }

    fn next_sample(&mut self) -> Option<SensorSample> {
        if self.subscribed.is_empty() {
            return None;
        }
        if self.pending.is_empty() {
            self.generate_frame();
        }
        self.pending.pop_front()
    }
}
