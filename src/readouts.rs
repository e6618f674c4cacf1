//! Single-sensor readouts
//!
//! Barometric altitude and microphone sound level. Textbook formulas, no
//! state beyond the simulated pressure walk.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::SEA_LEVEL_PRESSURE;

/// Lowest pressure the simulated barometer wanders to (hPa)
pub const MIN_SIMULATED_PRESSURE: f32 = 650.0;
/// Maximum change per simulated step (hPa)
pub const PRESSURE_STEP: f32 = 2.0;
/// Sound level that counts as loud (dB)
pub const LOUD_THRESHOLD_DB: f32 = 85.0;
/// Upper bound for reported sound level (dB)
pub const MAX_DB: f32 = 120.0;

/// Altitude in meters from pressure in hPa (international barometric formula)
pub fn pressure_to_altitude(pressure_hpa: f32, sea_level_hpa: f32) -> f32 {
    let ratio = (pressure_hpa / sea_level_hpa).min(1.5) as f64;
    (44330.0 * (1.0 - ratio.powf(1.0 / 5.255))) as f32
}

/// Random-walk barometer for devices without a pressure sensor
#[derive(Debug, Clone)]
pub struct SimulatedBarometer {
    pressure: f32,
    rng: Pcg32,
}

impl SimulatedBarometer {
    pub fn new(seed: u64) -> Self {
        Self {
            pressure: SEA_LEVEL_PRESSURE,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn pressure(&self) -> f32 {
        self.pressure
    }

    /// Manual override (slider), clamped to the simulated range
    pub fn set_pressure(&mut self, pressure_hpa: f32) {
        self.pressure = pressure_hpa.clamp(MIN_SIMULATED_PRESSURE, SEA_LEVEL_PRESSURE);
    }

    /// Advance one step of the walk and return the new pressure
    pub fn step(&mut self) -> f32 {
        let delta = self.rng.random_range(-PRESSURE_STEP..PRESSURE_STEP);
        self.set_pressure(self.pressure + delta);
        self.pressure
    }
}

/// RMS of signed 16-bit PCM, normalized to [0, 1]
pub fn pcm_rms(samples: &[i16]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let sum: f64 = samples
        .iter()
        .map(|&s| {
            let n = f64::from(s) / 32768.0;
            n * n
        })
        .sum();
    Some((sum / samples.len() as f64).sqrt())
}

/// Approximate sound pressure level from a normalized RMS
///
/// `None` for silence (log of zero). Clamped to [0, 120] dB.
pub fn rms_to_decibels(rms: f64) -> Option<f32> {
    if rms.is_nan() || rms <= 0.0 {
        return None;
    }
    let db = (20.0 * rms.log10()) as f32 + 94.0;
    Some(db.clamp(0.0, MAX_DB))
}

/// Sound level of a PCM buffer in dB
pub fn sound_level(samples: &[i16]) -> Option<f32> {
    pcm_rms(samples).and_then(rms_to_decibels)
}

pub fn is_loud(db: f32) -> bool {
    db >= LOUD_THRESHOLD_DB
}
