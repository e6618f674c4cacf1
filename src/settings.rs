//! Tuning and maze layout settings
//!
//! Loaded from a JSON file; anything missing falls back to the defaults
//! in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{SEA_LEVEL_PRESSURE, TICK_MS};
use crate::error::{Result, SetupError};
use crate::sim::{MazeLayout, Physics};

/// Tilt sensitivity presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Sensitivity {
    Low,
    #[default]
    Medium,
    High,
}

impl Sensitivity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sensitivity::Low => "Low",
            Sensitivity::Medium => "Medium",
            Sensitivity::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Sensitivity::Low),
            "medium" | "med" => Some(Sensitivity::Medium),
            "high" => Some(Sensitivity::High),
            _ => None,
        }
    }

    /// Tilt (degrees) that gives full acceleration
    pub fn tilt_full_scale_deg(&self) -> f32 {
        match self {
            Sensitivity::Low => 90.0,
            Sensitivity::Medium => 60.0,
            Sensitivity::High => 30.0,
        }
    }
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sensitivity: Sensitivity,

    // === Simulation ===
    pub physics: Physics,
    pub layout: MazeLayout,
    /// Nominal tick interval
    pub tick_ms: u64,

    // === Sensors ===
    /// Sensor delivery interval for scripted playback
    pub sensor_interval_ms: u32,
    /// Reference pressure for the altimeter (hPa)
    pub sea_level_pressure: f32,
    /// Seed for scripted sensors and the simulated barometer
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sensitivity: Sensitivity::Medium,
            physics: Physics::default(),
            layout: MazeLayout::default(),
            tick_ms: TICK_MS,
            sensor_interval_ms: 4,
            sea_level_pressure: SEA_LEVEL_PRESSURE,
            seed: 0x5EED,
        }
    }
}

impl Settings {
    /// Create settings from a sensitivity preset
    pub fn from_preset(preset: Sensitivity) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a sensitivity preset (updates the tilt full scale)
    pub fn apply_preset(&mut self, preset: Sensitivity) {
        self.sensitivity = preset;
        self.physics.tilt_full_scale_deg = preset.tilt_full_scale_deg();
    }

    /// Nominal tick in seconds
    pub fn tick_dt(&self) -> f32 {
        self.tick_ms as f32 / 1000.0
    }

    /// Clamp nonsensical values back into range
    pub fn validate(mut self) -> Self {
        let defaults = Physics::default();
        let p = &mut self.physics;
        if !(p.damping > 0.0 && p.damping <= 1.0) {
            log::warn!("damping {} out of range, using {}", p.damping, defaults.damping);
            p.damping = defaults.damping;
        }
        p.bounce = if p.bounce.is_nan() {
            defaults.bounce
        } else {
            p.bounce.clamp(0.0, 1.0)
        };
        if !(p.ball_radius.is_finite() && p.ball_radius > 0.0) {
            p.ball_radius = defaults.ball_radius;
        }
        if !(p.tilt_full_scale_deg.is_finite() && p.tilt_full_scale_deg > 0.0) {
            p.tilt_full_scale_deg = defaults.tilt_full_scale_deg;
        }
        if !p.accel_scale.is_finite() {
            p.accel_scale = defaults.accel_scale;
        }
        if self.tick_ms == 0 {
            self.tick_ms = TICK_MS;
        }
        if self.sensor_interval_ms == 0 {
            self.sensor_interval_ms = 1;
        }
        if !(self.sea_level_pressure.is_finite() && self.sea_level_pressure > 0.0) {
            self.sea_level_pressure = SEA_LEVEL_PRESSURE;
        }
        self
    }

    /// Parse settings from JSON
    ///
    /// The sensitivity preset sets the tilt full scale unless the file
    /// gives `physics.tilt_full_scale_deg` explicitly, which wins.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| SetupError::Settings(e.to_string()))?;
        let explicit_full_scale = value.pointer("/physics/tilt_full_scale_deg").is_some();
        let mut settings: Settings =
            serde_json::from_value(value).map_err(|e| SetupError::Settings(e.to_string()))?;
        if !explicit_full_scale {
            settings.physics.tilt_full_scale_deg = settings.sensitivity.tilt_full_scale_deg();
        }
        Ok(settings.validate())
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SetupError::Settings(e.to_string()))
    }

    /// Read settings from a JSON file
    pub fn read(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| SetupError::Settings(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Write settings to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)
            .map_err(|e| SetupError::Settings(format!("{}: {}", path.display(), e)))?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
