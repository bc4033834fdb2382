//! Configuration type definitions

use super::calibration::Calibration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum dive cycles per mission
pub const MAX_PROFILES: usize = 8;

/// Maximum readings recorded per phase
pub const MAX_SAMPLES_PER_PHASE: usize = 16;

/// Recorded segments per profile (two descents, one ascent)
pub const SEGMENTS_PER_PROFILE: usize = 3;

/// Maximum readings across the whole mission, so the status page fits
/// its snapshot buffer
pub const MAX_READINGS: usize = 96;

/// Where pressure readings come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PressureMode {
    /// Real transducer behind the ADC
    #[default]
    Sensor,
    /// Uniform synthetic readings (debug mode)
    Synthetic,
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Line is neither a section header nor `key = value`
    Syntax { line: u16 },
    /// Key not recognized in the current section
    UnknownKey { line: u16 },
    /// Section header not recognized
    UnknownSection { line: u16 },
    /// Value could not be parsed for its key
    InvalidValue { line: u16 },
    /// `num_profiles` outside 1..=MAX_PROFILES
    ProfileCount,
    /// `samples_per_phase` outside 1..=MAX_SAMPLES_PER_PHASE
    SampleCount,
    /// Mission would record more than MAX_READINGS readings
    ReadingCount,
    /// Depth calibration divisor is zero, negative or not finite
    DepthDivisor,
    /// Depth threshold is not finite
    DepthThreshold,
}

/// Mission timing and calibration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MissionConfig {
    /// Sink actuation per descent segment (seconds)
    pub sink_s: u16,
    /// Surface actuation for the ascent (seconds)
    pub surface_s: u16,
    /// Pause at the surface between cycles (seconds)
    pub wait_surface_s: u16,
    /// Station-keeping duration once the threshold is reached (seconds)
    pub bobbing_duration_s: u16,
    /// Number of dive cycles
    pub num_profiles: u8,
    /// Depth at which station-keeping starts (metres)
    pub depth_threshold_m: f32,
    /// Readings per recorded phase
    pub samples_per_phase: u8,
    /// Time between readings (seconds)
    pub sample_interval_s: u16,
    /// Pressure source selection
    pub pressure_mode: PressureMode,
    /// Calibration constants
    pub calibration: Calibration,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            sink_s: 6,
            surface_s: 6,
            wait_surface_s: 45,
            bobbing_duration_s: 45,
            num_profiles: 3,
            depth_threshold_m: 2.5,
            samples_per_phase: 8,
            sample_interval_s: 5,
            pressure_mode: PressureMode::Sensor,
            calibration: Calibration::default(),
        }
    }
}

impl MissionConfig {
    /// Check limits that the fixed-capacity mission state depends on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_profiles == 0 || self.num_profiles as usize > MAX_PROFILES {
            return Err(ConfigError::ProfileCount);
        }
        if self.samples_per_phase == 0 || self.samples_per_phase as usize > MAX_SAMPLES_PER_PHASE
        {
            return Err(ConfigError::SampleCount);
        }
        if self.total_readings() > MAX_READINGS {
            return Err(ConfigError::ReadingCount);
        }
        let divisor = self.calibration.hpa_per_meter;
        if !divisor.is_finite() || divisor <= 0.0 {
            return Err(ConfigError::DepthDivisor);
        }
        if !self.depth_threshold_m.is_finite() {
            return Err(ConfigError::DepthThreshold);
        }
        Ok(())
    }

    /// Readings recorded over the whole mission
    pub fn total_readings(&self) -> usize {
        self.num_profiles as usize * SEGMENTS_PER_PROFILE * self.samples_per_phase as usize
    }

    /// Whether readings come from the synthetic generator
    pub fn debug_mode(&self) -> bool {
        self.pressure_mode == PressureMode::Synthetic
    }

    pub fn sink_ms(&self) -> u32 {
        self.sink_s as u32 * 1000
    }

    pub fn surface_ms(&self) -> u32 {
        self.surface_s as u32 * 1000
    }

    pub fn wait_surface_ms(&self) -> u32 {
        self.wait_surface_s as u32 * 1000
    }

    pub fn bobbing_duration_ms(&self) -> u32 {
        self.bobbing_duration_s as u32 * 1000
    }

    pub fn sample_interval_ms(&self) -> u32 {
        self.sample_interval_s as u32 * 1000
    }
}
