//! Timestamped pressure readings

use crate::config::{round_centi, Calibration};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Phase of a dive cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ProfilePhase {
    /// Sinking towards the bottom
    Descent,
    /// Holding station at depth (never recorded)
    Bob,
    /// Returning to the surface
    Ascent,
}

impl ProfilePhase {
    /// Short label used in logs and the status page
    pub fn label(&self) -> &'static str {
        match self {
            ProfilePhase::Descent => "down",
            ProfilePhase::Bob => "bob",
            ProfilePhase::Ascent => "up",
        }
    }
}

/// One pressure sample with its derived depth
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PressureReading {
    /// Milliseconds since mission start
    pub elapsed_ms: u32,
    /// Calibrated pressure (hPa, 2 decimals)
    pub pressure_hpa: f32,
    /// Derived depth (m, 2 decimals)
    pub depth_m: f32,
}

impl PressureReading {
    /// Build a reading, deriving depth from the calibration
    pub fn new(elapsed_ms: u32, pressure_hpa: f32, calibration: &Calibration) -> Self {
        Self {
            elapsed_ms,
            pressure_hpa,
            depth_m: round_centi(calibration.depth_m(pressure_hpa)),
        }
    }
}
