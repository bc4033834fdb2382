//! Pressure and depth calibration
//!
//! Converts transducer voltage to pressure and pressure to depth using
//! fixed linear calibrations.

use micromath::F32Ext;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Standard atmospheric pressure at the surface (hPa)
pub const SURFACE_PRESSURE_HPA: f32 = 101.325;

/// Pressure increase per metre of water (hPa/m)
pub const HPA_PER_METER: f32 = 9.78;

/// Transducer output at zero gauge pressure (V)
pub const TRANSDUCER_MIN_V: f32 = 0.5;

/// Transducer output at full scale (V)
pub const TRANSDUCER_MAX_V: f32 = 4.5;

/// Transducer full-scale gauge reading (sensor units)
pub const TRANSDUCER_FULL_SCALE: f32 = 30.0;

/// Sensor units to hPa scale factor
pub const TRANSDUCER_UNITS_TO_HPA: f32 = 6.894757;

/// Fixed calibration constants
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Calibration {
    /// Pressure that corresponds to zero depth (hPa)
    pub surface_pressure_hpa: f32,
    /// Pressure-to-depth divisor (hPa per metre)
    pub hpa_per_meter: f32,
    /// Device-specific trim added to every transducer reading (hPa)
    pub pressure_trim_hpa: f32,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            surface_pressure_hpa: SURFACE_PRESSURE_HPA,
            hpa_per_meter: HPA_PER_METER,
            pressure_trim_hpa: 0.0,
        }
    }
}

impl Calibration {
    /// Convert a pressure reading to depth in metres
    ///
    /// Not clamped: readings just above the surface yield small negative
    /// depths.
    pub fn depth_m(&self, pressure_hpa: f32) -> f32 {
        (pressure_hpa - self.surface_pressure_hpa) / self.hpa_per_meter
    }

    /// Convert a transducer output voltage to calibrated pressure (hPa)
    ///
    /// The voltage span is mapped linearly onto the transducer's gauge range
    /// and then offset by surface pressure and the device trim. Result is
    /// rounded to 2 decimal places.
    pub fn pressure_from_volts(&self, volts: f32) -> f32 {
        let gauge = map_range(
            volts,
            TRANSDUCER_MIN_V,
            TRANSDUCER_MAX_V,
            0.0,
            TRANSDUCER_FULL_SCALE,
        );
        round_centi(
            gauge * TRANSDUCER_UNITS_TO_HPA + self.surface_pressure_hpa + self.pressure_trim_hpa,
        )
    }
}

/// Linear re-mapping of `x` from one range onto another (no clamping)
pub fn map_range(x: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Round to 2 decimal places
pub fn round_centi(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
