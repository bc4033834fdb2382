//! Mission configuration
//!
//! Timings, counts and calibration constants. Set once at startup and
//! immutable for the rest of the mission.

pub mod calibration;
pub mod parse;
pub mod types;

pub use calibration::*;
pub use parse::parse_mission_config;
pub use types::*;
