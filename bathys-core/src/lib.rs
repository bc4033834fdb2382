//! Board-agnostic core logic for the profiling float firmware
//!
//! This crate contains all mission logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (pressure source, actuator, indicator, clock)
//! - Calibration math (voltage to pressure, pressure to depth)
//! - Mission configuration and its key/value parser
//! - Dive state machine, profile recorder and bobbing oscillator
//! - Dive orchestrator
//! - Status snapshot rendering, publication and serving

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod fmt;

pub mod config;
pub mod mission;
pub mod profile;
pub mod state;
pub mod status;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;
