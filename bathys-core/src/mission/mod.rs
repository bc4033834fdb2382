//! Mission execution
//!
//! The dive orchestrator and the pieces it composes: the profile
//! recorder, the bobbing oscillator, the shared actuator arbiter and the
//! mission state it appends to.

pub mod arbiter;
pub mod bobbing;
pub mod orchestrator;
pub mod recorder;
pub mod state;

pub use arbiter::{ActuatorArbiter, ArbitratedActuator};
pub use bobbing::{bob, BOB_STROKE_MS};
pub use orchestrator::{Orchestrator, SELF_TEST_PAUSE_MS, SELF_TEST_PULSE_MS};
pub use recorder::ProfileRecorder;
pub use state::MissionState;

use crate::state::ErrorKind;
use crate::traits::SensorError;

/// Errors that abort a mission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MissionError {
    /// Pressure sampling failed on the orchestrator's call chain
    Sensor(SensorError),
    /// Mission state is full (configuration exceeded compiled limits)
    Capacity,
}

impl From<SensorError> for MissionError {
    fn from(e: SensorError) -> Self {
        MissionError::Sensor(e)
    }
}

impl MissionError {
    /// State machine fault this error maps to
    pub fn kind(&self) -> ErrorKind {
        match self {
            MissionError::Sensor(_) => ErrorKind::SensorFault,
            MissionError::Capacity => ErrorKind::CapacityExceeded,
        }
    }
}
