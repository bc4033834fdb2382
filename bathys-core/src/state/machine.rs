//! State machine definition
//!
//! All actuation and recording is a function of the current state and an
//! event. Bobbing is not a state: it runs concurrently on a background
//! task and never changes the orchestrator's state.

use super::events::Event;

/// Orchestrator states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DiveState {
    /// Power-on: blink, motor self-test, initial reading
    Boot,
    /// At the surface between cycles
    Idle,
    /// First descent segment being recorded
    Descending1,
    /// Second descent segment being recorded
    Descending2,
    /// Ascent being recorded
    Surfacing,
    /// All cycles completed; status serving continues, no actuation
    Done,
    /// Mission aborted
    Error(ErrorKind),
}

/// Types of errors that abort a mission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// Pressure sensor read failed
    SensorFault,
    /// Mission data outgrew its fixed capacity
    CapacityExceeded,
}

impl DiveState {
    /// Check if this state records readings
    pub fn is_recording(&self) -> bool {
        matches!(
            self,
            DiveState::Descending1 | DiveState::Descending2 | DiveState::Surfacing
        )
    }

    /// Check if this is an error state
    pub fn is_error(&self) -> bool {
        matches!(self, DiveState::Error(_))
    }

    /// Check if no further actuation will happen
    pub fn is_terminal(&self) -> bool {
        matches!(self, DiveState::Done | DiveState::Error(_))
    }

    /// Short label used in logs and the status page
    pub fn label(&self) -> &'static str {
        match self {
            DiveState::Boot => "boot",
            DiveState::Idle => "surface",
            DiveState::Descending1 => "descending",
            DiveState::Descending2 => "descending",
            DiveState::Surfacing => "surfacing",
            DiveState::Done => "done",
            DiveState::Error(_) => "fault",
        }
    }

    /// Process an event and return the next state
    ///
    /// This is the core state transition logic.
    pub fn transition(self, event: Event) -> Self {
        use DiveState::*;
        use Event::*;

        match (self, event) {
            // Terminal states ignore everything
            (Done, _) | (Error(_), _) => self,

            // Faults abort from any active state
            (_, ErrorDetected(kind)) => Error(kind),

            (Boot, BootComplete) => Idle,

            (Idle, CycleStart) => Descending1,
            (Idle, MissionComplete) => Done,

            (Descending1, FirstDescentRecorded) => Descending2,
            (Descending2, SecondDescentRecorded) => Surfacing,
            (Surfacing, AscentRecorded) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}
