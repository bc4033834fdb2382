//! Events that trigger state transitions

use super::machine::ErrorKind;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Lifecycle events
    /// Self-test finished and the boot snapshot is published
    BootComplete,
    /// A new dive cycle begins
    CycleStart,

    // Recorder events
    /// First descent segment recorded (threshold check done)
    FirstDescentRecorded,
    /// Second descent segment recorded
    SecondDescentRecorded,
    /// Ascent recorded and the profile finalized
    AscentRecorded,

    /// Every configured cycle has completed
    MissionComplete,

    // Fault events
    /// Fault on the orchestrator's own call chain
    ErrorDetected(ErrorKind),
}

impl Event {
    /// Check if this event comes from the profile recorder
    pub fn is_recorder_event(&self) -> bool {
        matches!(
            self,
            Event::FirstDescentRecorded | Event::SecondDescentRecorded | Event::AscentRecorded
        )
    }

    /// Check if this event indicates an error
    pub fn is_error_event(&self) -> bool {
        matches!(self, Event::ErrorDetected(_))
    }
}
