//! Fire-and-forget background work

use super::actuator::{ActuatorCommand, BlinkPattern};

/// Errors when handing work to a background task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError {
    /// Request queue is full; the request was dropped
    QueueFull,
}

/// Launches background work without waiting for it
///
/// Every method returns as soon as the request is queued. Completion is
/// never reported back, and nothing can be cancelled once queued.
pub trait BackgroundTasks {
    /// Queue a timed actuation for the actuator task
    fn actuate(&mut self, command: ActuatorCommand) -> Result<(), DispatchError>;

    /// Start the bobbing oscillator for `duration_ms` of wall-clock time
    fn bob_async(&mut self, duration_ms: u32) -> Result<(), DispatchError>;

    /// Queue a blink pattern for the indicator task
    fn blink_async(&mut self, pattern: BlinkPattern) -> Result<(), DispatchError>;

    /// Non-blocking [`Actuator::sink`](super::Actuator::sink)
    fn sink_async(&mut self, duration_ms: u32) -> Result<(), DispatchError> {
        self.actuate(ActuatorCommand::Sink { duration_ms })
    }

    /// Non-blocking [`Actuator::surface`](super::Actuator::surface)
    fn surface_async(&mut self, duration_ms: u32) -> Result<(), DispatchError> {
        self.actuate(ActuatorCommand::Surface { duration_ms })
    }
}
