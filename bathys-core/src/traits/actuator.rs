//! Buoyancy actuator and indicator traits

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Syringe actuator with separate sink and surface solenoids
///
/// Each call asserts one output for the given duration and deasserts it
/// before returning. There is no interlock between the two outputs;
/// callers that share an actuator must serialise access.
#[allow(async_fn_in_trait)]
pub trait Actuator {
    /// Draw water in (float gets heavier)
    async fn sink(&mut self, duration_ms: u32);

    /// Push water out (float gets lighter)
    async fn surface(&mut self, duration_ms: u32);
}

/// Operator feedback light
#[allow(async_fn_in_trait)]
pub trait Indicator {
    /// Run one blink pattern to completion
    async fn blink(&mut self, pattern: BlinkPattern);
}

/// One timed actuation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ActuatorCommand {
    /// Assert the sink solenoid
    Sink { duration_ms: u32 },
    /// Assert the surface solenoid
    Surface { duration_ms: u32 },
}

impl ActuatorCommand {
    pub fn duration_ms(&self) -> u32 {
        match *self {
            ActuatorCommand::Sink { duration_ms } | ActuatorCommand::Surface { duration_ms } => {
                duration_ms
            }
        }
    }

    /// Carry out this command on an actuator
    pub async fn apply<A: Actuator>(self, actuator: &mut A) {
        match self {
            ActuatorCommand::Sink { duration_ms } => actuator.sink(duration_ms).await,
            ActuatorCommand::Surface { duration_ms } => actuator.surface(duration_ms).await,
        }
    }
}

/// Blink count and half-period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlinkPattern {
    /// Number of on/off cycles
    pub times: u8,
    /// Duration of each on and each off half-cycle (ms)
    pub half_period_ms: u16,
}

impl BlinkPattern {
    /// Boot: "alive" signal for the operator
    pub const ALIVE: Self = Self::new(3, 500);
    /// A profile has been completed and published
    pub const PROFILE_DONE: Self = Self::new(5, 250);

    pub const fn new(times: u8, half_period_ms: u16) -> Self {
        Self {
            times,
            half_period_ms,
        }
    }

    /// Total time the pattern takes to run (ms)
    pub fn duration_ms(&self) -> u32 {
        self.times as u32 * self.half_period_ms as u32 * 2
    }
}
