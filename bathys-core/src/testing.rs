//! Mock hardware for host tests

use core::cell::Cell;

use heapless::Vec;

use crate::traits::{
    Actuator, ActuatorCommand, BackgroundTasks, BlinkPattern, DispatchError, MissionClock,
    PressureSource, SensorError,
};

/// Clock that jumps straight to each deadline
pub struct VirtualClock<'a> {
    now: &'a Cell<u32>,
    pub waits: usize,
}

impl<'a> VirtualClock<'a> {
    pub fn new(now: &'a Cell<u32>) -> Self {
        Self { now, waits: 0 }
    }
}

impl MissionClock for VirtualClock<'_> {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }

    async fn wait_until(&mut self, deadline_ms: u32) {
        self.waits += 1;
        if deadline_ms > self.now.get() {
            self.now.set(deadline_ms);
        }
    }
}

/// Replays a fixed pressure sequence, repeating the last value when
/// exhausted
pub struct ScriptedSource<'a> {
    values: &'a [f32],
    pub taken: usize,
    fail_at: Option<usize>,
}

impl<'a> ScriptedSource<'a> {
    pub fn new(values: &'a [f32]) -> Self {
        Self {
            values,
            taken: 0,
            fail_at: None,
        }
    }

    /// Fail with a bus error on the `index`-th sample (0-based)
    pub fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }
}

impl PressureSource for ScriptedSource<'_> {
    async fn sample(&mut self) -> Result<f32, SensorError> {
        let index = self.taken;
        self.taken += 1;
        if self.fail_at == Some(index) {
            return Err(SensorError::Bus);
        }
        let value = self
            .values
            .get(index)
            .or(self.values.last())
            .copied()
            .unwrap_or(101.325);
        Ok(value)
    }
}

/// Records every actuation and advances a shared clock by its duration
pub struct RecordingActuator<'a> {
    now: Option<&'a Cell<u32>>,
    pub commands: Vec<ActuatorCommand, 128>,
}

impl<'a> RecordingActuator<'a> {
    pub fn new() -> Self {
        Self {
            now: None,
            commands: Vec::new(),
        }
    }

    pub fn with_clock(now: &'a Cell<u32>) -> Self {
        Self {
            now: Some(now),
            commands: Vec::new(),
        }
    }

    fn record(&mut self, command: ActuatorCommand) {
        let _ = self.commands.push(command);
        if let Some(now) = self.now {
            now.set(now.get() + command.duration_ms());
        }
    }
}

impl Actuator for RecordingActuator<'_> {
    async fn sink(&mut self, duration_ms: u32) {
        self.record(ActuatorCommand::Sink { duration_ms });
    }

    async fn surface(&mut self, duration_ms: u32) {
        self.record(ActuatorCommand::Surface { duration_ms });
    }
}

/// Records every background request instead of running it
#[derive(Default)]
pub struct RecordingTasks {
    pub actuations: Vec<ActuatorCommand, 64>,
    pub bobs: Vec<u32, 16>,
    pub blinks: Vec<BlinkPattern, 16>,
    /// Reject every request as if the queues were full
    pub saturated: bool,
}

impl BackgroundTasks for RecordingTasks {
    fn actuate(&mut self, command: ActuatorCommand) -> Result<(), DispatchError> {
        if self.saturated {
            return Err(DispatchError::QueueFull);
        }
        self.actuations
            .push(command)
            .map_err(|_| DispatchError::QueueFull)
    }

    fn bob_async(&mut self, duration_ms: u32) -> Result<(), DispatchError> {
        if self.saturated {
            return Err(DispatchError::QueueFull);
        }
        self.bobs.push(duration_ms).map_err(|_| DispatchError::QueueFull)
    }

    fn blink_async(&mut self, pattern: BlinkPattern) -> Result<(), DispatchError> {
        if self.saturated {
            return Err(DispatchError::QueueFull);
        }
        self.blinks.push(pattern).map_err(|_| DispatchError::QueueFull)
    }
}
