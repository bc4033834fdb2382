//! Board bindings for the core traits
//!
//! Embassy-backed clock, the arbitrated solenoid pair, channel-backed
//! background dispatch and the pressure source chosen at boot.

use bathys_core::mission::{ActuatorArbiter, ArbitratedActuator};
use bathys_core::traits::{
    ActuatorCommand, BackgroundTasks, BlinkPattern, DispatchError, MissionClock, PressureSource,
    SensorError,
};
use bathys_drivers::actuator::SolenoidPair;
use bathys_drivers::sensor::{PressureTransducer, SyntheticPressure};
use embassy_rp::clocks::RoscRng;
use embassy_rp::gpio::Output;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{Delay, Duration, Instant, Timer};

use crate::channels::{ACTUATOR_CHANNEL, BLINK_CHANNEL, BOB_CHANNEL};

/// Sink solenoid, surface solenoid
pub type Solenoids = SolenoidPair<Output<'static>, Output<'static>, Delay>;

/// Solenoid pair shared by the orchestrator, actuator and bobbing tasks
pub type SharedSolenoids = ActuatorArbiter<CriticalSectionRawMutex, Solenoids>;

/// One task's view of the shared solenoids; pulses run in request order
pub type SolenoidHandle = ArbitratedActuator<'static, CriticalSectionRawMutex, Solenoids>;

/// Transducer on ADS1115 channel 0
pub type Transducer = PressureTransducer<I2c<'static, I2C0, Async>, Delay>;

/// Mission clock counting from the moment it is created
///
/// Created once in `main`; copies share the same start instant.
#[derive(Clone, Copy)]
pub struct EmbassyClock {
    start: Instant,
}

impl EmbassyClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl MissionClock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        Instant::now().duration_since(self.start).as_millis() as u32
    }

    async fn wait_until(&mut self, deadline_ms: u32) {
        Timer::at(self.start + Duration::from_millis(deadline_ms as u64)).await;
    }
}

/// Background dispatch over the static channels
pub struct ChannelTasks;

impl BackgroundTasks for ChannelTasks {
    fn actuate(&mut self, command: ActuatorCommand) -> Result<(), DispatchError> {
        ACTUATOR_CHANNEL
            .try_send(command)
            .map_err(|_| DispatchError::QueueFull)
    }

    fn bob_async(&mut self, duration_ms: u32) -> Result<(), DispatchError> {
        BOB_CHANNEL
            .try_send(duration_ms)
            .map_err(|_| DispatchError::QueueFull)
    }

    fn blink_async(&mut self, pattern: BlinkPattern) -> Result<(), DispatchError> {
        BLINK_CHANNEL
            .try_send(pattern)
            .map_err(|_| DispatchError::QueueFull)
    }
}

/// Pressure source selected from the mission configuration
pub enum FloatPressure {
    Sensor(Transducer),
    Synthetic(SyntheticPressure<RoscRng>),
}

impl PressureSource for FloatPressure {
    async fn sample(&mut self) -> Result<f32, SensorError> {
        match self {
            FloatPressure::Sensor(transducer) => transducer.sample().await,
            FloatPressure::Synthetic(generator) => generator.sample().await,
        }
    }
}
