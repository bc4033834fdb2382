//! Hardware abstraction traits
//!
//! These traits define the interface between the mission logic and
//! hardware-specific implementations.

pub mod actuator;
pub mod clock;
pub mod dispatch;
pub mod sensor;

pub use actuator::{Actuator, ActuatorCommand, BlinkPattern, Indicator};
pub use clock::MissionClock;
pub use dispatch::{BackgroundTasks, DispatchError};
pub use sensor::{PressureSource, SensorError};
