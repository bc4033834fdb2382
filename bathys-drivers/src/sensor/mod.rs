//! Pressure sources

pub mod ads1115;
pub mod synthetic;
pub mod transducer;

pub use ads1115::{Ads1115, DataRate, Gain};
pub use synthetic::SyntheticPressure;
pub use transducer::PressureTransducer;
