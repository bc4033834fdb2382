//! Output drivers

pub mod light;
pub mod solenoid;

pub use light::StatusLight;
pub use solenoid::SolenoidPair;
