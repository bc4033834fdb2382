//! Dive state machine
//!
//! Defines the authoritative sequencing of a mission.
//! The state machine is explicit, finite, and deterministic.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{DiveState, ErrorKind};
