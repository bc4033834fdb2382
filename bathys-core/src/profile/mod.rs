//! Profile data model
//!
//! Readings, per-phase records and per-cycle profiles. All collections are
//! fixed-capacity so mission data never touches the heap.

pub mod reading;
pub mod record;

pub use reading::{PressureReading, ProfilePhase};
pub use record::{Profile, ProfileRecord};
