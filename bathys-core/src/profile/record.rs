//! Per-phase records and per-cycle profiles

use heapless::Vec;

use super::reading::{PressureReading, ProfilePhase};
use crate::config::{MAX_SAMPLES_PER_PHASE, SEGMENTS_PER_PROFILE};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Readings taken during one phase, in sample order
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProfileRecord {
    phase: ProfilePhase,
    readings: Vec<PressureReading, MAX_SAMPLES_PER_PHASE>,
}

impl ProfileRecord {
    pub const fn new(phase: ProfilePhase) -> Self {
        Self {
            phase,
            readings: Vec::new(),
        }
    }

    pub fn phase(&self) -> ProfilePhase {
        self.phase
    }

    /// Append a reading
    ///
    /// Returns the reading back if the record is full.
    pub fn push(&mut self, reading: PressureReading) -> Result<(), PressureReading> {
        self.readings.push(reading)
    }

    pub fn readings(&self) -> &[PressureReading] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Most recent reading
    pub fn last(&self) -> Option<&PressureReading> {
        self.readings.last()
    }
}

/// Complete dataset for one dive cycle
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Profile {
    /// 1-based cycle index
    number: u8,
    segments: Vec<ProfileRecord, SEGMENTS_PER_PROFILE>,
    /// Station-keeping was started during this cycle
    bobbed: bool,
}

impl Profile {
    pub const fn new(number: u8) -> Self {
        Self {
            number,
            segments: Vec::new(),
            bobbed: false,
        }
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn bobbed(&self) -> bool {
        self.bobbed
    }

    pub fn mark_bobbed(&mut self) {
        self.bobbed = true;
    }

    /// Append a finished phase record
    ///
    /// Returns the record back if the profile already holds all segments.
    pub fn push_segment(&mut self, record: ProfileRecord) -> Result<(), ProfileRecord> {
        self.segments.push(record)
    }

    pub fn segments(&self) -> &[ProfileRecord] {
        &self.segments
    }

    /// All readings across segments, in recording order
    pub fn readings(&self) -> impl Iterator<Item = &PressureReading> + '_ {
        self.segments.iter().flat_map(|s| s.readings().iter())
    }

    /// Whether both descents and the ascent have been recorded
    pub fn is_complete(&self) -> bool {
        self.segments.len() == SEGMENTS_PER_PROFILE
    }
}
