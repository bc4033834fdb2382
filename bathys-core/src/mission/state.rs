//! Accumulated mission data

use heapless::Vec;

use super::MissionError;
use crate::config::MAX_PROFILES;
use crate::profile::{PressureReading, Profile, ProfilePhase, ProfileRecord};
use crate::state::{DiveState, Event};

/// Everything the mission has collected so far
///
/// Created once at boot and only ever appended to. Written by the
/// orchestrator; the status page is rendered from it.
#[derive(Debug, Clone)]
pub struct MissionState {
    /// 1-based index of the current (or last) cycle, 0 before the first
    cycle_index: u8,
    dive_state: DiveState,
    /// Phase currently being recorded
    phase: Option<ProfilePhase>,
    /// Reading taken at boot, shown in the status header
    boot_reading: Option<PressureReading>,
    /// Finalized profiles, oldest first
    profiles: Vec<Profile, MAX_PROFILES>,
    /// Profile of the cycle in progress
    in_progress: Option<Profile>,
}

impl Default for MissionState {
    fn default() -> Self {
        Self::new()
    }
}

impl MissionState {
    pub const fn new() -> Self {
        Self {
            cycle_index: 0,
            dive_state: DiveState::Boot,
            phase: None,
            boot_reading: None,
            profiles: Vec::new(),
            in_progress: None,
        }
    }

    pub fn cycle_index(&self) -> u8 {
        self.cycle_index
    }

    pub fn dive_state(&self) -> DiveState {
        self.dive_state
    }

    pub fn phase(&self) -> Option<ProfilePhase> {
        self.phase
    }

    pub fn boot_reading(&self) -> Option<&PressureReading> {
        self.boot_reading.as_ref()
    }

    /// Finalized profiles, oldest first
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn in_progress(&self) -> Option<&Profile> {
        self.in_progress.as_ref()
    }

    /// Finalized profiles followed by the one in progress, if any
    pub fn all_profiles(&self) -> impl Iterator<Item = &Profile> + '_ {
        self.profiles.iter().chain(self.in_progress.iter())
    }

    /// Apply a state machine event and return the new state
    pub fn apply(&mut self, event: Event) -> DiveState {
        self.dive_state = self.dive_state.transition(event);
        if !self.dive_state.is_recording() {
            self.phase = None;
        }
        self.dive_state
    }

    pub(crate) fn set_boot_reading(&mut self, reading: PressureReading) {
        self.boot_reading = Some(reading);
    }

    pub(crate) fn set_phase(&mut self, phase: ProfilePhase) {
        self.phase = Some(phase);
    }

    /// Open the profile for a new cycle
    pub(crate) fn begin_profile(&mut self) -> u8 {
        self.cycle_index = self.cycle_index.saturating_add(1);
        self.in_progress = Some(Profile::new(self.cycle_index));
        self.cycle_index
    }

    pub(crate) fn mark_bobbed(&mut self) {
        if let Some(profile) = self.in_progress.as_mut() {
            profile.mark_bobbed();
        }
    }

    /// Append a finished phase record to the profile in progress
    pub(crate) fn push_segment(&mut self, record: ProfileRecord) -> Result<(), MissionError> {
        self.in_progress
            .as_mut()
            .ok_or(MissionError::Capacity)?
            .push_segment(record)
            .map_err(|_| MissionError::Capacity)
    }

    /// Move the profile in progress to the finalized list
    pub(crate) fn finish_profile(&mut self) -> Result<(), MissionError> {
        let profile = self.in_progress.take().ok_or(MissionError::Capacity)?;
        self.profiles
            .push(profile)
            .map_err(|_| MissionError::Capacity)
    }
}
