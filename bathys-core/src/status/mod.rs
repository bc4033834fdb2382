//! Status page publication
//!
//! The orchestrator renders the mission state into a page after every
//! phase and swaps it onto a [`StatusBoard`]; the HTTP responder serves
//! whatever page is current.

pub mod board;
pub mod render;
pub mod server;
pub mod template;

pub use board::{Snapshot, StatusBoard, SNAPSHOT_CAPACITY};
pub use render::{render, render_profile, RenderError};
pub use server::{serve_request, ServeError, RESPONSE_HEADER};
pub use template::{RowParseError, Template, TemplateError, TemplatePart};

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::mission::MissionState;

/// Renders mission state and publishes it to a board
pub struct Publisher<'a, M: RawMutex> {
    template: Template<'a>,
    board: &'a StatusBoard<M>,
}

impl<'a, M: RawMutex> Publisher<'a, M> {
    pub fn new(template: Template<'a>, board: &'a StatusBoard<M>) -> Self {
        Self { template, board }
    }

    pub fn template(&self) -> &Template<'a> {
        &self.template
    }

    /// Render `state` and replace the current snapshot
    ///
    /// On error the previous snapshot stays published.
    pub fn publish(&self, state: &MissionState) -> Result<u32, RenderError> {
        let mut snapshot = Snapshot::new();
        render(&self.template, state, &mut snapshot)?;
        let generation = self.board.replace(snapshot);
        debug!("published snapshot generation {}", generation);
        Ok(generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Calibration, MAX_SAMPLES_PER_PHASE};
    use crate::profile::{PressureReading, ProfilePhase, ProfileRecord};
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    fn template(row: &str) -> Template<'_> {
        Template::new("{} {} {}", "{}{}", row, "", "{}").unwrap()
    }

    #[test]
    fn test_publish_replaces_snapshot() {
        let board: StatusBoard<NoopRawMutex> = StatusBoard::new();
        let publisher = Publisher::new(template("[{}|{}|{}]"), &board);

        let mut state = MissionState::new();
        assert_eq!(publisher.publish(&state), Ok(1));
        assert!(board.read(|page| page == "- - -boot"));

        state.set_boot_reading(PressureReading::new(0, 101.325, &Calibration::default()));
        assert_eq!(publisher.publish(&state), Ok(2));
        assert!(board.read(|page| page.starts_with("0.000 101.3")));
    }

    #[test]
    fn test_failed_render_keeps_previous_snapshot() {
        let board: StatusBoard<NoopRawMutex> = StatusBoard::new();
        Publisher::new(template("[{}|{}|{}]"), &board)
            .publish(&MissionState::new())
            .unwrap();

        let cal = Calibration::default();
        let mut record = ProfileRecord::new(ProfilePhase::Descent);
        for i in 0..MAX_SAMPLES_PER_PHASE as u32 {
            record.push(PressureReading::new(i * 1_000, 110.0, &cal)).unwrap();
        }
        let mut state = MissionState::new();
        state.begin_profile();
        state.push_segment(record).unwrap();

        // 16 rows of ~3 KiB each cannot fit in one snapshot
        let mut wide_row: heapless::String<4096> = heapless::String::new();
        wide_row.push_str("<tr>").unwrap();
        for _ in 0..100 {
            wide_row.push_str("<td class=\"padding-cell\"></td>").unwrap();
        }
        wide_row.push_str("{}|{}|{}</tr>").unwrap();

        let wide = Publisher::new(template(&wide_row), &board);
        assert_eq!(wide.publish(&state), Err(RenderError::Overflow));

        assert_eq!(board.generation(), 1);
        assert!(board.read(|page| page == "- - -boot"));
    }
}
