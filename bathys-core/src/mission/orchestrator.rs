//! Dive orchestrator
//!
//! Runs the whole mission on one sequential control flow:
//!
//! ```text
//! Boot ─► Idle ─► Descending1 ─► Descending2 ─► Surfacing ─► Idle ─► … ─► Done
//!                      │
//!                      └─► bob_async (background, only past the threshold)
//! ```
//!
//! Actuation during a phase is handed to background tasks; the orchestrator
//! itself only waits on the sampling cadence, the boot self-test and the
//! surface pause between cycles.

use embassy_sync::blocking_mutex::raw::RawMutex;

use super::{MissionError, MissionState, ProfileRecorder};
use crate::config::MissionConfig;
use crate::profile::{ProfilePhase, ProfileRecord};
use crate::state::{DiveState, Event};
use crate::status::Publisher;
use crate::traits::{
    Actuator, BackgroundTasks, BlinkPattern, DispatchError, MissionClock, PressureSource,
};

/// Length of each self-test stroke at boot
pub const SELF_TEST_PULSE_MS: u32 = 500;
/// Pause between the self-test sink and surface strokes
pub const SELF_TEST_PAUSE_MS: u32 = 200;

/// Top-level mission controller
pub struct Orchestrator<'a, P, C, A, T, M>
where
    M: RawMutex,
{
    config: MissionConfig,
    recorder: ProfileRecorder,
    source: P,
    clock: C,
    /// Used directly only for the boot self-test
    actuator: A,
    tasks: T,
    publisher: Publisher<'a, M>,
    state: MissionState,
}

impl<'a, P, C, A, T, M> Orchestrator<'a, P, C, A, T, M>
where
    P: PressureSource,
    C: MissionClock,
    A: Actuator,
    T: BackgroundTasks,
    M: RawMutex,
{
    pub fn new(
        config: MissionConfig,
        source: P,
        clock: C,
        actuator: A,
        tasks: T,
        publisher: Publisher<'a, M>,
    ) -> Self {
        Self {
            recorder: ProfileRecorder::new(&config),
            config,
            source,
            clock,
            actuator,
            tasks,
            publisher,
            state: MissionState::new(),
        }
    }

    pub fn state(&self) -> &MissionState {
        &self.state
    }

    pub fn config(&self) -> &MissionConfig {
        &self.config
    }

    /// Run boot and every dive cycle
    ///
    /// Returns once the mission is `Done`, or on the first error. After an
    /// error the state is `Error` and the last published snapshot stays
    /// in place.
    pub async fn run(&mut self) -> Result<(), MissionError> {
        let result = self.execute().await;
        if let Err(e) = result {
            error!("Mission aborted: {}", e);
            self.state.apply(Event::ErrorDetected(e.kind()));
        }
        result
    }

    async fn execute(&mut self) -> Result<(), MissionError> {
        self.boot().await?;

        let cycles = self.config.num_profiles;
        for cycle in 1..=cycles {
            self.dive_cycle().await?;
            if cycle < cycles {
                info!("Waiting {}ms at the surface", self.config.wait_surface_ms());
                self.clock.wait_ms(self.config.wait_surface_ms()).await;
            }
        }

        self.state.apply(Event::MissionComplete);
        self.publish();
        info!("Mission complete: {} profiles", self.state.profiles().len());
        Ok(())
    }

    async fn boot(&mut self) -> Result<(), MissionError> {
        info!("Boot");
        let blink = self.tasks.blink_async(BlinkPattern::ALIVE);
        self.check_dispatch(blink);

        self.actuator.sink(SELF_TEST_PULSE_MS).await;
        self.clock.wait_ms(SELF_TEST_PAUSE_MS).await;
        self.actuator.surface(SELF_TEST_PULSE_MS).await;

        let reading = self.recorder.read_once(&mut self.source, &self.clock).await?;
        info!(
            "Initial reading: {}ms {}hPa {}m",
            reading.elapsed_ms,
            reading.pressure_hpa,
            reading.depth_m
        );
        self.state.set_boot_reading(reading);
        self.state.apply(Event::BootComplete);
        self.publish();

        self.clock.wait_ms(self.config.wait_surface_ms()).await;
        Ok(())
    }

    async fn dive_cycle(&mut self) -> Result<(), MissionError> {
        let number = self.state.begin_profile();
        self.state.apply(Event::CycleStart);
        info!("Profile {} of {}", number, self.config.num_profiles);

        // First descent
        let sink = self.tasks.sink_async(self.config.sink_ms());
        self.check_dispatch(sink);
        self.record_phase(ProfilePhase::Descent).await?;

        // Station keeping
        let pressure = self.source.sample().await?;
        let depth = self.config.calibration.depth_m(pressure);
        if depth >= self.config.depth_threshold_m {
            info!("Depth {}m reached threshold, bobbing", depth);
            match self.tasks.bob_async(self.config.bobbing_duration_ms()) {
                Ok(()) => self.state.mark_bobbed(),
                Err(e) => {
                    warn!("Bobbing not started: {}", e);
                }
            }
        } else {
            debug!("Depth {}m below threshold", depth);
        }
        self.state.apply(Event::FirstDescentRecorded);

        // Second descent
        let sink = self.tasks.sink_async(self.config.sink_ms());
        self.check_dispatch(sink);
        self.record_phase(ProfilePhase::Descent).await?;
        self.state.apply(Event::SecondDescentRecorded);

        // Ascent
        let surface = self.tasks.surface_async(self.config.surface_ms());
        self.check_dispatch(surface);
        let record = self.record(ProfilePhase::Ascent).await?;
        self.state.push_segment(record)?;
        self.state.finish_profile()?;
        self.state.apply(Event::AscentRecorded);
        self.publish();

        let blink = self.tasks.blink_async(BlinkPattern::PROFILE_DONE);
        self.check_dispatch(blink);
        Ok(())
    }

    /// Record a phase into the profile in progress and publish it
    async fn record_phase(&mut self, phase: ProfilePhase) -> Result<(), MissionError> {
        let record = self.record(phase).await?;
        self.state.push_segment(record)?;
        self.publish();
        Ok(())
    }

    async fn record(&mut self, phase: ProfilePhase) -> Result<ProfileRecord, MissionError> {
        self.state.set_phase(phase);
        self.recorder
            .record(&mut self.source, &mut self.clock, phase)
            .await
    }

    fn publish(&self) {
        if let Err(e) = self.publisher.publish(&self.state) {
            warn!("Status snapshot not updated: {}", e);
        }
    }

    fn check_dispatch(&self, result: Result<(), DispatchError>) {
        if let Err(e) = result {
            warn!("Background request dropped: {}", e);
        }
    }

    /// Current orchestrator state
    pub fn dive_state(&self) -> DiveState {
        self.state.dive_state()
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    use super::*;
    use crate::state::ErrorKind;
    use crate::status::{StatusBoard, Template};
    use crate::testing::{RecordingActuator, RecordingTasks, ScriptedSource, VirtualClock};
    use crate::traits::{ActuatorCommand, SensorError};

    fn template() -> Template<'static> {
        Template::new(
            "<p>{} {} {}</p>",
            "<h2>{} {}</h2>",
            "<tr>{}|{}|{}</tr>",
            "<hr>",
            "<p>{}</p>",
        )
        .unwrap()
    }

    fn config(num_profiles: u8, samples: u8, interval_s: u16) -> MissionConfig {
        MissionConfig {
            num_profiles,
            samples_per_phase: samples,
            sample_interval_s: interval_s,
            ..MissionConfig::default()
        }
    }

    struct Run {
        result: Result<(), MissionError>,
        state: MissionState,
        tasks: RecordingTasks,
        commands: heapless::Vec<ActuatorCommand, 128>,
        samples_taken: usize,
        end_ms: u32,
    }

    fn run_mission(
        config: MissionConfig,
        source: ScriptedSource<'_>,
        tasks: RecordingTasks,
        board: &StatusBoard<NoopRawMutex>,
    ) -> Run {
        let now = Cell::new(0);
        let mut orchestrator = Orchestrator::new(
            config,
            source,
            VirtualClock::new(&now),
            RecordingActuator::with_clock(&now),
            tasks,
            Publisher::new(template(), board),
        );
        let result = block_on(orchestrator.run());
        let Orchestrator {
            source,
            actuator,
            tasks,
            state,
            ..
        } = orchestrator;
        Run {
            result,
            state,
            tasks,
            commands: actuator.commands,
            samples_taken: source.taken,
            end_ms: now.get(),
        }
    }

    #[test]
    fn test_single_profile_at_surface_pressure() {
        let board = StatusBoard::new();
        let run = run_mission(
            config(1, 2, 0),
            ScriptedSource::new(&[101.325]),
            RecordingTasks::default(),
            &board,
        );

        assert_eq!(run.result, Ok(()));
        assert_eq!(run.state.dive_state(), DiveState::Done);
        assert!(run.tasks.bobs.is_empty());

        let profiles = run.state.profiles();
        assert_eq!(profiles.len(), 1);
        assert!(!profiles[0].bobbed());
        assert!(profiles[0].is_complete());
        for segment in profiles[0].segments() {
            assert_eq!(segment.len(), 2);
            for reading in segment.readings() {
                assert!(reading.depth_m.abs() < 0.005);
            }
        }
        let phases: heapless::Vec<ProfilePhase, 3> =
            profiles[0].segments().iter().map(|s| s.phase()).collect();
        assert_eq!(
            phases.as_slice(),
            &[ProfilePhase::Descent, ProfilePhase::Descent, ProfilePhase::Ascent]
        );

        // Boot reading, 3 phases of 2 and the threshold sample
        assert_eq!(run.samples_taken, 8);
    }

    #[test]
    fn test_bobbing_triggered_past_threshold() {
        let board = StatusBoard::new();
        // boot, first descent (2), threshold check at 2.6 m, then shallow
        let pressures = [101.3, 105.0, 110.2, 126.75, 112.0, 108.0, 104.0, 101.4];
        let run = run_mission(
            config(1, 2, 5),
            ScriptedSource::new(&pressures),
            RecordingTasks::default(),
            &board,
        );

        assert_eq!(run.result, Ok(()));
        assert_eq!(run.tasks.bobs.as_slice(), &[45_000]);
        assert!(run.state.profiles()[0].bobbed());
    }

    #[test]
    fn test_no_bobbing_just_below_threshold() {
        let board = StatusBoard::new();
        // 2.45 m at the check
        let pressures = [101.3, 105.0, 110.2, 125.28, 101.4];
        let run = run_mission(
            config(1, 2, 5),
            ScriptedSource::new(&pressures),
            RecordingTasks::default(),
            &board,
        );

        assert_eq!(run.result, Ok(()));
        assert!(run.tasks.bobs.is_empty());
        assert!(!run.state.profiles()[0].bobbed());
    }

    #[test]
    fn test_runs_configured_number_of_profiles() {
        let board = StatusBoard::new();
        let run = run_mission(
            config(3, 4, 5),
            ScriptedSource::new(&[110.0]),
            RecordingTasks::default(),
            &board,
        );

        assert_eq!(run.result, Ok(()));
        let profiles = run.state.profiles();
        assert_eq!(profiles.len(), 3);
        for (i, profile) in profiles.iter().enumerate() {
            assert_eq!(profile.number(), i as u8 + 1);
            assert!(profile.is_complete());
            assert_eq!(profile.readings().count(), 12);
        }

        // Each cycle: sink, sink, surface
        assert_eq!(run.tasks.actuations.len(), 9);
        assert_eq!(
            &run.tasks.actuations[..3],
            &[
                ActuatorCommand::Sink { duration_ms: 6_000 },
                ActuatorCommand::Sink { duration_ms: 6_000 },
                ActuatorCommand::Surface { duration_ms: 6_000 },
            ]
        );

        assert_eq!(run.tasks.blinks[0], BlinkPattern::ALIVE);
        assert_eq!(run.tasks.blinks.len(), 4);
        assert!(run.tasks.blinks[1..]
            .iter()
            .all(|b| *b == BlinkPattern::PROFILE_DONE));

        // Self-test, boot pause, 9 phases of 4 x 5 s and 2 pauses between
        // cycles
        assert_eq!(run.end_ms, 1_200 + 45_000 + 9 * 20_000 + 2 * 45_000);
    }

    #[test]
    fn test_elapsed_time_increases_across_profiles() {
        let board = StatusBoard::new();
        let run = run_mission(
            config(2, 3, 5),
            ScriptedSource::new(&[101.325]),
            RecordingTasks::default(),
            &board,
        );

        // Strictly increasing within a phase; a phase may start at the
        // instant the previous one ended
        for segment in run.state.all_profiles().flat_map(|p| p.segments()) {
            let readings = segment.readings();
            assert!(readings.windows(2).all(|w| w[1].elapsed_ms > w[0].elapsed_ms));
        }
        let mut last = 0;
        for reading in run.state.all_profiles().flat_map(|p| p.readings()) {
            assert!(reading.elapsed_ms >= last);
            last = reading.elapsed_ms;
        }
        let boot = run.state.boot_reading().unwrap();
        assert_eq!(boot.elapsed_ms, 1_200);
    }

    #[test]
    fn test_boot_self_test() {
        let board = StatusBoard::new();
        let run = run_mission(
            config(1, 1, 0),
            ScriptedSource::new(&[101.325]),
            RecordingTasks::default(),
            &board,
        );

        assert_eq!(
            run.commands.as_slice(),
            &[
                ActuatorCommand::Sink {
                    duration_ms: SELF_TEST_PULSE_MS
                },
                ActuatorCommand::Surface {
                    duration_ms: SELF_TEST_PULSE_MS
                },
            ]
        );
    }

    #[test]
    fn test_sensor_failure_aborts_and_keeps_snapshot() {
        let board = StatusBoard::new();
        // Fails on the threshold sample after the first descent
        let run = run_mission(
            config(2, 2, 5),
            ScriptedSource::new(&[101.3, 105.0, 110.2]).failing_at(3),
            RecordingTasks::default(),
            &board,
        );

        assert_eq!(run.result, Err(MissionError::Sensor(SensorError::Bus)));
        assert_eq!(
            run.state.dive_state(),
            DiveState::Error(ErrorKind::SensorFault)
        );
        assert!(run.state.profiles().is_empty());
        assert_eq!(run.state.in_progress().map(|p| p.segments().len()), Some(1));

        // Boot snapshot and the first descent; nothing after the fault
        assert_eq!(board.generation(), 2);
        assert!(board.read(|page| page.contains("<tr>51.200|110.20|")));
        assert!(board.read(|page| page.ends_with("<p>descending</p>")));
    }

    #[test]
    fn test_boot_reading_failure() {
        let board = StatusBoard::new();
        let run = run_mission(
            config(1, 2, 0),
            ScriptedSource::new(&[101.325]).failing_at(0),
            RecordingTasks::default(),
            &board,
        );

        assert!(run.result.is_err());
        assert!(run.state.dive_state().is_error());
        assert_eq!(board.generation(), 0);
    }

    #[test]
    fn test_dropped_background_requests_do_not_abort() {
        let board = StatusBoard::new();
        let tasks = RecordingTasks {
            saturated: true,
            ..RecordingTasks::default()
        };
        let run = run_mission(
            config(2, 2, 0),
            ScriptedSource::new(&[130.0]),
            tasks,
            &board,
        );

        assert_eq!(run.result, Ok(()));
        assert_eq!(run.state.profiles().len(), 2);
        assert!(run.tasks.actuations.is_empty());
        assert!(run.tasks.bobs.is_empty());
        assert!(!run.state.profiles()[0].bobbed());
    }

    #[test]
    fn test_final_snapshot_shows_done() {
        let board = StatusBoard::new();
        let run = run_mission(
            config(1, 2, 0),
            ScriptedSource::new(&[101.325]),
            RecordingTasks::default(),
            &board,
        );

        assert_eq!(run.result, Ok(()));
        assert!(board.read(|page| page.ends_with("<p>done</p>")));
        assert_eq!(board.read(|page| page.matches("<tr>").count()), 6);
    }
}
