//! Bobbing oscillator
//!
//! Station-keeping by alternating short sink and surface strokes for a
//! fixed wall-clock duration. No readings are taken while bobbing.

use crate::traits::{Actuator, MissionClock};

/// Duration of each sink and each surface stroke
pub const BOB_STROKE_MS: u32 = 1_000;

/// Alternate sink/surface strokes until `duration_ms` has elapsed
///
/// The deadline is checked before each sink+surface pair, so the last
/// pair may run past it by up to two strokes. Returns the number of pairs
/// performed.
pub async fn bob<A, C>(actuator: &mut A, clock: &mut C, duration_ms: u32) -> u32
where
    A: Actuator,
    C: MissionClock,
{
    let end = clock.now_ms().saturating_add(duration_ms);
    info!("Bobbing for {}ms", duration_ms);

    let mut strokes = 0;
    while clock.now_ms() < end {
        actuator.sink(BOB_STROKE_MS).await;
        actuator.surface(BOB_STROKE_MS).await;
        strokes += 1;
    }

    info!("Bobbing finished after {} strokes", strokes);
    strokes
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use embassy_futures::block_on;

    use super::*;
    use crate::testing::{RecordingActuator, VirtualClock};
    use crate::traits::ActuatorCommand;

    #[test]
    fn test_bob_alternates_sink_then_surface() {
        let now = Cell::new(0);
        let mut clock = VirtualClock::new(&now);
        let mut actuator = RecordingActuator::with_clock(&now);

        let strokes = block_on(bob(&mut actuator, &mut clock, 6_000));

        assert_eq!(strokes, 3);
        assert_eq!(actuator.commands.len(), 6);
        for pair in actuator.commands.chunks(2) {
            assert_eq!(pair[0], ActuatorCommand::Sink { duration_ms: BOB_STROKE_MS });
            assert_eq!(pair[1], ActuatorCommand::Surface { duration_ms: BOB_STROKE_MS });
        }
    }

    #[test]
    fn test_bob_runs_for_wall_clock_duration() {
        let now = Cell::new(10_000);
        let mut clock = VirtualClock::new(&now);
        let mut actuator = RecordingActuator::with_clock(&now);

        let strokes = block_on(bob(&mut actuator, &mut clock, 45_000));

        // 45s of 2s pairs: 23 pairs, the last one overruns by 1s
        assert_eq!(strokes, 23);
        assert_eq!(now.get(), 10_000 + 46_000);
    }

    #[test]
    fn test_bob_zero_duration_does_nothing() {
        let now = Cell::new(0);
        let mut clock = VirtualClock::new(&now);
        let mut actuator = RecordingActuator::with_clock(&now);

        assert_eq!(block_on(bob(&mut actuator, &mut clock, 0)), 0);
        assert!(actuator.commands.is_empty());
    }
}
