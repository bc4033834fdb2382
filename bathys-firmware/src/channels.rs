//! Inter-task communication channels
//!
//! Static channels the orchestrator uses to hand work to background
//! tasks, plus the published status snapshot.

use bathys_core::status::StatusBoard;
use bathys_core::traits::{ActuatorCommand, BlinkPattern};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

/// Queued timed actuations
const ACTUATOR_CHANNEL_SIZE: usize = 8;

/// Queued bobbing requests
const BOB_CHANNEL_SIZE: usize = 2;

/// Queued blink patterns
const BLINK_CHANNEL_SIZE: usize = 4;

/// Sink/surface pulses for the actuator task
pub static ACTUATOR_CHANNEL: Channel<CriticalSectionRawMutex, ActuatorCommand, ACTUATOR_CHANNEL_SIZE> =
    Channel::new();

/// Bobbing durations (ms) for the bobbing task
pub static BOB_CHANNEL: Channel<CriticalSectionRawMutex, u32, BOB_CHANNEL_SIZE> = Channel::new();

/// Patterns for the indicator task
pub static BLINK_CHANNEL: Channel<CriticalSectionRawMutex, BlinkPattern, BLINK_CHANNEL_SIZE> =
    Channel::new();

/// Latest rendered status page, read by the HTTP server
pub static STATUS_BOARD: StatusBoard<CriticalSectionRawMutex> = StatusBoard::new();
