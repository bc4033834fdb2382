//! Bobbing task
//!
//! Station keeping runs here so the orchestrator can keep recording.

use bathys_core::mission::bob;
use defmt::*;

use crate::channels::BOB_CHANNEL;
use crate::platform::{EmbassyClock, SharedSolenoids, SolenoidHandle};

#[embassy_executor::task]
pub async fn bobbing_task(solenoids: &'static SharedSolenoids, mut clock: EmbassyClock) {
    info!("Bobbing task started");
    let mut actuator: SolenoidHandle = solenoids.handle();

    loop {
        let duration_ms = BOB_CHANNEL.receive().await;
        bob(&mut actuator, &mut clock, duration_ms).await;
    }
}
