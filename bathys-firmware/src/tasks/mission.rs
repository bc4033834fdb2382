//! Mission task
//!
//! Owns the orchestrator. Once the mission ends (done or aborted) the task
//! returns; the status server keeps serving the last snapshot.

use bathys_core::config::MissionConfig;
use bathys_core::mission::Orchestrator;
use bathys_core::status::{Publisher, Template};
use defmt::*;

use crate::channels::STATUS_BOARD;
use crate::platform::{ChannelTasks, EmbassyClock, FloatPressure, SharedSolenoids};

#[embassy_executor::task]
pub async fn mission_task(
    config: MissionConfig,
    source: FloatPressure,
    solenoids: &'static SharedSolenoids,
    template: Template<'static>,
    clock: EmbassyClock,
) {
    info!(
        "Mission: {} profiles, {} samples every {}s, threshold {}m",
        config.num_profiles,
        config.samples_per_phase,
        config.sample_interval_s,
        config.depth_threshold_m
    );

    let mut orchestrator = Orchestrator::new(
        config,
        source,
        clock,
        solenoids.handle(),
        ChannelTasks,
        Publisher::new(template, &STATUS_BOARD),
    );

    match orchestrator.run().await {
        Ok(()) => info!("Mission finished, serving results"),
        Err(e) => error!("Mission aborted: {}", e),
    }
}
