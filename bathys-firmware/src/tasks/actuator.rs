//! Actuator task
//!
//! Runs queued sink/surface pulses one after another, interleaved in
//! request order with bobbing strokes.

use bathys_core::traits::ActuatorCommand;
use defmt::*;

use crate::channels::ACTUATOR_CHANNEL;
use crate::platform::SharedSolenoids;

#[embassy_executor::task]
pub async fn actuator_task(solenoids: &'static SharedSolenoids) {
    info!("Actuator task started");

    loop {
        let command = ACTUATOR_CHANNEL.receive().await;
        match command {
            ActuatorCommand::Sink { duration_ms } => debug!("Sinking for {}ms", duration_ms),
            ActuatorCommand::Surface { duration_ms } => debug!("Surfacing for {}ms", duration_ms),
        }
        solenoids.run(command).await;
    }
}
