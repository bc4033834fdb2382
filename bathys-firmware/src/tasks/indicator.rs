//! Indicator task
//!
//! Plays queued blink patterns on the status light.

use bathys_core::traits::Indicator;
use bathys_drivers::actuator::StatusLight;
use embassy_rp::gpio::Output;
use embassy_time::Delay;

use crate::channels::BLINK_CHANNEL;

#[embassy_executor::task]
pub async fn indicator_task(mut light: StatusLight<Output<'static>, Delay>) {
    loop {
        let pattern = BLINK_CHANNEL.receive().await;
        light.blink(pattern).await;
    }
}
