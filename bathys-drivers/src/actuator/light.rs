//! Status light
//!
//! A single LED used for operator feedback (alive at boot, profile done).

use bathys_core::traits::{BlinkPattern, Indicator};
use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;

use super::solenoid::set;

/// Active-high LED
pub struct StatusLight<P, D> {
    pin: P,
    delay: D,
}

impl<P: OutputPin, D: DelayNs> StatusLight<P, D> {
    pub fn new(pin: P, delay: D) -> Self {
        let mut light = Self { pin, delay };
        set(&mut light.pin, false);
        light
    }
}

impl<P: OutputPin, D: DelayNs> Indicator for StatusLight<P, D> {
    async fn blink(&mut self, pattern: BlinkPattern) {
        let half = pattern.half_period_ms as u32;
        for _ in 0..pattern.times {
            set(&mut self.pin, true);
            self.delay.delay_ms(half).await;
            set(&mut self.pin, false);
            self.delay.delay_ms(half).await;
        }
    }
}
