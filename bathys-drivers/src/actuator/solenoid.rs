//! Syringe solenoid pair
//!
//! Two GPIO-driven solenoids move the syringe plunger: one draws water in
//! (sink), the other pushes it out (surface). Outputs are active-high.

use bathys_core::traits::Actuator;
use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;

/// Sink and surface solenoids sharing one delay source
pub struct SolenoidPair<S, U, D> {
    sink: S,
    surface: U,
    delay: D,
}

impl<S, U, D> SolenoidPair<S, U, D>
where
    S: OutputPin,
    U: OutputPin,
    D: DelayNs,
{
    /// Take the pins and drive both outputs low
    pub fn new(sink: S, surface: U, delay: D) -> Self {
        let mut pair = Self {
            sink,
            surface,
            delay,
        };
        pair.release();
        pair
    }

    /// Deassert both outputs
    pub fn release(&mut self) {
        set(&mut self.sink, false);
        set(&mut self.surface, false);
    }
}

impl<S, U, D> Actuator for SolenoidPair<S, U, D>
where
    S: OutputPin,
    U: OutputPin,
    D: DelayNs,
{
    async fn sink(&mut self, duration_ms: u32) {
        set(&mut self.sink, true);
        self.delay.delay_ms(duration_ms).await;
        set(&mut self.sink, false);
    }

    async fn surface(&mut self, duration_ms: u32) {
        set(&mut self.surface, true);
        self.delay.delay_ms(duration_ms).await;
        set(&mut self.surface, false);
    }
}

/// GPIO writes on the target cannot fail; errors from other pin types are
/// dropped
pub(crate) fn set<P: OutputPin>(pin: &mut P, high: bool) {
    let _ = if high { pin.set_high() } else { pin.set_low() };
}
