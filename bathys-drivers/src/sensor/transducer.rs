//! Analog pressure transducer read through an ADS1115
//!
//! 0.5 V to 4.5 V ratiometric output over the transducer's gauge range;
//! the conversion to hPa lives in the mission calibration.

use bathys_core::config::Calibration;
use bathys_core::traits::{PressureSource, SensorError};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use super::ads1115::Ads1115;

/// Transducer on one ADS1115 input
pub struct PressureTransducer<I, D> {
    adc: Ads1115<I, D>,
    channel: u8,
    calibration: Calibration,
}

impl<I: I2c, D: DelayNs> PressureTransducer<I, D> {
    pub fn new(adc: Ads1115<I, D>, channel: u8, calibration: Calibration) -> Self {
        Self {
            adc,
            channel,
            calibration,
        }
    }

    /// Read the transducer output voltage
    pub async fn read_volts(&mut self) -> Result<f32, SensorError> {
        let raw = self.adc.read(self.channel).await?;
        Ok(self.adc.raw_to_v(raw))
    }
}

impl<I: I2c, D: DelayNs> PressureSource for PressureTransducer<I, D> {
    async fn sample(&mut self) -> Result<f32, SensorError> {
        let volts = self.read_volts().await?;
        Ok(self.calibration.pressure_from_volts(volts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::ads1115::tests::{MockAds, NoDelay};
    use embassy_futures::block_on;

    fn transducer(code: u16, trim: f32) -> PressureTransducer<MockAds, NoDelay> {
        let calibration = Calibration {
            pressure_trim_hpa: trim,
            ..Calibration::default()
        };
        PressureTransducer::new(
            Ads1115::new(MockAds::new(code), NoDelay::default()),
            0,
            calibration,
        )
    }

    #[test]
    fn test_bottom_of_range_is_surface_pressure() {
        // 4000 codes at gain 1 = 0.5 V
        let mut sensor = transducer(4000, 0.0);
        let p = block_on(sensor.sample()).unwrap();
        assert!((p - 101.325).abs() <= 0.006);
    }

    #[test]
    fn test_mid_range() {
        // 20000 codes = 2.5 V = half scale
        let mut sensor = transducer(20000, 0.0);
        let p = block_on(sensor.sample()).unwrap();
        assert!((p - 204.746).abs() <= 0.011);
    }

    #[test]
    fn test_trim_applied() {
        let mut sensor = transducer(4000, 4.56);
        let p = block_on(sensor.sample()).unwrap();
        assert!((p - 105.885).abs() <= 0.006);
    }

    #[test]
    fn test_bus_error_propagates() {
        let mut sensor = transducer(4000, 0.0);
        sensor.adc = {
            let mut ads = MockAds::new(0);
            ads.fail = true;
            Ads1115::new(ads, NoDelay::default())
        };
        assert_eq!(block_on(sensor.sample()), Err(SensorError::Bus));
    }
}
