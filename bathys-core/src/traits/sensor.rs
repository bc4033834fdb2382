//! Pressure source trait

/// Errors that can occur while sampling pressure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Bus transaction with the converter failed
    Bus,
    /// Conversion did not complete in time
    ConversionTimeout,
}

/// A source of calibrated pressure readings
///
/// Either the real transducer or the synthetic debug generator; the choice
/// is made once when the source is constructed.
#[allow(async_fn_in_trait)]
pub trait PressureSource {
    /// Take one pressure reading in hPa, rounded to 2 decimals
    ///
    /// Errors are returned to the caller as-is; there is no retry.
    async fn sample(&mut self) -> Result<f32, SensorError>;
}

impl<T: PressureSource + ?Sized> PressureSource for &mut T {
    async fn sample(&mut self) -> Result<f32, SensorError> {
        T::sample(self).await
    }
}
