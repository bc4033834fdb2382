//! Synthetic pressure generator for bench testing
//!
//! Uniform random pressure in [100.00, 130.00] hPa with two decimals.
//! Used instead of the transducer when the mission runs in debug mode.

use bathys_core::traits::{PressureSource, SensorError};
use rand_core::RngCore;

/// Lowest generated value in hundredths of hPa
const MIN_CENTI_HPA: u32 = 10_000;
/// Number of distinct generated values (100.00 ..= 130.00)
const SPAN_CENTI_HPA: u32 = 3_001;

/// Random pressure source
pub struct SyntheticPressure<R> {
    rng: R,
}

impl<R: RngCore> SyntheticPressure<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore> PressureSource for SyntheticPressure<R> {
    async fn sample(&mut self) -> Result<f32, SensorError> {
        let centi = MIN_CENTI_HPA + self.rng.next_u32() % SPAN_CENTI_HPA;
        Ok(centi as f32 / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_values_in_range_with_two_decimals() {
        let mut source = SyntheticPressure::new(StdRng::seed_from_u64(0x5eed));
        let mut min = f32::MAX;
        let mut max = f32::MIN;

        for _ in 0..10_000 {
            let p = block_on(source.sample()).unwrap();
            assert!((100.0..=130.0).contains(&p), "out of range: {}", p);
            let centi = p * 100.0;
            assert!((centi - centi.round()).abs() < 1e-2, "not 2 decimals: {}", p);
            min = min.min(p);
            max = max.max(p);
        }

        // 10k uniform draws cover nearly the whole range
        assert!(min < 101.0);
        assert!(max > 129.0);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SyntheticPressure::new(StdRng::seed_from_u64(7));
        let mut b = SyntheticPressure::new(StdRng::seed_from_u64(7));
        for _ in 0..16 {
            assert_eq!(block_on(a.sample()), block_on(b.sample()));
        }
    }
}
