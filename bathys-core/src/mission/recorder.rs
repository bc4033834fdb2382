//! Profile recorder
//!
//! Samples pressure at a fixed cadence for a fixed count during one phase.
//! The sampling loop is what bounds a phase's duration: the caller is
//! suspended for `samples * interval` while the actuator task drives the
//! solenoids in the background.

use super::MissionError;
use crate::config::{Calibration, MissionConfig};
use crate::profile::{PressureReading, ProfilePhase, ProfileRecord};
use crate::traits::{MissionClock, PressureSource, SensorError};

/// Fixed-cadence sampler for one phase
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProfileRecorder {
    samples: u8,
    interval_ms: u32,
    calibration: Calibration,
}

impl ProfileRecorder {
    pub fn new(config: &MissionConfig) -> Self {
        Self {
            samples: config.samples_per_phase,
            interval_ms: config.sample_interval_ms(),
            calibration: config.calibration,
        }
    }

    pub fn samples(&self) -> u8 {
        self.samples
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Time of sample `index` for a phase started at `start`
    fn deadline(&self, start: u32, index: u32) -> u32 {
        start.saturating_add(index.saturating_mul(self.interval_ms))
    }

    /// Take a single timestamped reading
    pub async fn read_once<P, C>(
        &self,
        source: &mut P,
        clock: &C,
    ) -> Result<PressureReading, SensorError>
    where
        P: PressureSource,
        C: MissionClock,
    {
        let elapsed_ms = clock.now_ms();
        let pressure = source.sample().await?;
        Ok(PressureReading::new(elapsed_ms, pressure, &self.calibration))
    }

    /// Record one phase
    ///
    /// The first sample is taken immediately and sample `i` at
    /// `start + i * interval`, never sooner than 1 ms after the previous
    /// reading. Returns once `samples * interval` has elapsed since the
    /// start. A sensor error aborts the record.
    pub async fn record<P, C>(
        &self,
        source: &mut P,
        clock: &mut C,
        phase: ProfilePhase,
    ) -> Result<ProfileRecord, MissionError>
    where
        P: PressureSource,
        C: MissionClock,
    {
        info!("Going {}", phase.label());

        let mut record = ProfileRecord::new(phase);
        let start = clock.now_ms();

        for i in 0..self.samples as u32 {
            let mut deadline = self.deadline(start, i);
            if let Some(prev) = record.last() {
                deadline = deadline.max(prev.elapsed_ms.saturating_add(1));
            }
            if i > 0 {
                clock.wait_until(deadline).await;
            }

            let reading = self.read_once(source, clock).await?;
            debug!(
                "Data packet: t={}ms p={}hPa d={}m",
                reading.elapsed_ms,
                reading.pressure_hpa,
                reading.depth_m
            );
            record.push(reading).map_err(|_| MissionError::Capacity)?;
        }

        clock
            .wait_until(self.deadline(start, self.samples as u32))
            .await;
        Ok(record)
    }
}
