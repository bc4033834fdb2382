//! ADS1115 16-bit I²C ADC
//!
//! Single-shot conversions only: each read writes the config register with
//! the OS bit set, polls until the conversion completes and then reads the
//! conversion register.

use bathys_core::traits::SensorError;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

/// Address with ADDR tied to GND
pub const DEFAULT_ADDRESS: u8 = 0x48;

const REG_CONVERSION: u8 = 0x00;
const REG_CONFIG: u8 = 0x01;

/// Start a single conversion (write) / device idle (read)
const OS_SINGLE: u16 = 0x8000;
/// AINx against GND, channel added at bits 12..14
const MUX_SINGLE_0: u16 = 0x4000;
/// Power-down single-shot mode
const MODE_SINGLE: u16 = 0x0100;
/// Comparator disabled, ALERT/RDY high-impedance
const COMP_DISABLE: u16 = 0x0003;

/// Completion polls before giving up (1 ms apart)
const MAX_POLLS: u16 = 200;

/// Programmable gain amplifier setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gain {
    /// ±6.144 V
    TwoThirds,
    /// ±4.096 V
    One,
    /// ±2.048 V
    Two,
    /// ±1.024 V
    Four,
    /// ±0.512 V
    Eight,
    /// ±0.256 V
    Sixteen,
}

impl Gain {
    const fn bits(self) -> u16 {
        match self {
            Gain::TwoThirds => 0x0000,
            Gain::One => 0x0200,
            Gain::Two => 0x0400,
            Gain::Four => 0x0600,
            Gain::Eight => 0x0800,
            Gain::Sixteen => 0x0A00,
        }
    }

    /// Full-scale input voltage
    pub const fn full_scale_v(self) -> f32 {
        match self {
            Gain::TwoThirds => 6.144,
            Gain::One => 4.096,
            Gain::Two => 2.048,
            Gain::Four => 1.024,
            Gain::Eight => 0.512,
            Gain::Sixteen => 0.256,
        }
    }
}

/// Conversion rate in samples per second
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataRate {
    Sps8,
    Sps16,
    Sps32,
    Sps64,
    Sps128,
    Sps250,
    Sps475,
    Sps860,
}

impl DataRate {
    const fn bits(self) -> u16 {
        (self as u16) << 5
    }
}

/// ADS1115 driver
pub struct Ads1115<I, D> {
    i2c: I,
    delay: D,
    address: u8,
    gain: Gain,
    rate: DataRate,
}

impl<I: I2c, D: DelayNs> Ads1115<I, D> {
    /// Driver at the default address, gain 1, 128 SPS
    pub fn new(i2c: I, delay: D) -> Self {
        Self::with_settings(i2c, delay, DEFAULT_ADDRESS, Gain::One, DataRate::Sps128)
    }

    pub fn with_settings(i2c: I, delay: D, address: u8, gain: Gain, rate: DataRate) -> Self {
        Self {
            i2c,
            delay,
            address,
            gain,
            rate,
        }
    }

    pub fn gain(&self) -> Gain {
        self.gain
    }

    /// Config register value for a single-ended conversion on `channel`
    pub fn config_word(&self, channel: u8) -> u16 {
        OS_SINGLE
            | (MUX_SINGLE_0 + ((channel as u16 & 0x03) << 12))
            | self.gain.bits()
            | self.rate.bits()
            | MODE_SINGLE
            | COMP_DISABLE
    }

    /// Run one single-ended conversion and return the raw code
    pub async fn read(&mut self, channel: u8) -> Result<i16, SensorError> {
        let config = self.config_word(channel);
        self.write_register(REG_CONFIG, config).await?;

        let mut polls = 0;
        while self.read_register(REG_CONFIG).await? & OS_SINGLE == 0 {
            polls += 1;
            if polls >= MAX_POLLS {
                return Err(SensorError::ConversionTimeout);
            }
            self.delay.delay_ms(1).await;
        }

        let raw = self.read_register(REG_CONVERSION).await?;
        Ok(raw as i16)
    }

    /// Convert a raw code to volts at the configured gain
    pub fn raw_to_v(&self, raw: i16) -> f32 {
        raw as f32 * self.gain.full_scale_v() / 32768.0
    }

    async fn write_register(&mut self, register: u8, value: u16) -> Result<(), SensorError> {
        let [hi, lo] = value.to_be_bytes();
        self.i2c
            .write(self.address, &[register, hi, lo])
            .await
            .map_err(|_| SensorError::Bus)
    }

    async fn read_register(&mut self, register: u8) -> Result<u16, SensorError> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(self.address, &[register], &mut buf)
            .await
            .map_err(|_| SensorError::Bus)?;
        Ok(u16::from_be_bytes(buf))
    }
}
