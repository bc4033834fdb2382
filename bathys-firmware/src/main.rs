//! Bathys - Profiling Float Firmware
//!
//! Main firmware binary for the Raspberry Pi Pico W float controller.
//! Runs a fixed number of dive cycles, records pressure profiles and
//! serves them over its own Wi-Fi access point.
//!
//! Named after the Greek "bathys" meaning "deep".

#![no_std]
#![no_main]

use bathys_core::config::{parse_mission_config, MissionConfig, PressureMode};
use bathys_core::mission::ActuatorArbiter;
use bathys_core::status::Template;
use bathys_drivers::actuator::{SolenoidPair, StatusLight};
use bathys_drivers::sensor::{Ads1115, PressureTransducer, SyntheticPressure};
use cyw43_pio::{PioSpi, DEFAULT_CLOCK_DIVIDER};
use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::clocks::RoscRng;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{self, I2c, InterruptHandler as I2cInterruptHandler};
use embassy_rp::peripherals::{I2C0, PIO0};
use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
use embassy_time::{Delay, Timer};
use rand_core::RngCore;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::platform::{EmbassyClock, FloatPressure, SharedSolenoids};

mod channels;
mod platform;
mod tasks;

/// Embedded mission configuration (compiled into firmware)
/// Edit mission.toml and rebuild to customize
const MISSION_CONFIG: &str = include_str!("../mission.toml");

/// Status page fragments
const HEAD_HTML: &str = include_str!("../templates/head.html");
const PROFILE_START_HTML: &str = include_str!("../templates/profile_start.html");
const ROW_HTML: &str = include_str!("../templates/row.html");
const PROFILE_END_HTML: &str = include_str!("../templates/profile_end.html");
const FOOT_HTML: &str = include_str!("../templates/foot.html");

/// ADS1115 input the transducer is wired to
const TRANSDUCER_CHANNEL: u8 = 0;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
});

static SOLENOIDS: StaticCell<SharedSolenoids> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Bathys firmware starting...");

    let p = embassy_rp::init(Default::default());
    let clock = EmbassyClock::new();
    info!("Peripherals initialized");

    let config = match parse_mission_config(MISSION_CONFIG) {
        Ok(config) => config,
        Err(e) => halt("Invalid mission configuration", e).await,
    };
    let template = match Template::new(
        HEAD_HTML,
        PROFILE_START_HTML,
        ROW_HTML,
        PROFILE_END_HTML,
        FOOT_HTML,
    ) {
        Ok(template) => template,
        Err(e) => halt("Invalid status page template", e).await,
    };
    log_config(&config);

    // Outputs: GPIO16 sink solenoid, GPIO17 surface solenoid, GPIO15 light
    let solenoids = SOLENOIDS.init(ActuatorArbiter::new(SolenoidPair::new(
        Output::new(p.PIN_16, Level::Low),
        Output::new(p.PIN_17, Level::Low),
        Delay,
    )));
    let light = StatusLight::new(Output::new(p.PIN_15, Level::Low), Delay);

    let source = match config.pressure_mode {
        PressureMode::Sensor => {
            // ADS1115 on I2C0: GPIO4 SDA, GPIO5 SCL
            let bus = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c::Config::default());
            let adc = Ads1115::new(bus, Delay);
            FloatPressure::Sensor(PressureTransducer::new(
                adc,
                TRANSDUCER_CHANNEL,
                config.calibration,
            ))
        }
        PressureMode::Synthetic => {
            warn!("Debug mode: using synthetic pressure readings");
            FloatPressure::Synthetic(SyntheticPressure::new(RoscRng))
        }
    };

    spawner.spawn(unwrap!(tasks::actuator_task(solenoids)));
    spawner.spawn(unwrap!(tasks::bobbing_task(solenoids, clock)));
    spawner.spawn(unwrap!(tasks::indicator_task(light)));

    // The mission does not wait for the radio; the server picks up the
    // latest snapshot once the access point is up
    spawner.spawn(unwrap!(tasks::mission_task(
        config, source, solenoids, template, clock
    )));

    // Wi-Fi on the Pico W's CYW43439: PWR GPIO23, CS GPIO25, DIO GPIO24, CLK GPIO29
    let pwr = Output::new(p.PIN_23, Level::Low);
    let cs = Output::new(p.PIN_25, Level::High);
    let mut pio = Pio::new(p.PIO0, Irqs);
    let spi = PioSpi::new(
        &mut pio.common,
        pio.sm0,
        DEFAULT_CLOCK_DIVIDER,
        pio.irq0,
        cs,
        p.PIN_24,
        p.PIN_29,
        p.DMA_CH0,
    );
    let seed = RoscRng.next_u64();
    let stack = tasks::start_access_point(spawner, pwr, spi, seed).await;
    spawner.spawn(unwrap!(tasks::status_server_task(stack)));

    info!("All tasks spawned");
}

fn log_config(config: &MissionConfig) {
    info!(
        "Config: sink {}s, surface {}s, surface wait {}s, bobbing {}s",
        config.sink_s,
        config.surface_s,
        config.wait_surface_s,
        config.bobbing_duration_s
    );
    info!(
        "Calibration: surface {}hPa, {}hPa/m, trim {}hPa",
        config.calibration.surface_pressure_hpa,
        config.calibration.hpa_per_meter,
        config.calibration.pressure_trim_hpa
    );
}

/// Startup failure: log and stop before any actuation
async fn halt<E: Format>(what: &str, e: E) -> ! {
    error!("{}: {}", what, e);
    loop {
        Timer::after_secs(60).await;
    }
}
