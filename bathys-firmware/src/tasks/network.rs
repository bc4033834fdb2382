//! Wi-Fi access point and network stack
//!
//! The float opens its own access point; the status page is reachable at
//! `http://192.168.4.1/` from a client with a static address in
//! 192.168.4.0/24.

use cyw43::{aligned_bytes, NetDriver};
use cyw43_pio::PioSpi;
use defmt::*;
use embassy_executor::Spawner;
use embassy_net::{Config as NetConfig, Ipv4Address, Ipv4Cidr, Stack, StackResources, StaticConfigV4};
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::{DMA_CH0, PIO0};
use static_cell::StaticCell;

/// Access point name
pub const AP_SSID: &str = "BATHYS_FLOAT";

/// 2.4 GHz channel the access point uses
pub const AP_CHANNEL: u8 = 5;

/// Float's own address on the access point network
pub const AP_ADDRESS: Ipv4Address = Ipv4Address::new(192, 168, 4, 1);

/// Sockets the stack can hold (status server plus headroom)
const SOCKET_COUNT: usize = 3;

pub type WifiSpi = PioSpi<'static, PIO0, 0, DMA_CH0>;

/// CYW43439 driver event loop
#[embassy_executor::task]
pub async fn cyw43_task(runner: cyw43::Runner<'static, cyw43::SpiBus<Output<'static>, WifiSpi>>) -> ! {
    runner.run().await
}

/// embassy-net stack event loop
#[embassy_executor::task]
pub async fn net_task(mut runner: embassy_net::Runner<'static, NetDriver<'static>>) -> ! {
    runner.run().await
}

/// Bring up the radio, open the access point and return the network stack
pub async fn start_access_point(
    spawner: Spawner,
    pwr: Output<'static>,
    spi: WifiSpi,
    seed: u64,
) -> Stack<'static> {
    let fw = aligned_bytes!("../../cyw43-firmware/43439A0.bin");
    let clm = include_bytes!("../../cyw43-firmware/43439A0_clm.bin");
    let nvram = aligned_bytes!("../../cyw43-firmware/nvram_rp2040.bin");

    static STATE: StaticCell<cyw43::State> = StaticCell::new();
    let state = STATE.init(cyw43::State::new());
    let (net_device, mut control, runner) = cyw43::new(state, pwr, spi, fw, nvram).await;
    spawner.spawn(unwrap!(cyw43_task(runner)));

    control.init(clm).await;
    control
        .set_power_management(cyw43::PowerManagementMode::PowerSave)
        .await;

    let config = NetConfig::ipv4_static(StaticConfigV4 {
        address: Ipv4Cidr::new(AP_ADDRESS, 24),
        gateway: None,
        dns_servers: heapless::Vec::new(),
    });

    static RESOURCES: StaticCell<StackResources<SOCKET_COUNT>> = StaticCell::new();
    let (stack, runner) = embassy_net::new(
        net_device,
        config,
        RESOURCES.init(StackResources::new()),
        seed,
    );
    spawner.spawn(unwrap!(net_task(runner)));

    control.start_ap_open(AP_SSID, AP_CHANNEL).await;
    info!("Access point {} up on channel {}", AP_SSID, AP_CHANNEL);

    stack
}
