//! HTTP status server
//!
//! Accepts one connection at a time on port 80 and answers every request
//! with the current status snapshot. Connection errors are logged and the
//! accept loop continues.

use bathys_core::status::{serve_request, Snapshot};
use defmt::*;
use embassy_net::tcp::TcpSocket;
use embassy_net::Stack;
use embassy_time::Duration;
use portable_atomic::{AtomicU32, Ordering};
use static_cell::StaticCell;

use crate::channels::STATUS_BOARD;

/// Listening port
pub const STATUS_PORT: u16 = 80;

/// Idle connections are dropped after this long
const SOCKET_TIMEOUT: Duration = Duration::from_secs(10);

const RX_BUFFER_SIZE: usize = 1024;
const TX_BUFFER_SIZE: usize = 2048;

/// Requests answered since boot
pub static REQUESTS_SERVED: AtomicU32 = AtomicU32::new(0);

#[embassy_executor::task]
pub async fn status_server_task(stack: Stack<'static>) -> ! {
    static SCRATCH: StaticCell<Snapshot> = StaticCell::new();
    let scratch = SCRATCH.init(Snapshot::new());

    let mut rx_buffer = [0u8; RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TX_BUFFER_SIZE];

    info!("Status server listening on port {}", STATUS_PORT);

    loop {
        let mut socket = TcpSocket::new(stack, &mut rx_buffer, &mut tx_buffer);
        socket.set_timeout(Some(SOCKET_TIMEOUT));

        if let Err(e) = socket.accept(STATUS_PORT).await {
            warn!("Accept failed: {}", e);
            continue;
        }

        match serve_request(&mut socket, &STATUS_BOARD, scratch).await {
            Ok(generation) => {
                let served = REQUESTS_SERVED.fetch_add(1, Ordering::Relaxed) + 1;
                debug!("Request {} served snapshot {}", served, generation);
            }
            Err(e) => warn!("Status request failed: {}", e),
        }

        socket.close();
        if socket.flush().await.is_err() {
            debug!("Connection reset before close");
        }
        socket.abort();
    }
}
