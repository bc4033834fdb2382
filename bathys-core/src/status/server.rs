//! Minimal HTTP/1.0 status responder
//!
//! Transport-agnostic: works over any `embedded-io-async` connection. The
//! request is read up to the blank line that ends the header and otherwise
//! ignored; every request gets the current snapshot.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_io_async::{Read, Write};

use super::board::{Snapshot, StatusBoard};

/// Status line and headers sent before the page
pub const RESPONSE_HEADER: &[u8] = b"HTTP/1.0 200 OK\r\nContent-type: text/html\r\n\r\n";

/// Request header bytes read before answering anyway
pub const MAX_REQUEST_BYTES: usize = 2048;

/// Per-connection errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServeError {
    /// Reading the request failed
    Read,
    /// Writing the response failed
    Write,
}

/// Answer one request on `conn` with the current snapshot
///
/// `scratch` receives a copy of the snapshot so the board lock is not held
/// across socket writes. Returns the generation that was served.
pub async fn serve_request<C, M>(
    conn: &mut C,
    board: &StatusBoard<M>,
    scratch: &mut Snapshot,
) -> Result<u32, ServeError>
where
    C: Read + Write,
    M: RawMutex,
{
    read_request_head(conn).await?;

    let generation = board.copy_into(scratch);
    conn.write_all(RESPONSE_HEADER)
        .await
        .map_err(|_| ServeError::Write)?;
    conn.write_all(scratch.as_bytes())
        .await
        .map_err(|_| ServeError::Write)?;
    conn.flush().await.map_err(|_| ServeError::Write)?;

    debug!("served status page generation {}", generation);
    Ok(generation)
}

/// Consume the request until an empty line, EOF or the size cap
async fn read_request_head<C: Read>(conn: &mut C) -> Result<(), ServeError> {
    let mut buf = [0u8; 128];
    let mut total = 0usize;
    let mut line_len = 0usize;

    loop {
        let n = conn.read(&mut buf).await.map_err(|_| ServeError::Read)?;
        if n == 0 {
            return Ok(());
        }
        for &byte in &buf[..n] {
            match byte {
                b'\n' if line_len == 0 => return Ok(()),
                b'\n' => line_len = 0,
                b'\r' => {}
                _ => line_len += 1,
            }
        }
        total += n;
        if total >= MAX_REQUEST_BYTES {
            warn!("request header over {} bytes, answering anyway", MAX_REQUEST_BYTES);
            return Ok(());
        }
    }
}
