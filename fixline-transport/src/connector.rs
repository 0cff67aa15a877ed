/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 9/2/26
******************************************************************************/

//! Outbound TCP connection setup.
//!
//! One connection per session. Keep-alive is enabled on the socket and
//! Nagle's algorithm is disabled on the stream; liveness beyond that is the
//! session layer's heartbeat exchange.

use std::io;
use std::net::SocketAddr;
use tokio::net::{TcpSocket, TcpStream, lookup_host};
use tracing::debug;

/// Opens a TCP connection to the given host and port.
///
/// Tries each resolved address in order and returns the first stream that
/// connects, with keep-alive and no-delay enabled.
///
/// # Errors
/// Returns the last connection error, or a `NotFound` error if the host
/// resolves to no addresses.
pub async fn connect(host: &str, port: u16) -> io::Result<TcpStream> {
    let mut last_err: Option<io::Error> = None;

    for addr in lookup_host((host, port)).await? {
        match connect_addr(addr).await {
            Ok(stream) => {
                debug!(%addr, "transport connected");
                return Ok(stream);
            }
            Err(err) => {
                debug!(%addr, %err, "connect attempt failed");
                last_err = Some(err);
            }
        }
    }

    Err(last_err.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, format!("no addresses for {host}:{port}"))
    }))
}

async fn connect_addr(addr: SocketAddr) -> io::Result<TcpStream> {
    let socket = match addr {
        SocketAddr::V4(_) => TcpSocket::new_v4()?,
        SocketAddr::V6(_) => TcpSocket::new_v6()?,
    };
    socket.set_keepalive(true)?;

    let stream = socket.connect(addr).await?;
    stream.set_nodelay(true)?;
    Ok(stream)
}
