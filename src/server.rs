//! Server role: serially accept connections and answer each with one
//! configured response frame.
//!
//! The accept loop is single-threaded and blocking. Each accepted
//! connection gets exactly one bounded read and one full-frame write,
//! then is closed; the listen backlog only queues at the OS level. A
//! connection that sends zero bytes ends the loop.

use crate::config::ServerConfig;
use crate::error::ExchangeError;
use crate::frame::{self, RECV_BUFFER_SIZE};
use bytes::BytesMut;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, ToSocketAddrs};
use tracing::{debug, info};

/// Listen backlog. Pending connections queue in the kernel; the process
/// still handles them strictly one at a time.
const LISTEN_BACKLOG: i32 = 5;

/// Server instance bound to a local address with its response frame
/// prepared up front.
pub struct Responder {
    listener: TcpListener,
    response: BytesMut,
}

impl Responder {
    /// Bind to the configured (host, port) with address reuse enabled.
    pub fn bind(config: &ServerConfig) -> Result<Self, ExchangeError> {
        let listener = create_listener(&config.host, config.port)?;
        let address = listener.local_addr()?;
        info!(address = %address, "Server listening");

        Ok(Responder {
            listener,
            response: frame::response_frame(&config.response),
        })
    }

    /// Address actually bound, useful when the configured port was 0.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept and answer connections until one sends zero bytes.
    ///
    /// Every connection gets the same prepared response frame regardless
    /// of its payload; nothing is validated or routed. Requests longer
    /// than [`RECV_BUFFER_SIZE`] are truncated at the receive boundary.
    /// An empty receive ends the loop, returning the response text and
    /// the last (empty) request text observed.
    pub fn run(self) -> Result<(String, String), ExchangeError> {
        let response_text = String::from_utf8(self.response.to_vec())?;

        loop {
            let (mut conn, peer) = self.listener.accept()?;

            match handle_connection(&mut conn, &self.response)? {
                Some(request_text) => {
                    debug!(
                        peer = %peer,
                        request = %request_text,
                        response = %response_text,
                        "Handled connection"
                    );
                }
                None => {
                    info!(peer = %peer, "Empty receive, shutting down");
                    return Ok((response_text, String::new()));
                }
            }
        }
    }
}

/// One bounded read, one full-frame write.
///
/// Returns `None` when the peer closed without sending any bytes, which
/// the accept loop treats as its shutdown signal. The request chunk is
/// decoded as UTF-8 for the transcript; invalid bytes fail the decode.
fn handle_connection<S: Read + Write>(
    conn: &mut S,
    response: &[u8],
) -> Result<Option<String>, ExchangeError> {
    let mut buf = [0u8; RECV_BUFFER_SIZE];
    let n = conn.read(&mut buf)?;

    if n == 0 {
        return Ok(None);
    }

    let request_text = String::from_utf8(buf[..n].to_vec())?;
    conn.write_all(response)?;

    Ok(Some(request_text))
}

/// Create a blocking TCP listener with SO_REUSEADDR.
fn create_listener(host: &str, port: u16) -> Result<TcpListener, ExchangeError> {
    let addr = (host, port)
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("no address resolved for {}:{}", host, port),
            )
        })?;

    let socket = socket2::Socket::new(
        match addr {
            SocketAddr::V4(_) => socket2::Domain::IPV4,
            SocketAddr::V6(_) => socket2::Domain::IPV6,
        },
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(LISTEN_BACKLOG)?;

    Ok(socket.into())
}
