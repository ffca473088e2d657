//! Client role: one connection, one request frame, one bounded reply read.

use crate::error::ExchangeError;
use crate::frame::{self, RECV_BUFFER_SIZE};
use std::io::{Read, Write};
use std::net::TcpStream;
use tracing::{debug, info};

/// Send one payload to (host, port) and read one bounded reply chunk.
///
/// The payload is wrapped in a request frame and sent in full on a fresh
/// blocking connection. The reply is read exactly once into a buffer of
/// [`RECV_BUFFER_SIZE`] bytes; a longer reply is silently truncated. The
/// connection is closed after the read.
///
/// Returns the request and response as decoded UTF-8 text. A connect or
/// send failure propagates as is (a payload large enough to overflow OS
/// buffering shows up here as a connection reset, since the server only
/// ever reads one chunk). Non-UTF-8 bytes on either side fail the decode.
pub fn send_request(
    payload: &[u8],
    host: &str,
    port: u16,
) -> Result<(String, String), ExchangeError> {
    let request = frame::request_frame(payload);

    let mut stream = TcpStream::connect((host, port))?;
    debug!(host, port, "Connected");

    let reply = exchange(&mut stream, &request)?;
    drop(stream);

    let request_text = String::from_utf8(request.to_vec())?;
    let response_text = String::from_utf8(reply)?;

    info!(
        request = %request_text,
        response = %response_text,
        "Exchange complete"
    );

    Ok((request_text, response_text))
}

/// Write the full request, then perform the single bounded read.
fn exchange<S: Read + Write>(stream: &mut S, request: &[u8]) -> Result<Vec<u8>, ExchangeError> {
    stream.write_all(request)?;

    let mut buf = [0u8; RECV_BUFFER_SIZE];
    let n = stream.read(&mut buf)?;

    Ok(buf[..n].to_vec())
}
