//! Pseudo-HTTP frame construction shared by both roles.
//!
//! A frame is status line + two fixed headers + blank line + raw body.
//! The status line and headers are literal strings, not derived from any
//! protocol state; only the body varies. The body is appended as-is with
//! no length prefix and no escaping, so it may be arbitrary bytes.

use bytes::{BufMut, BytesMut};

/// Literal status line emitted by both roles.
pub const STATUS_LINE: &str = "HTTP/1.1 200 OK";

/// Name the client advertises in its `User-Agent` header.
pub const CLIENT_NAME: &str = "CrappyClient/0.0.1";

/// Name the server advertises in its `Server` header.
pub const SERVER_NAME: &str = "CrappyServer/0.0.1";

/// Content type claimed by both roles regardless of the body bytes.
pub const CONTENT_TYPE: &str = "text/plain";

/// Bounded receive size for both roles. Each side reads exactly one chunk
/// of at most this many bytes and never loops to drain the connection, so
/// anything longer is truncated at this boundary.
pub const RECV_BUFFER_SIZE: usize = 1024;

const CRLF: &[u8] = b"\r\n";

/// Build a request frame with the fixed client headers.
pub fn request_frame(body: &[u8]) -> BytesMut {
    build_frame(&[("User-Agent", CLIENT_NAME), ("Content-Type", CONTENT_TYPE)], body)
}

/// Build a response frame with the fixed server headers.
pub fn response_frame(body: &[u8]) -> BytesMut {
    build_frame(&[("Server", SERVER_NAME), ("Content-Type", CONTENT_TYPE)], body)
}

fn build_frame(headers: &[(&str, &str)], body: &[u8]) -> BytesMut {
    let mut frame = BytesMut::with_capacity(128 + body.len());

    frame.put_slice(STATUS_LINE.as_bytes());
    frame.put_slice(CRLF);
    for (name, value) in headers {
        frame.put_slice(name.as_bytes());
        frame.put_slice(b": ");
        frame.put_slice(value.as_bytes());
        frame.put_slice(CRLF);
    }
    frame.put_slice(CRLF);
    frame.put_slice(body);

    frame
}
