//! crappy-http: an intentionally crude pseudo-HTTP client/server pair.
//!
//! Two roles exchange byte payloads over blocking TCP, wrapped in hand-built
//! framing that merely resembles HTTP (fixed status line, two fixed headers,
//! blank line, raw body):
//! - The client opens one connection, sends one frame, and reads a single
//!   bounded chunk of reply bytes.
//! - The server accepts connections strictly one at a time, reads a single
//!   bounded chunk, replies with a configured frame, and closes.
//!
//! There are no real HTTP semantics: no parsing, no keep-alive, no chunking,
//! and no concurrency. Replies larger than the receive buffer are silently
//! truncated; requests large enough to overflow OS buffering surface as a
//! connection reset at the sender. Both behaviors are documented and kept.

pub mod client;
pub mod config;
pub mod error;
pub mod frame;
pub mod server;
