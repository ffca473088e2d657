//! Error type shared by the client and server roles.

/// Errors surfaced by a request/response exchange.
///
/// Connection failures (refused, reset, unreachable) propagate as `Io`;
/// there is no retry or backoff. Payload bytes that are not valid UTF-8
/// fail as `Utf8` at the point text is required, keeping the framing
/// itself binary-safe up to that boundary.
#[derive(Debug)]
pub enum ExchangeError {
    Io(std::io::Error),
    Utf8(std::string::FromUtf8Error),
}

impl std::fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExchangeError::Io(e) => write!(f, "I/O error: {}", e),
            ExchangeError::Utf8(e) => write!(f, "Invalid UTF-8 payload: {}", e),
        }
    }
}

impl std::error::Error for ExchangeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExchangeError::Io(e) => Some(e),
            ExchangeError::Utf8(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ExchangeError {
    fn from(e: std::io::Error) -> Self {
        ExchangeError::Io(e)
    }
}

impl From<std::string::FromUtf8Error> for ExchangeError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        ExchangeError::Utf8(e)
    }
}
