use std::fmt;

use tokio_tungstenite::tungstenite;

/// Everything that can go wrong while the bot is connected.
///
/// Transport faults and a closed stream are fatal to the whole session;
/// protocol errors are fatal only during the handshake; REST failures are
/// surfaced to whichever command handler triggered the call.
#[derive(Debug)]
pub enum Error {
    /// WebSocket transport fault (connect, read or write).
    Connection(tungstenite::Error),
    /// The gateway closed the connection.
    StreamClosed,
    /// Malformed or unexpected frame shape.
    Protocol(String),
    /// Transport-level failure of an outbound REST call.
    Http(reqwest::Error),
    /// Non-2xx status from an outbound REST call.
    Api { status: u16, body: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Connection(e) => write!(f, "gateway connection error: {e}"),
            Error::StreamClosed => write!(f, "gateway closed the connection"),
            Error::Protocol(msg) => write!(f, "protocol error: {msg}"),
            Error::Http(e) => write!(f, "HTTP error: {e}"),
            Error::Api { status, body } => write!(f, "API returned {status}: {body}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Connection(e) => Some(e),
            Error::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<tungstenite::Error> for Error {
    fn from(e: tungstenite::Error) -> Self {
        Error::Connection(e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Http(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Protocol(e.to_string())
    }
}
