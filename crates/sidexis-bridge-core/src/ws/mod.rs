//! Server-side WebSocket subset.
//!
//! Implements just enough of RFC 6455 for one short-lived browser session:
//! the upgrade handshake, masked text-frame decoding, and a restricted
//! unmasked text frame for the status reply. No fragmentation, ping/pong,
//! binary frames, or compression.

mod frame;
mod handshake;

pub use frame::*;
pub use handshake::*;

use thiserror::Error;

/// WebSocket protocol errors.
#[derive(Error, Debug)]
pub enum WsError {
    #[error("upgrade request has no Sec-WebSocket-Key header")]
    MissingKey,

    #[error("frame truncated: need {needed} bytes, have {have}")]
    Truncated { needed: usize, have: usize },

    #[error("frame payload length {0} exceeds addressable size")]
    PayloadTooLarge(u64),

    #[error("frame payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("status message is {0} bytes, single-byte frame length allows at most 125")]
    StatusTooLong(usize),
}

pub type WsResult<T> = Result<T, WsError>;
