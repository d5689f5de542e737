use thiserror::Error;

use super::message::MessageId;

/// Errors that close a peer session.
#[derive(Debug, Error)]
pub enum PeerError {
    /// Network I/O failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The handshake record is not 68 valid bytes.
    #[error("invalid handshake")]
    InvalidHandshake,

    /// The peer answered the handshake for a different torrent.
    #[error("info hash mismatch")]
    InfoHashMismatch,

    /// A frame whose payload does not match its type.
    #[error("invalid message: {0}")]
    InvalidMessage(&'static str),

    /// A type tag outside the defined wire table.
    #[error("invalid message id: {0}")]
    InvalidMessageId(u8),

    /// A typed frame arrived where a different type was required.
    #[error("expected {expected:?}, got {got:?}")]
    UnexpectedMessage {
        expected: MessageId,
        got: MessageId,
    },

    /// Length prefix beyond the largest legal frame.
    #[error("frame of {0} bytes exceeds the maximum")]
    FrameTooLarge(usize),

    /// A `piece` frame for a piece we did not request.
    #[error("block for piece {got}, expected piece {expected}")]
    BlockMismatch { expected: u32, got: u32 },

    /// The blocks of a piece did not add up to its length.
    #[error("piece truncated: expected {expected} bytes, got {got}")]
    TruncatedPiece { expected: u32, got: u32 },

    /// The remote closed the connection.
    #[error("connection closed")]
    ConnectionClosed,

    /// A read or write deadline expired.
    #[error("timeout")]
    Timeout,

    /// Any other protocol violation.
    #[error("protocol error: {0}")]
    Protocol(String),
}
