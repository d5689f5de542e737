//! Peer wire protocol (BEP-3)
//!
//! The 68-byte handshake, the length-prefixed message codec, the framed
//! transport with its deadlines, and the per-connection session state
//! machine:
//!
//! ```text
//! connected → handshaked → bitfielded → (interested) → unchoked ↺ request/piece
//!                                                         ↓
//!                                                       closed
//! ```
//!
//! A session is owned by exactly one task at a time; the piece downloader
//! in [`piece`] relies on that exclusivity to pipeline a whole batch of
//! block requests before reading any responses.

mod bitfield;
mod connection;
mod error;
mod message;
mod peer_id;
pub mod piece;
mod transport;

pub use bitfield::Bitfield;
pub use connection::{PeerSession, SessionState};
pub use error::PeerError;
pub use message::{Handshake, Message, MessageId, HANDSHAKE_LEN};
pub use peer_id::PeerId;
pub use piece::{block_count, block_length, download_piece, BLOCK_SIZE};
pub use transport::PeerTransport;
