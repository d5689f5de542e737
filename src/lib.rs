//! minnow - a minimal BitTorrent client library
//!
//! Downloads single-file torrents: parse the metainfo, announce to the
//! HTTP tracker, open peer sessions, and fetch hash-verified pieces
//! concurrently across them.
//!
//! # Modules
//!
//! - [`bencode`] - BEP-3 bencode encoding/decoding
//! - [`metainfo`] - torrent metainfo and the info-hash
//! - [`tracker`] - HTTP tracker announces and compact peer lists
//! - [`peer`] - handshake, peer wire messages, sessions, piece fetching
//! - [`storage`] - staged output file with positional piece writers
//! - [`download`] - the fetch scheduler tying the layers together
//! - [`cli`] - argument surface for the `minnow` binary

pub mod bencode;
pub mod cli;
pub mod download;
pub mod metainfo;
pub mod peer;
pub mod storage;
pub mod tracker;

pub use bencode::{decode, encode, BencodeError, Value};
pub use download::{download, DownloadError};
pub use metainfo::{Info, InfoHash, Metainfo, MetainfoError};
pub use peer::{
    Bitfield, Handshake, Message, MessageId, PeerError, PeerId, PeerSession, PeerTransport,
};
pub use storage::{DownloadFile, PieceWriter, StorageError};
pub use tracker::{AnnounceResponse, HttpTracker, TrackerError};
