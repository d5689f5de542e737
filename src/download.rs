//! The fetch scheduler.
//!
//! Fans the piece index space out across a pool of unchoked peer sessions,
//! verifies every assembled piece against its SHA-1 hash, and commits the
//! staged output file only when the whole torrent has been accepted.

mod error;
mod scheduler;

pub use error::DownloadError;
pub use scheduler::{download, download_from_peers, download_piece_to};
