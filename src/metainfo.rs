//! Torrent metainfo (BEP-3)
//!
//! Parses single-file `.torrent` dictionaries into a typed view and
//! computes the info-hash over the canonical re-encoding of the `info`
//! dictionary.

mod error;
mod info_hash;
mod torrent;

pub use error::MetainfoError;
pub use info_hash::InfoHash;
pub use torrent::{Info, Metainfo};

pub use info_hash::hex_str;
