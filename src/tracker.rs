//! HTTP tracker client (BEP-3, BEP-23)
//!
//! Announces to the torrent's tracker over HTTP GET and parses the
//! bencoded response into an interval and a compact IPv4 peer list.

mod error;
mod http;
mod response;

pub use error::TrackerError;
pub use http::HttpTracker;
pub use response::{parse_announce_response, parse_compact_peers, AnnounceResponse};

#[cfg(test)]
mod tests;
