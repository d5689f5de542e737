use std::net::{Ipv4Addr, SocketAddrV4};

use super::error::TrackerError;
use crate::bencode::decode;

/// A successful tracker announce.
#[derive(Debug, Clone)]
pub struct AnnounceResponse {
    /// Seconds the tracker asks us to wait before re-announcing. Advisory;
    /// this client announces once per run.
    pub interval: u32,
    /// Peer addresses in the order the tracker listed them.
    pub peers: Vec<SocketAddrV4>,
}

/// Parses a bencoded announce response body.
///
/// A dictionary with a `failure reason` string maps to
/// [`TrackerError::Failure`]; otherwise `interval` and a compact `peers`
/// string are required.
pub fn parse_announce_response(body: &[u8]) -> Result<AnnounceResponse, TrackerError> {
    let value = decode(body)?;
    let dict = value
        .as_dict()
        .ok_or(TrackerError::InvalidResponse("expected dictionary"))?;

    if let Some(reason) = dict
        .get(b"failure reason".as_slice())
        .and_then(|v| v.as_str())
    {
        return Err(TrackerError::Failure(reason.to_string()));
    }

    let interval = dict
        .get(b"interval".as_slice())
        .and_then(|v| v.as_integer())
        .filter(|i| *i >= 0)
        .ok_or(TrackerError::InvalidResponse("missing interval"))? as u32;

    let peers = dict
        .get(b"peers".as_slice())
        .and_then(|v| v.as_bytes())
        .ok_or(TrackerError::InvalidResponse("missing compact peers"))?;

    Ok(AnnounceResponse {
        interval,
        peers: parse_compact_peers(peers)?,
    })
}

/// Parses the compact peer format: 6 bytes per peer, a 4-byte IPv4 address
/// followed by a big-endian port.
pub fn parse_compact_peers(data: &[u8]) -> Result<Vec<SocketAddrV4>, TrackerError> {
    if data.len() % 6 != 0 {
        return Err(TrackerError::InvalidResponse("peers length not a multiple of 6"));
    }

    Ok(data
        .chunks_exact(6)
        .map(|chunk| {
            let ip = Ipv4Addr::new(chunk[0], chunk[1], chunk[2], chunk[3]);
            let port = u16::from_be_bytes([chunk[4], chunk[5]]);
            SocketAddrV4::new(ip, port)
        })
        .collect())
}
