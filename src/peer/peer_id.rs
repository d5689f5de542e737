use std::fmt;

use rand::Rng as _;

use crate::metainfo::hex_str;

const PEER_ID_PREFIX: &[u8] = b"-MN0001-";

/// A 20-byte peer identity (Azureus-style: dash-framed client tag plus
/// random ASCII digits).
///
/// Generated once per run and used for both the tracker announce and every
/// handshake, so the client presents one identity to the swarm.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PeerId(pub [u8; 20]);

impl PeerId {
    pub fn generate() -> Self {
        let mut id = [0u8; 20];
        id[..PEER_ID_PREFIX.len()].copy_from_slice(PEER_ID_PREFIX);
        let mut rng = rand::rng();
        for b in id[PEER_ID_PREFIX.len()..].iter_mut() {
            *b = rng.random_range(b'0'..=b'9');
        }
        Self(id)
    }

    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// 40-character hexadecimal form, as printed by the `handshake` verb.
    pub fn to_hex(&self) -> String {
        hex_str(&self.0)
    }
}

impl fmt::Debug for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PeerId({})", self.to_hex())
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
