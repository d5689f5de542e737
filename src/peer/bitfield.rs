use bytes::Bytes;

use super::error::PeerError;

/// The pieces a peer advertises, one bit per piece.
///
/// Bit 0 is the high bit of the first byte (MSB-first). The wire form must
/// be exactly `ceil(piece_count / 8)` bytes with every spare trailing bit
/// zero; anything else is a protocol violation.
#[derive(Debug, Clone)]
pub struct Bitfield {
    bits: Bytes,
    piece_count: usize,
}

impl Bitfield {
    /// Validates a received bitfield payload against the torrent's piece
    /// count.
    pub fn from_wire(bits: Bytes, piece_count: usize) -> Result<Self, PeerError> {
        let expected = piece_count.div_ceil(8);
        if bits.len() != expected {
            return Err(PeerError::Protocol(format!(
                "bitfield of {} bytes for {piece_count} pieces, expected {expected}",
                bits.len(),
            )));
        }

        let spare = expected * 8 - piece_count;
        if spare > 0 {
            let mask = (1u8 << spare) - 1;
            if bits[expected - 1] & mask != 0 {
                return Err(PeerError::Protocol(
                    "bitfield has spare bits set".to_string(),
                ));
            }
        }

        Ok(Self { bits, piece_count })
    }

    /// Whether the peer has piece `index`.
    pub fn has_piece(&self, index: u32) -> bool {
        let index = index as usize;
        if index >= self.piece_count {
            return false;
        }
        let byte = index / 8;
        let bit = 7 - (index % 8);
        (self.bits[byte] >> bit) & 1 == 1
    }

    /// Number of pieces the peer has.
    pub fn count(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }

    pub fn piece_count(&self) -> usize {
        self.piece_count
    }
}
