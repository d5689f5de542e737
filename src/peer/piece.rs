//! Pipelined piece fetching.
//!
//! A piece is transferred as 16 KiB blocks. All `request` frames for a
//! piece go out before any `piece` frame is read back: the pipelining
//! hides one round-trip per block, and because every response carries its
//! own `begin` offset, responses may arrive in any order without a request
//! table to correlate them.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::trace;

use super::connection::PeerSession;
use super::error::PeerError;
use super::message::{Message, MessageId};

/// Canonical transfer block size (16 KiB).
pub const BLOCK_SIZE: u32 = 1 << 14;

/// Number of blocks in a piece of `piece_length` bytes.
pub fn block_count(piece_length: u32) -> u32 {
    piece_length.div_ceil(BLOCK_SIZE)
}

/// Length of block `index` within a piece of `piece_length` bytes.
///
/// Every block is full-size except possibly the last of the piece, which
/// holds whatever remains.
pub fn block_length(piece_length: u32, index: u32) -> u32 {
    BLOCK_SIZE.min(piece_length - index * BLOCK_SIZE)
}

/// Downloads one piece over an unchoked session and returns its bytes.
///
/// Sends every block request up front, then reads exactly as many `piece`
/// frames back, placing each block at the offset its `begin` field names.
/// The session is borrowed exclusively for the whole exchange, so the
/// request and response streams cannot interleave with another piece.
pub async fn download_piece<S: AsyncRead + AsyncWrite + Unpin>(
    session: &mut PeerSession<S>,
    index: u32,
    piece_length: u32,
) -> Result<Vec<u8>, PeerError> {
    let blocks = block_count(piece_length);

    for block in 0..blocks {
        session
            .send(Message::Request {
                index,
                begin: block * BLOCK_SIZE,
                length: block_length(piece_length, block),
            })
            .await?;
    }
    trace!(piece = index, blocks, "requests pipelined");

    let mut buf = vec![0u8; piece_length as usize];
    let mut received: u32 = 0;

    for _ in 0..blocks {
        let message = session.receive_expected(MessageId::Piece).await?;
        let Message::Piece {
            index: got,
            begin,
            data,
        } = message
        else {
            return Err(PeerError::Protocol("expected piece payload".into()));
        };

        if got != index {
            return Err(PeerError::BlockMismatch {
                expected: index,
                got,
            });
        }

        let begin = begin as usize;
        if begin + data.len() > buf.len() {
            return Err(PeerError::Protocol(format!(
                "block at {begin}+{} overruns piece of {piece_length} bytes",
                data.len(),
            )));
        }

        buf[begin..begin + data.len()].copy_from_slice(&data);
        received += data.len() as u32;
    }

    if received != piece_length {
        return Err(PeerError::TruncatedPiece {
            expected: piece_length,
            got: received,
        });
    }

    Ok(buf)
}
