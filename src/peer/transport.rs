use std::time::Duration;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;

use super::error::PeerError;
use super::message::{Handshake, Message, HANDSHAKE_LEN};
use super::piece::BLOCK_SIZE;

/// Largest legal frame: a `piece` message carrying one full block
/// (4-byte prefix + tag + index + begin + 16 KiB of data).
pub(crate) const MAX_FRAME_LEN: usize = BLOCK_SIZE as usize + 13;

const READ_TIMEOUT: Duration = Duration::from_secs(60);
const WRITE_TIMEOUT: Duration = Duration::from_secs(30);

/// Framed reader/writer over a peer connection.
///
/// Reads accumulate into one reusable buffer; a frame is only decoded once
/// all of its `4 + L` bytes have arrived. Hitting end-of-stream mid-frame
/// is an immediate [`PeerError::ConnectionClosed`]; a closed socket is
/// never retried. Both directions carry deadlines so a silent peer cannot
/// stall a download forever.
///
/// Generic over the stream so tests can drive it with an in-memory duplex
/// pipe; production code uses [`tokio::net::TcpStream`].
pub struct PeerTransport<S> {
    stream: S,
    read_buf: BytesMut,
}

impl<S: AsyncRead + AsyncWrite + Unpin> PeerTransport<S> {
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            read_buf: BytesMut::with_capacity(MAX_FRAME_LEN),
        }
    }

    /// Reads until the buffer holds at least `wanted` bytes.
    async fn fill(&mut self, wanted: usize) -> Result<(), PeerError> {
        while self.read_buf.len() < wanted {
            let n = timeout(READ_TIMEOUT, self.stream.read_buf(&mut self.read_buf))
                .await
                .map_err(|_| PeerError::Timeout)??;
            if n == 0 {
                return Err(PeerError::ConnectionClosed);
            }
        }
        Ok(())
    }

    pub async fn send_handshake(&mut self, handshake: &Handshake) -> Result<(), PeerError> {
        let data = handshake.encode();
        timeout(WRITE_TIMEOUT, self.stream.write_all(&data))
            .await
            .map_err(|_| PeerError::Timeout)??;
        Ok(())
    }

    pub async fn receive_handshake(&mut self) -> Result<Handshake, PeerError> {
        self.fill(HANDSHAKE_LEN).await?;
        let data = self.read_buf.split_to(HANDSHAKE_LEN);
        Handshake::decode(&data)
    }

    /// Writes one message as a single logical frame.
    pub async fn send_message(&mut self, message: &Message) -> Result<(), PeerError> {
        let data = message.encode();
        timeout(WRITE_TIMEOUT, self.stream.write_all(&data))
            .await
            .map_err(|_| PeerError::Timeout)??;
        Ok(())
    }

    /// Reads the next frame, keep-alives included.
    pub async fn receive_message(&mut self) -> Result<Message, PeerError> {
        self.fill(4).await?;

        let length = u32::from_be_bytes([
            self.read_buf[0],
            self.read_buf[1],
            self.read_buf[2],
            self.read_buf[3],
        ]) as usize;

        if length > MAX_FRAME_LEN {
            return Err(PeerError::FrameTooLarge(length));
        }

        self.fill(4 + length).await?;
        let frame = self.read_buf.split_to(4 + length);
        Message::decode(frame.freeze())
    }
}
