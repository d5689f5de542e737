use std::net::SocketAddrV4;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tracing::{debug, trace};

use super::bitfield::Bitfield;
use super::error::PeerError;
use super::message::{Handshake, Message, MessageId};
use super::peer_id::PeerId;
use super::transport::PeerTransport;
use crate::metainfo::InfoHash;

/// Where a session sits in its lifecycle.
///
/// Sessions move strictly forward: handshaked on creation, bitfielded after
/// the mandatory first frame, unchoked once the peer grants requests, and
/// closed on the first violation or I/O failure. A closed session is
/// unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Handshaked,
    Bitfielded,
    Unchoked,
    Closed,
}

/// One connection to a remote peer.
///
/// Owns the transport exclusively. Sharing across tasks is done by moving
/// the session into a task for the duration of a whole piece exchange,
/// which keeps each direction of the stream totally ordered without any
/// per-message locking.
pub struct PeerSession<S> {
    transport: PeerTransport<S>,
    remote_id: PeerId,
    state: SessionState,
    bitfield: Option<Bitfield>,
    am_interested: bool,
    peer_choking: bool,
}

impl PeerSession<TcpStream> {
    /// Connects over TCP and exchanges handshakes.
    pub async fn connect(
        addr: SocketAddrV4,
        info_hash: &InfoHash,
        peer_id: &PeerId,
    ) -> Result<Self, PeerError> {
        let stream = TcpStream::connect(addr).await?;
        trace!(%addr, "tcp connected");
        Self::establish(stream, info_hash, peer_id).await
    }
}

impl<S: AsyncRead + AsyncWrite + Unpin> PeerSession<S> {
    /// Exchanges handshakes over an already-open stream.
    ///
    /// Writes our 68-byte record, reads the peer's, and rejects any reply
    /// whose info hash differs from ours.
    pub async fn establish(
        stream: S,
        info_hash: &InfoHash,
        peer_id: &PeerId,
    ) -> Result<Self, PeerError> {
        let mut transport = PeerTransport::new(stream);

        let ours = Handshake::new(*info_hash.as_bytes(), *peer_id.as_bytes());
        transport.send_handshake(&ours).await?;
        let theirs = transport.receive_handshake().await?;

        if &theirs.info_hash != info_hash.as_bytes() {
            return Err(PeerError::InfoHashMismatch);
        }

        let remote_id = PeerId::from_bytes(theirs.peer_id);
        debug!(peer = %remote_id, "handshake complete");

        Ok(Self {
            transport,
            remote_id,
            state: SessionState::Handshaked,
            bitfield: None,
            am_interested: false,
            peer_choking: true,
        })
    }

    /// The peer id received in the handshake.
    pub fn remote_id(&self) -> &PeerId {
        &self.remote_id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the peer advertised piece `index` in its bitfield.
    pub fn has_piece(&self, index: u32) -> bool {
        self.bitfield.as_ref().is_some_and(|b| b.has_piece(index))
    }

    /// Receives the mandatory bitfield that must be the peer's first typed
    /// frame, validating its width against the torrent's piece count.
    pub async fn receive_bitfield(&mut self, piece_count: usize) -> Result<(), PeerError> {
        let message = self.receive_expected(MessageId::Bitfield).await?;
        let Message::Bitfield(bits) = message else {
            return Err(PeerError::Protocol("expected bitfield payload".into()));
        };

        let bitfield = match Bitfield::from_wire(bits, piece_count) {
            Ok(b) => b,
            Err(e) => {
                self.state = SessionState::Closed;
                return Err(e);
            }
        };

        trace!(pieces = bitfield.count(), of = piece_count, "bitfield");
        self.bitfield = Some(bitfield);
        self.state = SessionState::Bitfielded;
        Ok(())
    }

    /// Declares interest and waits for the peer to unchoke us.
    pub async fn express_interest(&mut self) -> Result<(), PeerError> {
        self.send(Message::Interested).await?;
        self.am_interested = true;
        self.receive_expected(MessageId::Unchoke).await?;
        self.state = SessionState::Unchoked;
        Ok(())
    }

    /// Sends one message.
    pub async fn send(&mut self, message: Message) -> Result<(), PeerError> {
        if let Err(e) = self.transport.send_message(&message).await {
            self.state = SessionState::Closed;
            return Err(e);
        }
        Ok(())
    }

    /// Receives the next typed frame, requiring it to be `expected`.
    ///
    /// Keep-alives are consumed transparently and never surface. Choke and
    /// unchoke transitions are recorded before the type check, so the flag
    /// is right even when the frame itself is the violation. Any mismatch
    /// or I/O failure closes the session.
    pub async fn receive_expected(&mut self, expected: MessageId) -> Result<Message, PeerError> {
        loop {
            let message = match self.transport.receive_message().await {
                Ok(m) => m,
                Err(e) => {
                    self.state = SessionState::Closed;
                    return Err(e);
                }
            };

            let got = match message.id() {
                // Keep-alives hold the connection open and nothing else.
                None => continue,
                Some(id) => id,
            };

            match got {
                MessageId::Choke => self.peer_choking = true,
                MessageId::Unchoke => self.peer_choking = false,
                _ => {}
            }

            if got != expected {
                self.state = SessionState::Closed;
                return Err(PeerError::UnexpectedMessage { expected, got });
            }
            return Ok(message);
        }
    }

    /// Whether the peer currently allows our requests.
    pub fn peer_choking(&self) -> bool {
        self.peer_choking
    }

    pub fn am_interested(&self) -> bool {
        self.am_interested
    }
}
