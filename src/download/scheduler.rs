use std::net::SocketAddrV4;
use std::path::Path;
use std::sync::Arc;

use sha1::{Digest, Sha1};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::error::DownloadError;
use crate::metainfo::{Info, Metainfo};
use crate::peer::{download_piece, PeerId, PeerSession};
use crate::storage::{DownloadFile, PieceWriter};
use crate::tracker::HttpTracker;

/// Upper bound on concurrent peer sessions.
const MAX_SESSIONS: usize = 5;

/// Port reported to the tracker. This client never listens; the value is
/// the conventional BitTorrent port.
const ANNOUNCE_PORT: u16 = 6881;

/// Downloads the whole torrent to `out`.
///
/// Announces once, builds the session pool, and runs the fetch across it.
pub async fn download(meta: &Metainfo, out: &Path) -> Result<(), DownloadError> {
    let peer_id = PeerId::generate();
    let peers = announce(meta, &peer_id).await?;
    download_from_peers(meta, &peers, peer_id, out).await
}

/// Downloads the whole torrent from the given peer addresses.
///
/// Round-robin assignment: piece `i` goes to ready session `i mod N`, so a
/// session never has more than one piece in flight and the request/response
/// pairing inside each piece exchange stays intact. Each worker verifies
/// its pieces against the metainfo hashes and writes them at
/// `i * piece_length` through its own positional writer. The first failure
/// cancels all other workers and removes the staging file.
pub async fn download_from_peers(
    meta: &Metainfo,
    peers: &[SocketAddrV4],
    peer_id: PeerId,
    out: &Path,
) -> Result<(), DownloadError> {
    let info = Arc::new(meta.info.clone());
    let sessions = connect_ready_sessions(meta, peers, &peer_id).await;
    if sessions.is_empty() {
        return Err(DownloadError::NoPeers);
    }

    let pool_size = sessions.len();
    info!(
        peers = pool_size,
        pieces = info.piece_count(),
        "session pool ready"
    );

    let file = DownloadFile::create(out, info.length).await?;
    if let Err(e) = run_pool(sessions, info, &file).await {
        file.discard().await;
        return Err(e);
    }

    file.commit().await?;
    info!(path = %out.display(), "download complete");
    Ok(())
}

/// Spawns one worker per session and waits for all pieces to land.
async fn run_pool(
    sessions: Vec<PeerSession<TcpStream>>,
    info: Arc<Info>,
    file: &DownloadFile,
) -> Result<(), DownloadError> {
    let pool_size = sessions.len();

    let mut workers: JoinSet<Result<(), DownloadError>> = JoinSet::new();
    for (slot, mut session) in sessions.into_iter().enumerate() {
        let info = Arc::clone(&info);
        let mut writer = file.writer().await?;

        workers.spawn(async move {
            let mut piece = slot as u32;
            while (piece as usize) < info.piece_count() {
                fetch_one(&mut session, &info, piece, &mut writer).await?;
                piece += pool_size as u32;
            }
            Ok(())
        });
    }

    while let Some(joined) = workers.join_next().await {
        let failure = match joined {
            Ok(Ok(())) => continue,
            Ok(Err(e)) => e,
            Err(e) if e.is_cancelled() => continue,
            Err(e) => DownloadError::Task(e.to_string()),
        };

        // First failure wins; the rest observe the abort at their next
        // await point.
        workers.abort_all();
        while workers.join_next().await.is_some() {}
        return Err(failure);
    }

    Ok(())
}

/// Downloads a single piece to its own output file (the `download_piece`
/// verb). The first announced peer that reaches the unchoked state serves
/// the piece.
pub async fn download_piece_to(
    meta: &Metainfo,
    piece: u32,
    out: &Path,
) -> Result<(), DownloadError> {
    if piece as usize >= meta.info.piece_count() {
        return Err(DownloadError::InvalidPieceIndex(piece));
    }

    let peer_id = PeerId::generate();
    let peers = announce(meta, &peer_id).await?;

    let mut session = None;
    for addr in &peers {
        match ready_session(meta, *addr, &peer_id).await {
            Ok(s) => {
                session = Some(s);
                break;
            }
            Err(e) => warn!(%addr, error = %e, "peer not usable"),
        }
    }
    let mut session = session.ok_or(DownloadError::NoPeers)?;

    let data = fetch_verified(&mut session, &meta.info, piece).await?;

    let file = DownloadFile::create(out, data.len() as u64).await?;
    let staged = async {
        let mut writer = file.writer().await?;
        writer.write_at(0, &data).await
    }
    .await;
    if let Err(e) = staged {
        file.discard().await;
        return Err(e.into());
    }
    file.commit().await?;

    Ok(())
}

async fn announce(meta: &Metainfo, peer_id: &PeerId) -> Result<Vec<SocketAddrV4>, DownloadError> {
    let tracker = HttpTracker::new(&meta.announce)?;
    let response = tracker
        .announce(&meta.info_hash, peer_id, ANNOUNCE_PORT, 0, 0, meta.info.length)
        .await?;

    if response.peers.is_empty() {
        return Err(DownloadError::NoPeers);
    }
    Ok(response.peers)
}

/// Connects to up to [`MAX_SESSIONS`] peers in parallel and returns those
/// that completed handshake, bitfield, and unchoke. Individual failures
/// are logged and dropped.
async fn connect_ready_sessions(
    meta: &Metainfo,
    peers: &[SocketAddrV4],
    peer_id: &PeerId,
) -> Vec<PeerSession<TcpStream>> {
    let mut attempts: JoinSet<Result<PeerSession<TcpStream>, (SocketAddrV4, DownloadError)>> =
        JoinSet::new();

    for &addr in peers.iter().take(MAX_SESSIONS) {
        let meta = meta.clone();
        let peer_id = *peer_id;
        attempts.spawn(async move {
            ready_session(&meta, addr, &peer_id)
                .await
                .map_err(|e| (addr, e))
        });
    }

    let mut sessions = Vec::new();
    while let Some(joined) = attempts.join_next().await {
        match joined {
            Ok(Ok(session)) => sessions.push(session),
            Ok(Err((addr, e))) => warn!(%addr, error = %e, "peer not usable"),
            Err(e) => warn!(error = %e, "connect task failed"),
        }
    }
    sessions
}

/// Takes one peer through handshake → bitfield → interested → unchoke.
async fn ready_session(
    meta: &Metainfo,
    addr: SocketAddrV4,
    peer_id: &PeerId,
) -> Result<PeerSession<TcpStream>, DownloadError> {
    let mut session = PeerSession::connect(addr, &meta.info_hash, peer_id).await?;
    session.receive_bitfield(meta.info.piece_count()).await?;
    session.express_interest().await?;
    debug!(%addr, peer = %session.remote_id(), "session unchoked");
    Ok(session)
}

/// Fetches and verifies one piece, then writes it at its file offset.
async fn fetch_one(
    session: &mut PeerSession<TcpStream>,
    info: &Info,
    piece: u32,
    writer: &mut PieceWriter,
) -> Result<(), DownloadError> {
    let data = fetch_verified(session, info, piece).await?;
    writer
        .write_at(piece as u64 * info.piece_length, &data)
        .await?;
    debug!(piece, len = data.len(), "piece accepted");
    Ok(())
}

/// Fetches one piece and checks it against the metainfo hash.
async fn fetch_verified<S: AsyncRead + AsyncWrite + Unpin>(
    session: &mut PeerSession<S>,
    info: &Info,
    piece: u32,
) -> Result<Vec<u8>, DownloadError> {
    if !session.has_piece(piece) {
        return Err(DownloadError::MissingPiece(piece));
    }

    let data = download_piece(session, piece, info.piece_size(piece)).await?;

    let digest: [u8; 20] = Sha1::digest(&data).into();
    if Some(&digest) != info.piece_hash(piece) {
        warn!(piece, "hash mismatch");
        return Err(DownloadError::HashMismatch(piece));
    }

    Ok(data)
}
