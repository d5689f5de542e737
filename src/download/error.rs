use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("tracker error: {0}")]
    Tracker(#[from] crate::tracker::TrackerError),

    #[error("peer error: {0}")]
    Peer(#[from] crate::peer::PeerError),

    #[error("storage error: {0}")]
    Storage(#[from] crate::storage::StorageError),

    /// The tracker produced no peers, or none of them became ready.
    #[error("no usable peers")]
    NoPeers,

    /// A piece index outside the torrent.
    #[error("piece {0} does not exist")]
    InvalidPieceIndex(u32),

    /// The assigned peer's bitfield does not cover the piece.
    #[error("peer does not have piece {0}")]
    MissingPiece(u32),

    /// The assembled piece hashed to something other than the metainfo's
    /// entry.
    #[error("piece {0} failed hash verification")]
    HashMismatch(u32),

    /// A worker task died without returning (panic or runtime shutdown).
    #[error("download task failed: {0}")]
    Task(String),
}
