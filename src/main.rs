use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use minnow::bencode::decode;
use minnow::cli::{Args, Command};
use minnow::download;
use minnow::metainfo::{hex_str, Metainfo};
use minnow::peer::{PeerId, PeerSession};
use minnow::tracker::HttpTracker;

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr so verb output on stdout stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("minnow=warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Decode { value } => {
            let decoded = decode(value.as_bytes())?;
            println!("{}", decoded.to_json());
        }
        Command::Info { torrent } => {
            let meta = Metainfo::from_file(&torrent)?;
            println!("Tracker URL: {}", meta.announce);
            println!("Length: {}", meta.info.length);
            println!("Info Hash: {}", meta.info_hash);
            println!("Piece Length: {}", meta.info.piece_length);
            println!("Piece Hashes:");
            for hash in &meta.info.pieces {
                println!("{}", hex_str(hash));
            }
        }
        Command::Peers { torrent } => {
            let meta = Metainfo::from_file(&torrent)?;
            let tracker = HttpTracker::new(&meta.announce)?;
            let response = tracker
                .announce(&meta.info_hash, &PeerId::generate(), 6881, 0, 0, meta.info.length)
                .await?;
            for peer in response.peers {
                println!("{peer}");
            }
        }
        Command::Handshake { torrent, peer } => {
            let meta = Metainfo::from_file(&torrent)?;
            let session = PeerSession::connect(peer, &meta.info_hash, &PeerId::generate()).await?;
            println!("Peer ID: {}", session.remote_id());
        }
        Command::DownloadPiece {
            output,
            torrent,
            piece,
        } => {
            let meta = Metainfo::from_file(&torrent)?;
            download::download_piece_to(&meta, piece, &output).await?;
            println!("Piece {piece} downloaded to {}.", output.display());
        }
        Command::Download { output, torrent } => {
            let meta = Metainfo::from_file(&torrent)?;
            download::download(&meta, &output).await?;
            println!(
                "Downloaded {} to {}.",
                torrent.display(),
                output.display()
            );
        }
    }

    Ok(())
}
