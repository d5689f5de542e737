//! Command-line argument surface.

use std::net::SocketAddrV4;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// A minimal BitTorrent client for single-file torrents.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Decode a bencoded value and print it as JSON
    Decode {
        /// The bencoded value, e.g. `d3:foo3:bare`
        value: String,
    },

    /// Print a torrent's metadata and piece hashes
    Info {
        /// Path to a .torrent file
        torrent: PathBuf,
    },

    /// Announce to the tracker and print the peer list
    Peers {
        /// Path to a .torrent file
        torrent: PathBuf,
    },

    /// Handshake with one peer and print its peer id
    Handshake {
        /// Path to a .torrent file
        torrent: PathBuf,
        /// Peer address, e.g. `127.0.0.1:6881`
        peer: SocketAddrV4,
    },

    /// Download a single piece, verify it, and write it to a file
    #[command(name = "download_piece")]
    DownloadPiece {
        /// Output file path
        #[arg(short)]
        output: PathBuf,
        /// Path to a .torrent file
        torrent: PathBuf,
        /// Zero-based piece index
        piece: u32,
    },

    /// Download the whole file
    Download {
        /// Output file path
        #[arg(short)]
        output: PathBuf,
        /// Path to a .torrent file
        torrent: PathBuf,
    },
}
