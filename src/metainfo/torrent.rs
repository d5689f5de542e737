use std::path::Path;

use bytes::Bytes;

use super::error::MetainfoError;
use super::info_hash::InfoHash;
use crate::bencode::{decode, encode, Value};

/// A parsed single-file torrent.
///
/// ```no_run
/// use minnow::metainfo::Metainfo;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let meta = Metainfo::from_file("example.torrent")?;
/// println!("{} ({} bytes)", meta.info.name, meta.info.length);
/// println!("info hash {}", meta.info_hash);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Metainfo {
    /// Announce URL of the tracker.
    pub announce: String,
    /// The info dictionary describing the file and its pieces.
    pub info: Info,
    /// SHA-1 of the canonical bencoding of `info`.
    pub info_hash: InfoHash,
    raw_info: Bytes,
}

/// The `info` dictionary of a single-file torrent.
#[derive(Debug, Clone)]
pub struct Info {
    /// Suggested file name.
    pub name: String,
    /// Bytes per piece (the last piece may be shorter).
    pub piece_length: u64,
    /// SHA-1 hash of each piece.
    pub pieces: Vec<[u8; 20]>,
    /// Total file size in bytes.
    pub length: u64,
}

impl Metainfo {
    /// Parses a torrent from raw `.torrent` bytes.
    ///
    /// The info-hash is computed by re-encoding the decoded `info` value
    /// canonically, never by slicing the input; for any correctly-encoded
    /// torrent the two are identical, and re-encoding stays correct when
    /// they are not.
    pub fn from_bytes(data: &[u8]) -> Result<Self, MetainfoError> {
        let root = decode(data)?;
        let dict = root.as_dict().ok_or(MetainfoError::InvalidField("root"))?;

        let announce = dict
            .get(b"announce".as_slice())
            .ok_or(MetainfoError::MissingField("announce"))?
            .as_str()
            .ok_or(MetainfoError::InvalidField("announce"))?
            .to_string();

        let info_value = dict
            .get(b"info".as_slice())
            .ok_or(MetainfoError::MissingField("info"))?;

        let raw_info = Bytes::from(encode(info_value));
        let info_hash = InfoHash::from_info_bytes(&raw_info);
        let info = parse_info(info_value)?;

        Ok(Self {
            announce,
            info,
            info_hash,
            raw_info,
        })
    }

    /// Reads and parses a `.torrent` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MetainfoError> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// The canonical bencoded `info` dictionary.
    pub fn raw_info(&self) -> &Bytes {
        &self.raw_info
    }
}

impl Info {
    /// Number of pieces in the torrent.
    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// Effective size of piece `index` in bytes.
    ///
    /// Every piece is `piece_length` long except the last, which holds
    /// whatever remains of the file.
    pub fn piece_size(&self, index: u32) -> u32 {
        let offset = index as u64 * self.piece_length;
        self.piece_length.min(self.length.saturating_sub(offset)) as u32
    }

    /// Expected SHA-1 hash of piece `index`.
    pub fn piece_hash(&self, index: u32) -> Option<&[u8; 20]> {
        self.pieces.get(index as usize)
    }
}

fn parse_info(value: &Value) -> Result<Info, MetainfoError> {
    let dict = value.as_dict().ok_or(MetainfoError::InvalidField("info"))?;

    let name = dict
        .get(b"name".as_slice())
        .and_then(|v| v.as_str())
        .ok_or(MetainfoError::MissingField("name"))?
        .to_string();

    let piece_length = dict
        .get(b"piece length".as_slice())
        .and_then(|v| v.as_integer())
        .ok_or(MetainfoError::MissingField("piece length"))?;

    // Block arithmetic on the wire runs in u32; a piece length outside that
    // range cannot be requested anyway.
    if piece_length <= 0 || piece_length > u32::MAX as i64 {
        return Err(MetainfoError::InvalidField("piece length"));
    }
    let piece_length = piece_length as u64;

    let pieces_bytes = dict
        .get(b"pieces".as_slice())
        .and_then(|v| v.as_bytes())
        .ok_or(MetainfoError::MissingField("pieces"))?;

    if pieces_bytes.len() % 20 != 0 {
        return Err(MetainfoError::InvalidField("pieces"));
    }

    let pieces: Vec<[u8; 20]> = pieces_bytes
        .chunks_exact(20)
        .map(|chunk| {
            let mut hash = [0u8; 20];
            hash.copy_from_slice(chunk);
            hash
        })
        .collect();

    if dict.get(b"files".as_slice()).is_some() {
        return Err(MetainfoError::MultiFile);
    }

    let length = dict
        .get(b"length".as_slice())
        .and_then(|v| v.as_integer())
        .ok_or(MetainfoError::MissingField("length"))?;
    if length < 0 {
        return Err(MetainfoError::InvalidField("length"));
    }
    let length = length as u64;

    // ceil(length / piece_length) pieces must match the hash list.
    if length.div_ceil(piece_length) != pieces.len() as u64 {
        return Err(MetainfoError::InvalidField("pieces"));
    }

    Ok(Info {
        name,
        piece_length,
        pieces,
        length,
    })
}
