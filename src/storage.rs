//! Output file staging.
//!
//! A download is assembled in a `.part` file pre-truncated to the final
//! length, so every piece writer addresses its own disjoint byte range and
//! no append coordination is needed. On success the staging file is
//! renamed onto the target path in one step; on failure it is unlinked,
//! leaving no partial output behind.

mod error;
mod output;

pub use error::StorageError;
pub use output::{DownloadFile, PieceWriter};

#[cfg(test)]
mod tests;
