use std::io::SeekFrom;
use std::path::{Path, PathBuf};

use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncSeekExt, AsyncWriteExt};
use tracing::debug;

use super::error::StorageError;

/// The staging file for a download in progress.
///
/// Created as `<target>.part` and truncated up front to the final length.
/// Writers obtained from [`DownloadFile::writer`] each hold their own file
/// handle, so concurrent tasks can write disjoint piece ranges without
/// sharing state.
pub struct DownloadFile {
    part_path: PathBuf,
    final_path: PathBuf,
}

impl DownloadFile {
    /// Creates the staging file and sizes it to `length` bytes.
    pub async fn create(path: &Path, length: u64) -> Result<Self, StorageError> {
        let part_path = part_path_for(path);

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&part_path)
            .await?;
        file.set_len(length).await?;

        debug!(path = %part_path.display(), length, "staging file created");
        Ok(Self {
            part_path,
            final_path: path.to_path_buf(),
        })
    }

    /// Opens an independent positional writer onto the staging file.
    pub async fn writer(&self) -> Result<PieceWriter, StorageError> {
        let file = OpenOptions::new().write(true).open(&self.part_path).await?;
        Ok(PieceWriter { file })
    }

    /// Renames the staging file onto the target path.
    pub async fn commit(self) -> Result<(), StorageError> {
        tokio::fs::rename(&self.part_path, &self.final_path).await?;
        debug!(path = %self.final_path.display(), "download committed");
        Ok(())
    }

    /// Removes the staging file; unlink failures are logged, not returned.
    pub async fn discard(self) {
        if let Err(e) = tokio::fs::remove_file(&self.part_path).await {
            debug!(path = %self.part_path.display(), error = %e, "discard failed");
        }
    }

    pub fn part_path(&self) -> &Path {
        &self.part_path
    }
}

/// One task's handle for positional writes into the staging file.
pub struct PieceWriter {
    file: File,
}

impl PieceWriter {
    /// Writes `data` at the given absolute byte offset.
    pub async fn write_at(&mut self, offset: u64, data: &[u8]) -> Result<(), StorageError> {
        self.file.seek(SeekFrom::Start(offset)).await?;
        self.file.write_all(data).await?;
        Ok(())
    }
}

/// `<target>.part`, appended to the full file name so `archive.tar.gz`
/// stages as `archive.tar.gz.part`.
fn part_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".part");
    PathBuf::from(name)
}
