//! Filesystem-backed artifact store.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs as tokio_fs;

use super::{key_segments, ArtifactStore, StoreError, StoredArtifact};

/// Stores each artifact as a file under a root directory, mirroring the key
/// path (`passport_photos/{owner}.jpg` becomes `<root>/passport_photos/{owner}.jpg`).
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path for a key.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let mut path = self.root.clone();
        path.extend(key_segments(key)?);
        Ok(path)
    }
}

fn io_error(key: &str, source: std::io::Error) -> StoreError {
    StoreError::Io {
        key: key.to_string(),
        source,
    }
}

/// Write `bytes` to a temp file of its own in `dir`, then move it over
/// `target`. Readers see the old file or the new one, never a partial write,
/// and the temp file is removed on every failure path.
fn write_replacing(dir: &Path, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut tmp = tempfile::Builder::new()
        .prefix(".cropo-")
        .suffix(".part")
        .tempfile_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(target).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl ArtifactStore for FsStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredArtifact, StoreError> {
        let path = self.path_for(key)?;
        let dir = path.parent().unwrap_or(self.root.as_path()).to_path_buf();
        tokio_fs::create_dir_all(&dir)
            .await
            .map_err(|e| io_error(key, e))?;

        let size = bytes.len();
        let target = path.clone();
        tokio::task::spawn_blocking(move || write_replacing(&dir, &target, &bytes))
            .await
            .map_err(|e| io_error(key, std::io::Error::other(e)))?
            .map_err(|e| io_error(key, e))?;

        tracing::info!(key, size, path = %path.display(), "stored artifact");

        Ok(StoredArtifact {
            key: key.to_string(),
            content_type: content_type.to_string(),
            size,
        })
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.path_for(key)?;
        match tokio_fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key, e)),
        }
    }
}
