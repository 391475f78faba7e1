//! Artifact sinks for cropped photos.
//!
//! Stores are injected into whatever orchestrates an upload; there is no
//! process-wide store. Keys are relative, `/`-separated paths such as
//! `passport_photos/{owner_id}.jpg`.

mod fs;
mod memory;

pub use fs::FsStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Folder passport photos are stored under.
pub const PASSPORT_PHOTO_PREFIX: &str = "passport_photos";

/// Errors from an artifact store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid owner id: {0:?}")]
    InvalidOwner(String),

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("Storage I/O error for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// What a store reports back after a successful put.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredArtifact {
    pub key: String,
    pub content_type: String,
    pub size: usize,
}

/// Capability to persist and read back encoded artifacts.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Store `bytes` under `key`, replacing anything already there.
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredArtifact, StoreError>;

    /// Read the bytes stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
}

#[async_trait]
impl<S: ArtifactStore + ?Sized> ArtifactStore for std::sync::Arc<S> {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredArtifact, StoreError> {
        (**self).put(key, bytes, content_type).await
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key).await
    }
}

/// Storage key for an owner's passport photo.
///
/// Owner ids must be non-empty and free of path syntax.
pub fn passport_photo_key(owner_id: &str) -> Result<String, StoreError> {
    let valid = !owner_id.is_empty()
        && owner_id != "."
        && owner_id != ".."
        && !owner_id.contains(['/', '\\', '\0']);
    if !valid {
        return Err(StoreError::InvalidOwner(owner_id.to_string()));
    }
    Ok(format!("{PASSPORT_PHOTO_PREFIX}/{owner_id}.jpg"))
}

/// Split a key into path segments, rejecting anything that could escape a
/// store root.
pub(crate) fn key_segments(key: &str) -> Result<Vec<&str>, StoreError> {
    let segments: Vec<&str> = key.split('/').collect();
    let valid = !key.is_empty()
        && segments
            .iter()
            .all(|s| !s.is_empty() && *s != "." && *s != ".." && !s.contains(['\\', '\0']));
    if !valid {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passport_photo_key() {
        assert_eq!(
            passport_photo_key("uid-123").unwrap(),
            "passport_photos/uid-123.jpg"
        );
    }

    #[test]
    fn test_passport_photo_key_rejects_bad_owner() {
        for owner in ["", "..", ".", "a/b", "a\\b"] {
            assert!(
                matches!(passport_photo_key(owner), Err(StoreError::InvalidOwner(_))),
                "owner {owner:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_key_segments() {
        assert_eq!(
            key_segments("passport_photos/u.jpg").unwrap(),
            vec!["passport_photos", "u.jpg"]
        );
        assert!(key_segments("").is_err());
        assert!(key_segments("/abs").is_err());
        assert!(key_segments("a//b").is_err());
        assert!(key_segments("a/../b").is_err());
    }
}
