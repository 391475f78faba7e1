//! In-memory artifact store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{key_segments, ArtifactStore, StoreError, StoredArtifact};

#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Vec<u8>,
    content_type: String,
}

/// Keeps artifacts in a map. Useful for previews and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RwLock<HashMap<String, StoredObject>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }

    /// Content type recorded for `key`.
    pub async fn content_type(&self, key: &str) -> Option<String> {
        self.objects
            .read()
            .await
            .get(key)
            .map(|o| o.content_type.clone())
    }
}

#[async_trait]
impl ArtifactStore for MemoryStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredArtifact, StoreError> {
        key_segments(key)?;

        let artifact = StoredArtifact {
            key: key.to_string(),
            content_type: content_type.to_string(),
            size: bytes.len(),
        };
        self.objects.write().await.insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(artifact)
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        key_segments(key)?;
        Ok(self.objects.read().await.get(key).map(|o| o.bytes.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_get() {
        let store = MemoryStore::new();
        let stored = store
            .put("passport_photos/a.jpg", vec![1, 2, 3], "image/jpeg")
            .await
            .unwrap();

        assert_eq!(stored.size, 3);
        assert_eq!(
            store.get("passport_photos/a.jpg").await.unwrap(),
            Some(vec![1, 2, 3])
        );
        assert_eq!(
            store.content_type("passport_photos/a.jpg").await.as_deref(),
            Some("image/jpeg")
        );
    }

    #[tokio::test]
    async fn test_put_replaces() {
        let store = MemoryStore::new();
        store.put("k.jpg", vec![1], "image/jpeg").await.unwrap();
        store.put("k.jpg", vec![2, 2], "image/jpeg").await.unwrap();

        assert_eq!(store.len().await, 1);
        assert_eq!(store.get("k.jpg").await.unwrap(), Some(vec![2, 2]));
    }

    #[tokio::test]
    async fn test_missing_key() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);
        assert_eq!(store.get("nothing.jpg").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rejects_invalid_key() {
        let store = MemoryStore::new();
        let result = store.put("../escape.jpg", vec![1], "image/jpeg").await;
        assert!(matches!(result, Err(StoreError::InvalidKey(_))));
    }
}
