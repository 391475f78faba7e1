//! Crop-and-upload orchestration.
//!
//! Rasterization and persistence fail independently: a photo that
//! rasterized fine can still fail to store, and the caller is told which
//! step went wrong. Nothing is retried.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::geometry::CropRegion;
use crate::raster::{rasterize_async, RasterError};
use crate::source::DisplayedImage;
use crate::store::{passport_photo_key, ArtifactStore, StoreError, StoredArtifact};

/// Which step of a crop-and-upload failed.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Could not crop photo: {0}")]
    Raster(#[from] RasterError),

    #[error("Could not store photo: {0}")]
    Store(#[from] StoreError),
}

/// Result of a successful crop-and-upload.
///
/// The JPEG itself is owned by the store; read it back through
/// `artifact.key` to show a preview.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    pub artifact: StoredArtifact,
    pub width: u32,
    pub height: u32,
}

/// Crops passport photos and hands them to an injected store.
#[derive(Debug, Clone)]
pub struct PassportPhotoUploader<S> {
    store: S,
}

impl<S: ArtifactStore> PassportPhotoUploader<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Rasterize `crop` and store it as `owner_id`'s passport photo.
    ///
    /// The owner id is validated before any pixel work is done.
    #[tracing::instrument(skip(self, image, crop), err)]
    pub async fn crop_and_upload(
        &self,
        owner_id: &str,
        image: Option<Arc<DisplayedImage>>,
        crop: CropRegion,
    ) -> Result<UploadReceipt, UploadError> {
        let key = passport_photo_key(owner_id)?;

        let cropped = rasterize_async(image, crop).await?;
        let (width, height) = (cropped.width, cropped.height);
        let content_type = cropped.content_type();

        let artifact = self
            .store
            .put(&key, cropped.into_bytes(), content_type)
            .await?;
        tracing::info!(key = %artifact.key, width, height, size = artifact.size, "passport photo uploaded");

        Ok(UploadReceipt {
            artifact,
            width,
            height,
        })
    }
}
