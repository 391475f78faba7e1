//! Off-executor rasterization.

use std::sync::Arc;

use tokio::task::JoinError;

use super::{rasterize, RasterError, RasterizedCrop};
use crate::encode::EncodeError;
use crate::geometry::CropRegion;
use crate::source::DisplayedImage;

/// Rasterize on Tokio's blocking pool so the caller's executor keeps
/// running while the encoder works.
///
/// Resolves exactly once. There is no cancellation: dropping the future
/// detaches the blocking task, which still runs to completion.
pub async fn rasterize_async(
    image: Option<Arc<DisplayedImage>>,
    crop: CropRegion,
) -> Result<RasterizedCrop, RasterError> {
    tokio::task::spawn_blocking(move || rasterize(image.as_deref(), &crop))
        .await
        .map_err(aborted)?
}

/// A blocking task that panicked or was cancelled never produced a blob.
fn aborted(err: JoinError) -> RasterError {
    RasterError::EncodeFailure(EncodeError::Aborted(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::DecodedImage;

    fn photo() -> Arc<DisplayedImage> {
        let image = DecodedImage::new(90, 120, vec![40u8; 90 * 120 * 3]);
        Arc::new(DisplayedImage::with_rendered_size(image, 30.0, 40.0).unwrap())
    }

    #[tokio::test]
    async fn test_async_matches_sync_dimensions() {
        let image = photo();
        let crop = CropRegion::pixels(2.0, 2.0, 14.0, 18.0);

        let sync = rasterize(Some(image.as_ref()), &crop).unwrap();
        let pending = rasterize_async(Some(image.clone()), crop).await.unwrap();

        assert_eq!((sync.width, sync.height), (pending.width, pending.height));
        assert_eq!(sync.source, pending.source);
    }

    #[tokio::test]
    async fn test_async_not_ready() {
        let crop = CropRegion::pixels(2.0, 2.0, 14.0, 18.0);
        let result = rasterize_async(None, crop).await;
        assert!(matches!(result, Err(RasterError::NotReady)));
    }

    #[tokio::test]
    async fn test_async_degenerate() {
        let crop = CropRegion::pixels(2.0, 2.0, 0.0, 18.0);
        let result = rasterize_async(Some(photo()), crop).await;
        assert!(matches!(result, Err(RasterError::DegenerateCrop { .. })));
    }

    #[tokio::test]
    async fn test_panicked_task_is_encode_failure() {
        let err = tokio::task::spawn_blocking(|| -> Result<RasterizedCrop, RasterError> {
            panic!("encoder blew up")
        })
        .await
        .unwrap_err();

        let mapped = aborted(err);
        assert!(matches!(
            mapped,
            RasterError::EncodeFailure(EncodeError::Aborted(_))
        ));
        assert!(mapped.to_string().starts_with("Encoding failed: Encoding task aborted"));
    }
}
