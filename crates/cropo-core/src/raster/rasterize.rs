//! Crop-to-blob rasterization.
//!
//! The output surface is sized from the crop as selected on screen, while
//! the sampled rectangle comes from the native-resolution bitmap. Stored
//! photos therefore have the same pixel size no matter how large the
//! original file was.

use super::surface::RasterSurface;
use super::{RasterError, RasterizedCrop};
use crate::encode::encode_jpeg;
use crate::geometry::{round_to_pixels, CropRegion, DisplayedImageGeometry, NativeRect};
use crate::source::DisplayedImage;

/// Where a crop samples from and how large the output will be.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterPlan {
    /// Sampled rectangle in native pixels.
    pub source: NativeRect,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

/// Work out the sampling rectangle and output size for a crop.
///
/// Output size is the displayed crop size rounded half up. Crops with a
/// zero, negative or non-finite extent, or that round to zero pixels, are
/// rejected with `DegenerateCrop`.
pub fn plan_crop(
    geometry: &DisplayedImageGeometry,
    crop: &CropRegion,
) -> Result<RasterPlan, RasterError> {
    let crop = crop.to_pixels(geometry);
    let degenerate = RasterError::DegenerateCrop {
        width: crop.width,
        height: crop.height,
    };
    if crop.is_degenerate() {
        return Err(degenerate);
    }

    let (width, height) = (round_to_pixels(crop.width), round_to_pixels(crop.height));
    if width == 0 || height == 0 {
        return Err(degenerate);
    }

    Ok(RasterPlan {
        source: geometry.to_native(&crop),
        width,
        height,
    })
}

/// Rasterize a crop of the displayed photo into a JPEG blob.
///
/// # Errors
///
/// - `NotReady` when `image` is `None`
/// - `DegenerateCrop` for zero-area selections, before any surface exists
/// - `SurfaceUnavailable` when the output surface cannot be allocated
/// - `EncodeFailure` when the encoder produces nothing
///
/// # Example
///
/// ```ignore
/// let crop = CropRegion::pixels(10.0, 10.0, 140.0, 180.0);
/// let result = rasterize(Some(&photo), &crop)?;
/// assert_eq!((result.width, result.height), (140, 180));
/// ```
#[tracing::instrument(level = "debug", skip(image), err)]
pub fn rasterize(
    image: Option<&DisplayedImage>,
    crop: &CropRegion,
) -> Result<RasterizedCrop, RasterError> {
    let image = image.ok_or(RasterError::NotReady)?;
    let plan = plan_crop(image.geometry(), crop)?;

    let mut surface = RasterSurface::allocate(plan.width, plan.height)?;
    surface.draw_image(image.image(), &plan.source);

    let bytes = encode_jpeg(&surface.into_image())?;

    tracing::debug!(
        width = plan.width,
        height = plan.height,
        source = ?plan.source,
        bytes = bytes.len(),
        "rasterized crop"
    );

    Ok(RasterizedCrop {
        width: plan.width,
        height: plan.height,
        source: plan.source,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::DecodedImage;

    fn photo(natural: (u32, u32), rendered: (f64, f64)) -> DisplayedImage {
        let (w, h) = natural;
        let mut pixels = Vec::with_capacity((w * h * 3) as usize);
        for y in 0..h {
            for x in 0..w {
                pixels.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 90]);
            }
        }
        DisplayedImage::with_rendered_size(DecodedImage::new(w, h, pixels), rendered.0, rendered.1)
            .unwrap()
    }

    fn decoded_dimensions(bytes: &[u8]) -> (u32, u32) {
        let img = image::load_from_memory(bytes).unwrap();
        (img.width(), img.height())
    }

    #[test]
    fn test_passport_scenario() {
        let src = photo((900, 1200), (300.0, 400.0));
        let crop = CropRegion::pixels(10.0, 10.0, 140.0, 180.0);

        let result = rasterize(Some(&src), &crop).unwrap();

        assert_eq!((result.width, result.height), (140, 180));
        assert_eq!(
            result.source,
            NativeRect {
                x: 30.0,
                y: 30.0,
                width: 420.0,
                height: 540.0
            }
        );
        assert_eq!(decoded_dimensions(&result.bytes), (140, 180));
        assert_eq!(result.content_type(), "image/jpeg");
    }

    #[test]
    fn test_not_ready_without_image() {
        let crop = CropRegion::pixels(10.0, 10.0, 140.0, 180.0);
        assert!(matches!(rasterize(None, &crop), Err(RasterError::NotReady)));
    }

    #[test]
    fn test_zero_width_is_degenerate() {
        let src = photo((90, 120), (30.0, 40.0));
        let crop = CropRegion::pixels(0.0, 0.0, 0.0, 180.0);

        assert!(matches!(
            rasterize(Some(&src), &crop),
            Err(RasterError::DegenerateCrop { .. })
        ));
    }

    #[test]
    fn test_zero_height_is_degenerate() {
        let src = photo((90, 120), (30.0, 40.0));
        let crop = CropRegion::pixels(0.0, 0.0, 140.0, 0.0);

        assert!(matches!(
            rasterize(Some(&src), &crop),
            Err(RasterError::DegenerateCrop { .. })
        ));
    }

    #[test]
    fn test_degenerate_checked_before_surface() {
        // A huge height would be SurfaceUnavailable if a surface were attempted.
        let src = photo((90, 120), (30.0, 40.0));
        let crop = CropRegion::pixels(0.0, 0.0, 0.0, 1e12);

        assert!(matches!(
            rasterize(Some(&src), &crop),
            Err(RasterError::DegenerateCrop { .. })
        ));
    }

    #[test]
    fn test_sub_pixel_crop_is_degenerate() {
        let plan = plan_crop(
            &DisplayedImageGeometry::unscaled(100.0, 100.0).unwrap(),
            &CropRegion::pixels(0.0, 0.0, 0.4, 10.0),
        );
        assert!(matches!(plan, Err(RasterError::DegenerateCrop { .. })));
    }

    #[test]
    fn test_oversized_crop_surface_unavailable() {
        let src = photo((10, 10), (10.0, 10.0));
        let crop = CropRegion::pixels(0.0, 0.0, 40_000.0, 10.0);

        assert!(matches!(
            rasterize(Some(&src), &crop),
            Err(RasterError::SurfaceUnavailable { width: 40_000, height: 10 })
        ));
    }

    #[test]
    fn test_fractional_crop_rounds_half_up() {
        let src = photo((200, 200), (100.0, 100.0));
        let crop = CropRegion::pixels(0.0, 0.0, 35.5, 45.49);

        let result = rasterize(Some(&src), &crop).unwrap();
        assert_eq!((result.width, result.height), (36, 45));
        assert_eq!(decoded_dimensions(&result.bytes), (36, 45));
    }

    #[test]
    fn test_identity_geometry_samples_displayed_rect() {
        let geometry = DisplayedImageGeometry::unscaled(300.0, 400.0).unwrap();
        let crop = CropRegion::pixels(12.0, 34.0, 140.0, 180.0);
        let plan = plan_crop(&geometry, &crop).unwrap();

        assert_eq!(
            plan.source,
            NativeRect {
                x: 12.0,
                y: 34.0,
                width: 140.0,
                height: 180.0
            }
        );
    }

    #[test]
    fn test_independent_axis_scaling() {
        // Non-uniform: 2x horizontally, 3x vertically
        let src = photo((200, 300), (100.0, 100.0));
        let crop = CropRegion::pixels(5.0, 5.0, 35.0, 45.0);

        let result = rasterize(Some(&src), &crop).unwrap();

        assert_eq!(result.source.width, 70.0);
        assert_eq!(result.source.height, 135.0);
        assert_eq!(result.source.x, 10.0);
        assert_eq!(result.source.y, 15.0);
        assert_eq!((result.width, result.height), (35, 45));
    }

    #[test]
    fn test_output_size_ignores_native_resolution() {
        let small = photo((300, 400), (300.0, 400.0));
        let large = photo((1200, 1600), (300.0, 400.0));
        let crop = CropRegion::pixels(20.0, 20.0, 140.0, 180.0);

        let a = rasterize(Some(&small), &crop).unwrap();
        let b = rasterize(Some(&large), &crop).unwrap();

        assert_eq!((a.width, a.height), (b.width, b.height));
        assert_ne!(a.source, b.source);
    }

    #[test]
    fn test_percent_crop_is_resolved() {
        let src = photo((900, 1200), (300.0, 400.0));
        let crop = CropRegion::percent(10.0, 10.0, 40.0, 45.0);

        let result = rasterize(Some(&src), &crop).unwrap();
        assert_eq!((result.width, result.height), (120, 180));
        assert_eq!(result.source.x, 90.0);
        assert_eq!(result.source.y, 120.0);
    }

    #[test]
    fn test_repeat_calls_same_dimensions() {
        let src = photo((900, 1200), (300.0, 400.0));
        let crop = CropRegion::pixels(33.3, 12.7, 140.2, 180.3);

        let a = rasterize(Some(&src), &crop).unwrap();
        let b = rasterize(Some(&src), &crop).unwrap();

        assert_eq!((a.width, a.height), (b.width, b.height));
        assert_eq!(decoded_dimensions(&a.bytes), decoded_dimensions(&b.bytes));
    }

    #[test]
    fn test_source_image_not_mutated() {
        let src = photo((90, 120), (30.0, 40.0));
        let before = src.image().clone();

        rasterize(Some(&src), &CropRegion::pixels(1.0, 1.0, 14.0, 18.0)).unwrap();

        assert_eq!(src.image(), &before);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
