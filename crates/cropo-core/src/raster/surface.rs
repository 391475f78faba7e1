//! Offscreen RGB surface and resampling blit.

use super::RasterError;
use crate::decode::DecodedImage;
use crate::geometry::NativeRect;

/// Largest surface edge, in pixels.
pub const MAX_SURFACE_DIMENSION: u32 = 32_767;

/// Largest surface area, in pixels.
pub const MAX_SURFACE_AREA: u64 = 268_435_456;

/// A zero-filled RGB buffer owned by one rasterization call.
pub(crate) struct RasterSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterSurface {
    /// Allocate a black surface.
    ///
    /// Fails with `SurfaceUnavailable` when the size is zero, over the
    /// surface limits, or the allocation itself fails.
    pub(crate) fn allocate(width: u32, height: u32) -> Result<Self, RasterError> {
        let unavailable = RasterError::SurfaceUnavailable { width, height };

        if width == 0
            || height == 0
            || width > MAX_SURFACE_DIMENSION
            || height > MAX_SURFACE_DIMENSION
            || width as u64 * height as u64 > MAX_SURFACE_AREA
        {
            return Err(unavailable);
        }

        let len = width as usize * height as usize * 3;
        let mut pixels = Vec::new();
        if pixels.try_reserve_exact(len).is_err() {
            return Err(unavailable);
        }
        pixels.resize(len, 0);

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Draw `src` (native pixels of `image`) over the whole surface,
    /// resampling bilinearly when the sizes differ.
    ///
    /// Destination pixel centers are mapped back into the source rectangle;
    /// samples that land outside the source bitmap stay black.
    pub(crate) fn draw_image(&mut self, image: &DecodedImage, src: &NativeRect) {
        let step_x = src.width / self.width as f64;
        let step_y = src.height / self.height as f64;
        let row_len = self.width as usize * 3;

        for (dy, row) in self.pixels.chunks_exact_mut(row_len).enumerate() {
            let sy = src.y + (dy as f64 + 0.5) * step_y - 0.5;

            for (dx, px) in row.chunks_exact_mut(3).enumerate() {
                let sx = src.x + (dx as f64 + 0.5) * step_x - 0.5;
                if let Some(rgb) = sample_bilinear(image, sx, sy) {
                    px.copy_from_slice(&rgb);
                }
            }
        }
    }

    pub(crate) fn into_image(self) -> DecodedImage {
        DecodedImage::new(self.width, self.height, self.pixels)
    }
}

/// Sample a pixel using bilinear interpolation.
///
/// `(x, y)` is in pixel-center coordinates: pixel `i` covers
/// `[i - 0.5, i + 0.5)`. Returns `None` outside the bitmap; edge pixels are
/// clamped so the outermost row and column are still reachable.
fn sample_bilinear(image: &DecodedImage, x: f64, y: f64) -> Option<[u8; 3]> {
    let (w, h) = (image.width as f64, image.height as f64);
    if image.is_empty() || !(x >= -0.5 && x < w - 0.5 && y >= -0.5 && y < h - 0.5) {
        return None;
    }

    let xc = x.clamp(0.0, w - 1.0);
    let yc = y.clamp(0.0, h - 1.0);
    let x0 = xc.floor() as u32;
    let y0 = yc.floor() as u32;
    let x1 = (x0 + 1).min(image.width - 1);
    let y1 = (y0 + 1).min(image.height - 1);
    let fx = xc - x0 as f64;
    let fy = yc - y0 as f64;

    let p00 = image.pixel(x0, y0);
    let p10 = image.pixel(x1, y0);
    let p01 = image.pixel(x0, y1);
    let p11 = image.pixel(x1, y1);

    let mut result = [0u8; 3];
    for i in 0..3 {
        let v = p00[i] as f64 * (1.0 - fx) * (1.0 - fy)
            + p10[i] as f64 * fx * (1.0 - fy)
            + p01[i] as f64 * (1.0 - fx) * fy
            + p11[i] as f64 * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    Some(result)
}
