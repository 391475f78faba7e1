//! JPEG encoding for cropped photos.
//!
//! Cropped passport photos are always encoded at the same quality; callers
//! cannot tune it.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

use crate::decode::DecodedImage;

/// JPEG quality used for every cropped photo (matches the browser default
/// for `image/jpeg` canvas blobs).
pub const PHOTO_JPEG_QUALITY: u8 = 92;

/// Content type of encoded photos.
pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";

/// Why a cropped photo could not be turned into a JPEG.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("RGB buffer holds {actual} bytes but a {expected}-byte frame was expected")]
    InvalidPixelData { expected: usize, actual: usize },

    #[error("Cannot encode a {width}x{height} photo")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),

    /// The encoder finished without producing any bytes
    #[error("JPEG encoder returned no data")]
    Empty,

    /// The encoding task stopped before producing a result
    #[error("Encoding task aborted: {0}")]
    Aborted(String),
}

/// Encode an RGB image to JPEG bytes at [`PHOTO_JPEG_QUALITY`].
///
/// # Example
///
/// ```
/// use cropo_core::decode::DecodedImage;
/// use cropo_core::encode::encode_jpeg;
///
/// let image = DecodedImage::new(140, 180, vec![128u8; 140 * 180 * 3]);
/// let jpeg = encode_jpeg(&image).unwrap();
///
/// // Verify JPEG magic bytes
/// assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
/// ```
pub fn encode_jpeg(image: &DecodedImage) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (image.width, image.height);
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 3;
    if image.pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: image.pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, PHOTO_JPEG_QUALITY)
        .write_image(&image.pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    let bytes = buffer.into_inner();
    if bytes.is_empty() {
        return Err(EncodeError::Empty);
    }
    Ok(bytes)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
