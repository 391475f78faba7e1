//! Rasterizer result and error types.

use thiserror::Error;

use crate::encode::{EncodeError, JPEG_CONTENT_TYPE};
use crate::geometry::NativeRect;

/// Errors from a single rasterization attempt. None of them are retried.
#[derive(Debug, Error)]
pub enum RasterError {
    /// No photo has been loaded or rendered yet.
    #[error("No image has been loaded")]
    NotReady,

    /// The selection has no usable area.
    #[error("Crop has no area: {width}x{height}")]
    DegenerateCrop { width: f64, height: f64 },

    /// The offscreen surface could not be created.
    #[error("Cannot allocate a {width}x{height} raster surface")]
    SurfaceUnavailable { width: u32, height: u32 },

    /// The encoder returned no data.
    #[error("Encoding failed: {0}")]
    EncodeFailure(#[from] EncodeError),
}

/// An encoded crop, owned by the caller until it is handed to a store.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterizedCrop {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Source rectangle that was sampled, in native pixels.
    pub source: NativeRect,
    /// JPEG bytes.
    pub bytes: Vec<u8>,
}

impl RasterizedCrop {
    pub fn content_type(&self) -> &'static str {
        JPEG_CONTENT_TYPE
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
