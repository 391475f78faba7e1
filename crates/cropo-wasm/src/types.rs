//! WASM-compatible wrapper types for crop results.
//!
//! This module provides JavaScript-friendly types that wrap the core Cropo
//! types, handling the conversion between Rust and JavaScript data.

use cropo_core::encode::JPEG_CONTENT_TYPE;
use cropo_core::RasterizedCrop;
use wasm_bindgen::prelude::*;

/// An encoded crop ready to upload.
///
/// # Memory Management
///
/// The JPEG bytes live in WASM memory. `bytes()` copies them into a
/// `Uint8Array`, which can be wrapped in a `Blob` for upload.
#[wasm_bindgen]
pub struct JsCroppedPhoto {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

#[wasm_bindgen]
impl JsCroppedPhoto {
    /// Output width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Output height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// MIME type of `bytes()`
    #[wasm_bindgen(getter)]
    pub fn content_type(&self) -> String {
        JPEG_CONTENT_TYPE.to_string()
    }

    /// Returns the JPEG bytes as Uint8Array.
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

impl From<RasterizedCrop> for JsCroppedPhoto {
    fn from(crop: RasterizedCrop) -> Self {
        Self {
            width: crop.width,
            height: crop.height,
            bytes: crop.bytes,
        }
    }
}

/// Turn a core error into a JavaScript `Error`.
pub(crate) fn js_error(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}
