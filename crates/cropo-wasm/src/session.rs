//! Crop session WASM bindings.
//!
//! The page keeps one `JsCropSession` per upload screen: it loads the picked
//! file, tracks the selection as the user drags it, and rasterizes on
//! "Crop & Upload". Uploading the resulting bytes is left to the page.
//!
//! # Example
//!
//! ```typescript
//! import { JsCropSession } from '@cropo/wasm';
//!
//! const session = new JsCropSession();
//! session.load(new Uint8Array(await file.arrayBuffer()));
//! session.set_rendered_size(img.width, img.height);
//! session.set_crop({ unit: 'px', x: 10, y: 10, width: 140, height: 180 });
//!
//! const cropped = session.rasterize();
//! const blob = new Blob([cropped.bytes()], { type: cropped.content_type });
//! ```

use cropo_core::{
    initial_selection, CropRegion, CropSession, DisplayedImage, RasterError, SourceError,
};
use wasm_bindgen::prelude::*;

use crate::types::{js_error, JsCroppedPhoto};

/// One photo being cropped.
#[wasm_bindgen]
#[derive(Default)]
pub struct JsCropSession {
    inner: CropSession,
}

#[wasm_bindgen]
impl JsCropSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsCropSession {
        JsCropSession::default()
    }

    /// Decode the picked file and lay it out in the standard crop box.
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.load_bytes(bytes).map_err(js_error)
    }

    /// Record the size the `<img>` is actually rendered at.
    pub fn set_rendered_size(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.inner
            .set_rendered_size(width, height)
            .map_err(js_error)
    }

    /// Forget the photo ("Load Another Photo").
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    #[wasm_bindgen(getter)]
    pub fn is_ready(&self) -> bool {
        self.inner.is_ready()
    }

    #[wasm_bindgen(getter)]
    pub fn natural_width(&self) -> Option<u32> {
        self.inner.image().map(|i| i.image().width)
    }

    #[wasm_bindgen(getter)]
    pub fn natural_height(&self) -> Option<u32> {
        self.inner.image().map(|i| i.image().height)
    }

    #[wasm_bindgen(getter)]
    pub fn rendered_width(&self) -> Option<f64> {
        self.inner.image().map(|i| i.geometry().rendered_width())
    }

    #[wasm_bindgen(getter)]
    pub fn rendered_height(&self) -> Option<f64> {
        self.inner.image().map(|i| i.geometry().rendered_height())
    }

    /// Current selection as `{ unit, x, y, width, height }`.
    pub fn crop(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.crop()).map_err(js_error)
    }

    /// Replace the selection; it is fitted to the passport box when a photo
    /// is loaded.
    pub fn set_crop(&mut self, crop: JsValue) -> Result<(), JsValue> {
        let crop: CropRegion = serde_wasm_bindgen::from_value(crop).map_err(js_error)?;
        self.inner.set_crop(crop);
        Ok(())
    }

    /// Put the selection back where a fresh photo starts.
    pub fn reset_crop(&mut self) {
        self.reset_selection();
    }

    /// Rasterize the current selection into a JPEG.
    pub fn rasterize(&self) -> Result<JsCroppedPhoto, JsValue> {
        self.rasterize_selection().map_err(|e| {
            web_sys::console::warn_1(&JsValue::from_str(&format!("cropo: {e}")));
            js_error(e)
        })
    }
}

impl JsCropSession {
    fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), SourceError> {
        let image = DisplayedImage::from_file_bytes(bytes)?;
        self.inner.load(image);
        self.reset_selection();
        Ok(())
    }

    fn reset_selection(&mut self) {
        let crop = match self.inner.image() {
            Some(image) => initial_selection(image.geometry()),
            None => CropRegion::initial(),
        };
        self.inner.set_crop(crop);
    }

    fn rasterize_selection(&self) -> Result<JsCroppedPhoto, RasterError> {
        self.inner.rasterize().map(JsCroppedPhoto::from)
    }
}
