//! Cropo WASM - WebAssembly bindings for Cropo
//!
//! This crate exposes the cropo-core crop rasterizer to the upload page.
//! The page owns the file input, the drag handles and the upload request;
//! this crate owns the pixels.
//!
//! # Module Structure
//!
//! - `session` - `JsCropSession`: load a photo, track the selection, rasterize
//! - `types` - WASM-compatible wrapper types for crop results
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropSession } from '@cropo/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const session = new JsCropSession();
//! session.load(new Uint8Array(await file.arrayBuffer()));
//! const cropped = session.rasterize();
//! console.log(`Cropped to ${cropped.width}x${cropped.height}`);
//! ```

use wasm_bindgen::prelude::*;

mod session;
mod types;

pub use session::JsCropSession;
pub use types::JsCroppedPhoto;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
