//! Helpers for the interactive crop box.
//!
//! The rasterizer trusts whatever selection it is given. These helpers are
//! for the layer that produces selections: they keep the box at the
//! passport ratio, no smaller than the minimum selection, and inside the
//! rendered image.

use crate::geometry::{
    CropRegion, DisplayedImageGeometry, MIN_SELECTION_WIDTH, PASSPORT_ASPECT,
};

/// Fit `crop` to the passport aspect ratio, the minimum selection size and
/// the rendered bounds, returning a pixel crop.
///
/// Width drives the fit; height follows from the ratio. When the rendered
/// image is smaller than the minimum selection, the largest box that fits
/// is used instead.
pub fn constrain_selection(crop: &CropRegion, geometry: &DisplayedImageGeometry) -> CropRegion {
    let crop = crop.to_pixels(geometry);
    let (bound_w, bound_h) = (geometry.rendered_width(), geometry.rendered_height());

    let max_width = bound_w.min(bound_h * PASSPORT_ASPECT);
    let min_width = MIN_SELECTION_WIDTH.min(max_width);

    let requested = if crop.width.is_finite() { crop.width } else { 0.0 };
    let width = requested.clamp(min_width, max_width);
    let height = width / PASSPORT_ASPECT;

    let x = finite_or_zero(crop.x).clamp(0.0, (bound_w - width).max(0.0));
    let y = finite_or_zero(crop.y).clamp(0.0, (bound_h - height).max(0.0));

    CropRegion::pixels(x, y, width, height)
}

/// The selection a freshly loaded photo starts with.
pub fn initial_selection(geometry: &DisplayedImageGeometry) -> CropRegion {
    constrain_selection(&CropRegion::initial(), geometry)
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}
