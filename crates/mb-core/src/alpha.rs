//! Normalized opacity sampling.
//!
//! Every sampler returns an [`AlphaField`]: a contiguous `f32` image with
//! values in `[0, 1]`, one per source pixel, in the source row order.

use crate::image::{Image, ImageView, map_view};

/// Dense per-pixel opacity in `[0, 1]`.
pub type AlphaField = Image<f32>;

/// Reads the alpha byte of RGBA8 pixels.
pub fn alpha_from_rgba8(img: &ImageView<'_, [u8; 4]>) -> AlphaField {
    map_view(img, |px| f32::from(px[3]) / 255.0)
}

/// Treats 8-bit luminance as opacity.
pub fn alpha_from_luma8(img: &ImageView<'_, u8>) -> AlphaField {
    map_view(img, |&v| f32::from(v) / 255.0)
}

/// Copies float opacity, clamping into `[0, 1]`. NaN maps to `0`.
pub fn alpha_from_f32(img: &ImageView<'_, f32>) -> AlphaField {
    map_view(img, |&v| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) })
}
