use mb_core::Image;

use crate::color::EdgeColor;
use crate::distance::ChannelField;

/// Linear RGBA with channels in `[0, 1]`.
pub type MsdfPixel = [f32; 4];

/// Maps signed distances to `d / max_distance * 0.5 + 0.5` per channel and
/// sets alpha to `1`.
pub fn encode_rgba(field: &ChannelField, max_distance: f32) -> Image<MsdfPixel> {
    let w = field.width();
    let [r, g, b] = EdgeColor::ALL.map(|c| field.channel(c).data());
    let norm = |d: f32| d / max_distance * 0.5 + 0.5;

    Image::from_fn(w, field.height(), |x, y| {
        let i = y * w + x;
        [norm(r[i]), norm(g[i]), norm(b[i]), 1.0]
    })
}

/// Quantizes normalized pixels to 8 bits per channel.
pub fn quantize_rgba8(img: &Image<MsdfPixel>) -> Image<[u8; 4]> {
    mb_core::map_view(&img.as_view(), |px| px.map(to_u8))
}

#[inline]
fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
