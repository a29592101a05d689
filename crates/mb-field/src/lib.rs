//! Multi-channel distance fields from closed contours.
//!
//! Stages, in pipeline order:
//! - [`color_edges`]: counter-clockwise winding, cyclic R/G/B edge colors.
//! - [`TileIndex`]: uniform grid of radius-dilated segment buckets.
//! - [`compute_channel_field`]: bounded nearest-edge distance per channel.
//! - [`apply_sign`]: negative inside (`alpha >= threshold`), positive outside.
//! - [`encode_rgba`]: `[0, 1]` normalization with constant alpha.
//!
//! All distances are in pixels and measured from pixel centers.

mod color;
mod distance;
mod encode;
mod sign;
mod tiles;

pub use color::{ColoredSegment, EdgeColor, color_edges};
pub use distance::{ChannelField, compute_channel_field};
pub use encode::{MsdfPixel, encode_rgba, quantize_rgba8};
pub use sign::apply_sign;
pub use tiles::TileIndex;
