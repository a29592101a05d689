//! Umbrella crate for the MSDF bakery workspace.
//!
//! [`bake`] turns an alpha mask into a multi-channel signed distance field:
//! marching squares, contour stitching, cyclic edge coloring, a tiled
//! bounded-radius distance search, sign assignment and `[0, 1]` encoding.
//! The stage crates are re-exported for callers that need a single step.
//!
//! ```no_run
//! use msdf_bakery::{BakeConfig, Image, bake};
//!
//! let alpha = Image::new_fill(64, 64, 0.0f32);
//! let out = bake(&alpha.as_view(), &BakeConfig::default()).expect("valid parameters");
//! assert_eq!(out.pixels.width(), 64);
//! ```

mod bake;

pub use bake::{
    BakeConfig, BakeError, BakeOutput, SegmentSink, bake, bake_rgba8, bake_with_sink,
};
pub use mb_contour::*;
pub use mb_core::*;
pub use mb_field::*;
