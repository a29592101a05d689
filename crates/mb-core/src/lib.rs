//! Foundational primitives for MSDF baking.
//!
//! ## Image Views and Stride
//! Images use element stride (not byte stride). `stride` is the distance, in
//! elements, between adjacent row starts and may be greater than `width`.
//! Views can therefore borrow padded buffers handed over by image decoders.
//!
//! ## Coordinate Frame
//! Geometry lives in continuous pixel space: pixel `(x, y)` covers
//! `[x, x + 1) x [y, y + 1)` and its sample sits at the pixel center
//! `(x + 0.5, y + 0.5)`. The `y` axis follows buffer row order. Winding
//! ("counter-clockwise") means positive signed area in this frame.

mod alpha;
mod error;
mod geom;
mod image;

pub use alpha::{AlphaField, alpha_from_f32, alpha_from_luma8, alpha_from_rgba8};
pub use error::Error;
pub use geom::{Aabb2f, Point2f, Vec2f};
pub use image::{Image, ImageView, map_view};
