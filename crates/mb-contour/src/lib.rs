//! Boundary extraction from alpha fields.
//!
//! Two stages:
//! - [`extract_segments`] runs marching squares over an alpha field and
//!   emits unordered boundary [`Segment`]s, with the checkerboard masks
//!   resolved by the cell-center average.
//! - [`stitch_contours`] links those segments into closed [`Contour`]s with a
//!   greedy least-turn walk over an endpoint hash.
//!
//! Endpoints are snapped to a quantization step so that crossings computed
//! from neighboring cells compare equal. Open walks and polylines with fewer
//! than three distinct vertices are dropped and only reported through `log`.

mod contour;
mod extract;
mod stitch;

pub use contour::{Contour, Segment};
pub use extract::{ExtractConfig, extract_segments};
pub use stitch::{StitchStats, stitch_contours, stitch_contours_with_stats};
