use mb_core::{Image, Point2f};

use crate::color::{ColoredSegment, EdgeColor};
use crate::tiles::TileIndex;

/// Per-channel distances in pixels, one image per [`EdgeColor`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelField {
    channels: [Image<f32>; 3],
}

impl ChannelField {
    pub fn new_fill(width: usize, height: usize, value: f32) -> Self {
        Self {
            channels: [
                Image::new_fill(width, height, value),
                Image::new_fill(width, height, value),
                Image::new_fill(width, height, value),
            ],
        }
    }

    pub fn width(&self) -> usize {
        self.channels[0].width()
    }

    pub fn height(&self) -> usize {
        self.channels[0].height()
    }

    pub fn channel(&self, color: EdgeColor) -> &Image<f32> {
        &self.channels[color.index()]
    }

    pub fn channels_mut(&mut self) -> &mut [Image<f32>; 3] {
        &mut self.channels
    }

    /// `[r, g, b]` at pixel `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Option<[f32; 3]> {
        Some([
            *self.channels[0].get(x, y)?,
            *self.channels[1].get(x, y)?,
            *self.channels[2].get(x, y)?,
        ])
    }
}

/// Unsigned distance from every pixel center to the nearest segment of each
/// channel, capped at `max_distance`.
///
/// Candidates come from the 3x3 tile block around the pixel. A candidate is
/// skipped when its bounding box or the segment itself lies farther than
/// `max_distance`; only survivors pay for a square root. Channels without a
/// survivor keep `max_distance`.
pub fn compute_channel_field(
    width: usize,
    height: usize,
    segments: &[ColoredSegment],
    index: &TileIndex,
    max_distance: f32,
) -> ChannelField {
    let mut field = ChannelField::new_fill(width, height, max_distance);
    if segments.is_empty() {
        return field;
    }

    let max_sq = max_distance * max_distance;
    let mut best = vec![[max_distance; 3]; width];

    for y in 0..height {
        best.fill([max_distance; 3]);

        for (x, slot) in best.iter_mut().enumerate() {
            let p = Point2f::new(x as f32 + 0.5, y as f32 + 0.5);
            let (tx, ty) = index.tile_of_pixel(x, y);

            for bucket in index.neighborhood(tx, ty) {
                for &si in bucket {
                    let cs = &segments[si];
                    if cs.aabb.dist_sq(p) > max_sq {
                        continue;
                    }

                    let d_sq = cs.seg.dist_sq(p);
                    if d_sq > max_sq {
                        continue;
                    }

                    let d = d_sq.sqrt();
                    let c = cs.color.index();
                    if d < slot[c] {
                        slot[c] = d;
                    }
                }
            }
        }

        for (c, img) in field.channels.iter_mut().enumerate() {
            for (dst, b) in img.row_mut(y).iter_mut().zip(&best) {
                *dst = b[c];
            }
        }
    }

    field
}

#[cfg(test)]
mod tests {
    use mb_contour::Segment;
    use mb_core::Point2f;

    use super::compute_channel_field;
    use crate::color::{ColoredSegment, EdgeColor};
    use crate::tiles::TileIndex;

    fn seg(x0: f32, y0: f32, x1: f32, y1: f32, color: EdgeColor) -> ColoredSegment {
        ColoredSegment::new(
            Segment::new(Point2f::new(x0, y0), Point2f::new(x1, y1)),
            color,
        )
    }

    fn brute_force(segs: &[ColoredSegment], p: Point2f, color: EdgeColor, max_d: f32) -> f32 {
        segs.iter()
            .filter(|s| s.color == color)
            .map(|s| s.seg.dist_sq(p).sqrt())
            .fold(max_d, f32::min)
    }

    #[test]
    fn empty_segments_are_far_everywhere() {
        let idx = TileIndex::build(8, 8, 4, &[], 4.0).expect("valid index");
        let f = compute_channel_field(8, 8, &[], &idx, 4.0);
        for c in EdgeColor::ALL {
            assert!(f.channel(c).data().iter().all(|&v| v == 4.0));
        }
    }

    #[test]
    fn channels_track_their_own_segments() {
        let segs = [
            seg(0.0, 4.0, 16.0, 4.0, EdgeColor::R),
            seg(8.0, 0.0, 8.0, 16.0, EdgeColor::G),
        ];
        let idx = TileIndex::build(16, 16, 4, &segs, 3.0).expect("valid index");
        let f = compute_channel_field(16, 16, &segs, &idx, 3.0);

        let [r, g, b] = f.get(8, 5).expect("in bounds");
        assert!((r - 1.5).abs() < 1e-5);
        assert!((g - 0.5).abs() < 1e-5);
        assert_eq!(b, 3.0);

        // Beyond the radius the value saturates.
        let [r, _, _] = f.get(0, 12).expect("in bounds");
        assert_eq!(r, 3.0);
    }

    #[test]
    fn degenerate_segment_is_finite() {
        let segs = [seg(5.0, 5.0, 5.0, 5.0, EdgeColor::B)];
        let idx = TileIndex::build(10, 10, 4, &segs, 4.0).expect("valid index");
        let f = compute_channel_field(10, 10, &segs, &idx, 4.0);

        assert!(f.channel(EdgeColor::B).data().iter().all(|v| v.is_finite()));
        let [_, _, b] = f.get(5, 5).expect("in bounds");
        assert!((b - 0.5f32.hypot(0.5)).abs() < 1e-5);
    }

    #[test]
    fn matches_brute_force_across_tile_borders() {
        let segs = [
            seg(3.2, 7.9, 12.7, 9.1, EdgeColor::R),
            seg(12.7, 9.1, 15.5, 20.3, EdgeColor::G),
            seg(15.5, 20.3, 4.1, 22.2, EdgeColor::B),
            seg(4.1, 22.2, 3.2, 7.9, EdgeColor::R),
            seg(25.0, 2.0, 29.0, 30.0, EdgeColor::G),
        ];
        let (w, h, max_d) = (32, 32, 5.0);
        let idx = TileIndex::build(w, h, 5, &segs, max_d).expect("valid index");
        let f = compute_channel_field(w, h, &segs, &idx, max_d);

        for y in 0..h {
            for x in 0..w {
                let p = Point2f::new(x as f32 + 0.5, y as f32 + 0.5);
                let got = f.get(x, y).expect("in bounds");
                for c in EdgeColor::ALL {
                    let want = brute_force(&segs, p, c, max_d);
                    assert!(
                        (got[c.index()] - want).abs() < 1e-4,
                        "pixel ({x}, {y}) channel {c:?}: {} vs {want}",
                        got[c.index()]
                    );
                    assert!(got[c.index()] <= max_d);
                }
            }
        }
    }
}
