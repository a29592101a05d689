use log::trace;
use mb_core::Error;

use crate::color::ColoredSegment;

/// Uniform grid of segment buckets over the image.
///
/// A segment is listed in every tile touched by its bounding box dilated by
/// the search radius, so any segment within the radius of a point is listed
/// in the point's own tile. Queries still scan the 3x3 block around it.
#[derive(Debug, Clone)]
pub struct TileIndex {
    tile_size: usize,
    tiles_x: usize,
    tiles_y: usize,
    tiles: Vec<Vec<usize>>,
}

impl TileIndex {
    /// Bins `segments` for queries of radius `max_distance`.
    ///
    /// Fails when the image is empty, when `max_distance` is not finite and
    /// positive, or when `tile_size < max_distance`.
    pub fn build(
        width: usize,
        height: usize,
        tile_size: usize,
        segments: &[ColoredSegment],
        max_distance: f32,
    ) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage);
        }
        if !max_distance.is_finite() || max_distance <= 0.0 {
            return Err(Error::InvalidRadius(max_distance));
        }
        if tile_size == 0 || (tile_size as f32) < max_distance {
            return Err(Error::InvalidTileSize {
                tile_size,
                max_distance,
            });
        }

        let tiles_x = width.div_ceil(tile_size);
        let tiles_y = height.div_ceil(tile_size);
        let mut tiles = vec![Vec::new(); tiles_x * tiles_y];

        let ts = tile_size as f32;
        for (i, cs) in segments.iter().enumerate() {
            let bb = cs.aabb.dilate(max_distance);
            let tx0 = clamp_tile(bb.min.x / ts, tiles_x);
            let tx1 = clamp_tile(bb.max.x / ts, tiles_x);
            let ty0 = clamp_tile(bb.min.y / ts, tiles_y);
            let ty1 = clamp_tile(bb.max.y / ts, tiles_y);

            for ty in ty0..=ty1 {
                for tx in tx0..=tx1 {
                    tiles[ty * tiles_x + tx].push(i);
                }
            }
        }

        trace!(
            "tile index {}x{} (size {}): {} entries, busiest tile {}",
            tiles_x,
            tiles_y,
            tile_size,
            tiles.iter().map(Vec::len).sum::<usize>(),
            tiles.iter().map(Vec::len).max().unwrap_or(0)
        );

        Ok(Self {
            tile_size,
            tiles_x,
            tiles_y,
            tiles,
        })
    }

    pub fn tiles_x(&self) -> usize {
        self.tiles_x
    }

    pub fn tiles_y(&self) -> usize {
        self.tiles_y
    }

    pub fn tile_of_pixel(&self, x: usize, y: usize) -> (usize, usize) {
        (
            (x / self.tile_size).min(self.tiles_x - 1),
            (y / self.tile_size).min(self.tiles_y - 1),
        )
    }

    /// Segment indices registered in tile `(tx, ty)`.
    pub fn tile(&self, tx: usize, ty: usize) -> &[usize] {
        &self.tiles[ty * self.tiles_x + tx]
    }

    /// Buckets of the 3x3 block centered on `(tx, ty)`, skipping tiles
    /// outside the grid.
    pub fn neighborhood(&self, tx: usize, ty: usize) -> impl Iterator<Item = &[usize]> + '_ {
        let xs = tx.saturating_sub(1)..=(tx + 1).min(self.tiles_x - 1);
        let ys = ty.saturating_sub(1)..=(ty + 1).min(self.tiles_y - 1);
        ys.flat_map(move |ny| xs.clone().map(move |nx| self.tile(nx, ny)))
    }
}

#[inline]
fn clamp_tile(t: f32, count: usize) -> usize {
    let t = t.floor();
    if t <= 0.0 {
        0
    } else {
        (t as usize).min(count - 1)
    }
}

#[cfg(test)]
mod tests {
    use mb_contour::Segment;
    use mb_core::{Error, Point2f};

    use super::TileIndex;
    use crate::color::{ColoredSegment, EdgeColor};

    fn seg(x0: f32, y0: f32, x1: f32, y1: f32) -> ColoredSegment {
        ColoredSegment::new(
            Segment::new(Point2f::new(x0, y0), Point2f::new(x1, y1)),
            EdgeColor::R,
        )
    }

    #[test]
    fn tile_counts_round_up() {
        let idx = TileIndex::build(33, 16, 8, &[], 4.0).expect("valid index");
        assert_eq!(idx.tiles_x(), 5);
        assert_eq!(idx.tiles_y(), 2);
        assert_eq!(idx.tile_of_pixel(32, 15), (4, 1));
    }

    #[test]
    fn rejects_tile_smaller_than_radius() {
        let err = TileIndex::build(64, 64, 8, &[], 8.5).expect_err("tile too small");
        assert_eq!(
            err,
            Error::InvalidTileSize {
                tile_size: 8,
                max_distance: 8.5
            }
        );
        assert!(TileIndex::build(64, 64, 0, &[], 1.0).is_err());
        assert!(TileIndex::build(64, 64, 8, &[], 0.0).is_err());
        assert!(TileIndex::build(64, 64, 8, &[], f32::NAN).is_err());
        assert_eq!(
            TileIndex::build(0, 64, 8, &[], 4.0).expect_err("empty"),
            Error::EmptyImage
        );
        assert!(TileIndex::build(64, 64, 8, &[], 8.0).is_ok());
    }

    #[test]
    fn dilation_spreads_into_neighbors_and_clamps() {
        let segs = [seg(9.0, 9.0, 10.0, 9.0), seg(-3.0, -3.0, -2.0, -2.0)];
        let idx = TileIndex::build(32, 32, 8, &segs, 4.0).expect("valid index");

        // Dilated box of the first segment is [5, 14] x [5, 13].
        for ty in 0..4 {
            for tx in 0..4 {
                let has = idx.tile(tx, ty).contains(&0);
                assert_eq!(has, tx <= 1 && ty <= 1, "tile ({tx}, {ty})");
            }
        }

        // The off-image segment lands in the corner tile only.
        assert!(idx.tile(0, 0).contains(&1));
        assert!(!idx.tile(1, 0).contains(&1));
    }

    #[test]
    fn membership_grows_with_radius() {
        let segs = [seg(20.0, 20.0, 21.0, 22.0)];
        let small = TileIndex::build(64, 64, 16, &segs, 2.0).expect("valid index");
        let large = TileIndex::build(64, 64, 16, &segs, 12.0).expect("valid index");

        for ty in 0..4 {
            for tx in 0..4 {
                if small.tile(tx, ty).contains(&0) {
                    assert!(large.tile(tx, ty).contains(&0));
                }
            }
        }
        assert!(large.tile(0, 0).contains(&0));
        assert!(!small.tile(0, 0).contains(&0));
    }

    #[test]
    fn neighborhood_skips_out_of_range() {
        let idx = TileIndex::build(24, 24, 8, &[], 2.0).expect("valid index");
        assert_eq!(idx.neighborhood(0, 0).count(), 4);
        assert_eq!(idx.neighborhood(1, 1).count(), 9);
        assert_eq!(idx.neighborhood(2, 1).count(), 6);
    }
}
