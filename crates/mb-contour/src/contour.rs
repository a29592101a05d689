use std::collections::HashSet;

use mb_core::{Aabb2f, Point2f};

/// One boundary edge between two cell-edge crossings.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Segment {
    pub a: Point2f,
    pub b: Point2f,
}

impl Segment {
    pub const fn new(a: Point2f, b: Point2f) -> Self {
        Self { a, b }
    }

    pub fn aabb(&self) -> Aabb2f {
        Aabb2f::from_points(self.a, self.b)
    }

    pub fn length(&self) -> f32 {
        (self.b - self.a).norm()
    }

    /// Squared distance from `p` to the closest point of the segment.
    ///
    /// Segments shorter than `1e-4` fall back to the distance to `a`.
    pub fn dist_sq(&self, p: Point2f) -> f32 {
        let ab = self.b - self.a;
        let len_sq = ab.norm_sq();
        if len_sq < 1e-8 {
            return p.dist_sq(self.a);
        }

        let t = ((p - self.a).dot(ab) / len_sq).clamp(0.0, 1.0);
        p.dist_sq(self.a + ab * t)
    }
}

/// Closed polyline. The last point repeats the first one exactly.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Contour {
    points: Vec<Point2f>,
}

impl Contour {
    /// Accepts a point sequence whose last point equals its first and which
    /// has at least three distinct vertices.
    pub fn from_closed_points(points: Vec<Point2f>) -> Option<Self> {
        if points.len() < 4 || points.first() != points.last() {
            return None;
        }

        let distinct: HashSet<(u32, u32)> = points[..points.len() - 1]
            .iter()
            .map(|p| (p.x.to_bits(), p.y.to_bits()))
            .collect();
        if distinct.len() < 3 {
            return None;
        }

        Some(Self { points })
    }

    /// All points including the closing duplicate.
    pub fn points(&self) -> &[Point2f] {
        &self.points
    }

    /// Vertices without the closing duplicate.
    pub fn vertices(&self) -> &[Point2f] {
        &self.points[..self.points.len() - 1]
    }

    pub fn num_edges(&self) -> usize {
        self.points.len() - 1
    }

    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points.windows(2).map(|w| Segment::new(w[0], w[1]))
    }

    /// Shoelace area, positive for counter-clockwise winding.
    pub fn signed_area(&self) -> f32 {
        let twice: f32 = self
            .points
            .windows(2)
            .map(|w| w[0].x * w[1].y - w[1].x * w[0].y)
            .sum();
        0.5 * twice
    }

    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    pub fn reverse(&mut self) {
        self.points.reverse();
    }
}

#[cfg(test)]
mod tests {
    use mb_core::Point2f;

    use super::{Contour, Segment};

    fn p(x: f32, y: f32) -> Point2f {
        Point2f::new(x, y)
    }

    #[test]
    fn segment_distance_projects_and_clamps() {
        let s = Segment::new(p(0.0, 0.0), p(4.0, 0.0));
        assert!((s.dist_sq(p(2.0, 3.0)) - 9.0).abs() < 1e-6);
        assert!((s.dist_sq(p(-3.0, 4.0)) - 25.0).abs() < 1e-6);
        assert!((s.dist_sq(p(7.0, 0.0)) - 9.0).abs() < 1e-6);
        assert!((s.length() - 4.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_segment_uses_point_distance() {
        let s = Segment::new(p(1.0, 1.0), p(1.0, 1.0));
        let d = s.dist_sq(p(4.0, 5.0));
        assert!(d.is_finite());
        assert!((d - 25.0).abs() < 1e-6);
    }

    #[test]
    fn closed_square_winding() {
        let mut c = Contour::from_closed_points(vec![
            p(0.0, 0.0),
            p(2.0, 0.0),
            p(2.0, 2.0),
            p(0.0, 2.0),
            p(0.0, 0.0),
        ])
        .expect("closed square");

        assert_eq!(c.num_edges(), 4);
        assert_eq!(c.vertices().len(), 4);
        assert!((c.signed_area() - 4.0).abs() < 1e-6);
        assert!(c.is_ccw());

        c.reverse();
        assert!(!c.is_ccw());
        assert_eq!(c.edges().count(), 4);
    }

    #[test]
    fn rejects_open_or_degenerate_polylines() {
        assert!(Contour::from_closed_points(vec![p(0.0, 0.0), p(1.0, 0.0), p(0.0, 0.0)]).is_none());
        assert!(
            Contour::from_closed_points(vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)])
                .is_none()
        );
        assert!(
            Contour::from_closed_points(vec![p(0.0, 0.0), p(1.0, 0.0), p(0.0, 0.0), p(0.0, 0.0)])
                .is_none()
        );
    }
}
