use core::ops::{Add, Mul, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2f {
    pub x: f32,
    pub y: f32,
}

impl Point2f {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn lerp(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }

    /// Rounds both coordinates to the nearest multiple of `eps`.
    pub fn snap(self, eps: f32) -> Self {
        Self {
            x: (self.x / eps).round() * eps,
            y: (self.y / eps).round() * eps,
        }
    }

    pub fn dist_sq(self, other: Self) -> f32 {
        (self - other).norm_sq()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2f {
    pub x: f32,
    pub y: f32,
}

impl Vec2f {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y
    }

    pub fn norm_sq(self) -> f32 {
        self.dot(self)
    }

    pub fn norm(self) -> f32 {
        self.norm_sq().sqrt()
    }

    pub fn normalize(self) -> Self {
        let n = self.norm();
        if n == 0.0 {
            Self::default()
        } else {
            self * (1.0 / n)
        }
    }
}

macro_rules! componentwise {
    ($lhs:ty, $rhs:ty => $out:ident, $tr:ident::$method:ident, $op:tt) => {
        impl $tr<$rhs> for $lhs {
            type Output = $out;

            #[inline]
            fn $method(self, rhs: $rhs) -> $out {
                $out {
                    x: self.x $op rhs.x,
                    y: self.y $op rhs.y,
                }
            }
        }
    };
}

componentwise!(Point2f, Vec2f => Point2f, Add::add, +);
componentwise!(Point2f, Vec2f => Point2f, Sub::sub, -);
componentwise!(Point2f, Point2f => Vec2f, Sub::sub, -);
componentwise!(Vec2f, Vec2f => Vec2f, Add::add, +);
componentwise!(Vec2f, Vec2f => Vec2f, Sub::sub, -);

impl Mul<f32> for Vec2f {
    type Output = Vec2f;

    #[inline]
    fn mul(self, s: f32) -> Vec2f {
        Vec2f::new(self.x * s, self.y * s)
    }
}

impl Mul<Vec2f> for f32 {
    type Output = Vec2f;

    fn mul(self, rhs: Vec2f) -> Self::Output {
        rhs * self
    }
}

/// Axis-aligned bounding box with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb2f {
    pub min: Point2f,
    pub max: Point2f,
}

impl Aabb2f {
    pub fn from_points(a: Point2f, b: Point2f) -> Self {
        Self {
            min: Point2f::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2f::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Grows the box by `r` on every side.
    pub fn dilate(self, r: f32) -> Self {
        Self {
            min: Point2f::new(self.min.x - r, self.min.y - r),
            max: Point2f::new(self.max.x + r, self.max.y + r),
        }
    }

    /// Squared distance from `p` to the box, zero when `p` is inside.
    pub fn dist_sq(&self, p: Point2f) -> f32 {
        let dx = if p.x < self.min.x {
            self.min.x - p.x
        } else if p.x > self.max.x {
            p.x - self.max.x
        } else {
            0.0
        };

        let dy = if p.y < self.min.y {
            self.min.y - p.y
        } else if p.y > self.max.y {
            p.y - self.max.y
        } else {
            0.0
        };

        dx * dx + dy * dy
    }
}

#[cfg(test)]
mod tests {
    use super::{Aabb2f, Point2f, Vec2f};

    #[test]
    fn step_directions_for_turn_measurement() {
        // Two steps of a walk: straight along +x, then a quarter turn up.
        let (p0, p1, p2) = (
            Point2f::new(2.0, 1.0),
            Point2f::new(5.0, 1.0),
            Point2f::new(5.0, 3.0),
        );
        let d0 = (p1 - p0).normalize();
        let d1 = (p2 - p1).normalize();

        assert_eq!(d0, Vec2f::new(1.0, 0.0));
        assert_eq!(d1, Vec2f::new(0.0, 1.0));
        assert_eq!(d0.dot(d1), 0.0);
        assert_eq!(p0 + (p2 - p0), p2);
        assert!((p0.dist_sq(p2) - 13.0).abs() < 1e-6);

        // Repeated endpoints give no direction at all.
        assert_eq!((p1 - p1).normalize(), Vec2f::default());
    }

    #[test]
    fn snapped_lerp_lands_on_grid() {
        let a = Point2f::new(10.5, 3.5);
        let b = Point2f::new(11.5, 3.5);
        let q = a.lerp(b, 1.0 / 3.0).snap(0.01);
        assert!((q.x - 10.83).abs() < 1e-4);
        assert!((q.y - 3.5).abs() < 1e-4);
    }

    #[test]
    fn snap_rounds_to_grid() {
        let p = Point2f::new(1.234, -0.006).snap(0.01);
        assert!((p.x - 1.23).abs() < 1e-5);
        assert!((p.y + 0.01).abs() < 1e-5);

        let mid = Point2f::new(0.0, 2.0).lerp(Point2f::new(4.0, 2.0), 0.25);
        assert_eq!(mid, Point2f::new(1.0, 2.0));
    }

    #[test]
    fn aabb_distance_outside_and_inside() {
        let bb = Aabb2f::from_points(Point2f::new(4.0, 1.0), Point2f::new(1.0, 3.0));
        assert_eq!(bb.min, Point2f::new(1.0, 1.0));
        assert_eq!(bb.max, Point2f::new(4.0, 3.0));

        assert_eq!(bb.dist_sq(Point2f::new(2.0, 2.0)), 0.0);
        assert!((bb.dist_sq(Point2f::new(7.0, 7.0)) - 25.0).abs() < 1e-6);
        assert!((bb.dist_sq(Point2f::new(0.0, 2.0)) - 1.0).abs() < 1e-6);

        let grown = bb.dilate(2.0);
        assert_eq!(grown.min, Point2f::new(-1.0, -1.0));
        assert_eq!(grown.max, Point2f::new(6.0, 5.0));
    }
}
