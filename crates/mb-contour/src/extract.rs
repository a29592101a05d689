use mb_core::{ImageView, Point2f};

use crate::contour::Segment;

/// Side of a marching-squares cell crossed by the boundary.
///
/// Corners are named with `y` growing upwards: bottom-left is the sample
/// `(x, y)`, top-right is `(x + 1, y + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellEdge {
    /// bottom-left to bottom-right
    Bottom,
    /// bottom-right to top-right
    Right,
    /// top-right to top-left
    Top,
    /// bottom-left to top-left
    Left,
}

type EdgePair = (CellEdge, CellEdge);

#[derive(Debug, Clone, Copy)]
enum CellCase {
    Empty,
    Single(EdgePair),
    /// Checkerboard masks. `joined` applies when the cell center is inside.
    Saddle {
        joined: [EdgePair; 2],
        split: [EdgePair; 2],
    },
}

use CellEdge::{Bottom, Left, Right, Top};

/// Indexed by the corner mask: bit 0 bottom-left, bit 1 bottom-right,
/// bit 2 top-right, bit 3 top-left.
static CELL_CASES: [CellCase; 16] = [
    CellCase::Empty,
    CellCase::Single((Left, Bottom)),
    CellCase::Single((Bottom, Right)),
    CellCase::Single((Left, Right)),
    CellCase::Single((Right, Top)),
    CellCase::Saddle {
        joined: [(Left, Top), (Bottom, Right)],
        split: [(Left, Bottom), (Top, Right)],
    },
    CellCase::Single((Bottom, Top)),
    CellCase::Single((Left, Top)),
    CellCase::Single((Top, Left)),
    CellCase::Single((Top, Bottom)),
    CellCase::Saddle {
        joined: [(Right, Top), (Bottom, Left)],
        split: [(Right, Bottom), (Top, Left)],
    },
    CellCase::Single((Right, Top)),
    CellCase::Single((Right, Left)),
    CellCase::Single((Bottom, Right)),
    CellCase::Single((Bottom, Left)),
    CellCase::Empty,
];

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractConfig {
    /// Samples `>= threshold` are inside.
    pub threshold: f32,
    /// Crossing points are snapped to multiples of this step.
    pub snap_eps: f32,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            snap_eps: 0.01,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct CellCorners {
    bl: f32,
    br: f32,
    tr: f32,
    tl: f32,
}

impl CellCorners {
    fn mask(&self, threshold: f32) -> usize {
        let mut m = 0;
        if self.bl >= threshold {
            m |= 1;
        }
        if self.br >= threshold {
            m |= 2;
        }
        if self.tr >= threshold {
            m |= 4;
        }
        if self.tl >= threshold {
            m |= 8;
        }
        m
    }

    fn center(&self) -> f32 {
        (self.bl + self.br + self.tr + self.tl) * 0.25
    }
}

/// Runs marching squares over `alpha` and returns unordered boundary
/// segments in pixel space.
///
/// Sample `(x, y)` sits at `(x + 0.5, y + 0.5)`, so a hard 0/1 mask yields
/// boundaries on pixel edges. Images narrower or shorter than two samples
/// have no cells and produce nothing.
pub fn extract_segments(alpha: &ImageView<'_, f32>, cfg: &ExtractConfig) -> Vec<Segment> {
    let (w, h) = (alpha.width(), alpha.height());
    let mut segments = Vec::new();
    if w < 2 || h < 2 {
        return segments;
    }

    for y in 0..h - 1 {
        let lower = alpha.row(y);
        let upper = alpha.row(y + 1);
        for x in 0..w - 1 {
            let corners = CellCorners {
                bl: lower[x],
                br: lower[x + 1],
                tr: upper[x + 1],
                tl: upper[x],
            };

            let pairs: &[EdgePair] = match &CELL_CASES[corners.mask(cfg.threshold)] {
                CellCase::Empty => continue,
                CellCase::Single(pair) => std::slice::from_ref(pair),
                CellCase::Saddle { joined, split } => {
                    if corners.center() >= cfg.threshold {
                        &joined[..]
                    } else {
                        &split[..]
                    }
                }
            };

            let origin = Point2f::new(x as f32 + 0.5, y as f32 + 0.5);
            for &(ea, eb) in pairs {
                let a = crossing_point(ea, &corners, origin, cfg.threshold).snap(cfg.snap_eps);
                let b = crossing_point(eb, &corners, origin, cfg.threshold).snap(cfg.snap_eps);
                segments.push(Segment::new(a, b));
            }
        }
    }

    segments
}

fn crossing_point(edge: CellEdge, c: &CellCorners, origin: Point2f, threshold: f32) -> Point2f {
    let ((x0, y0), (x1, y1), a0, a1) = match edge {
        CellEdge::Bottom => ((0.0, 0.0), (1.0, 0.0), c.bl, c.br),
        CellEdge::Right => ((1.0, 0.0), (1.0, 1.0), c.br, c.tr),
        CellEdge::Top => ((1.0, 1.0), (0.0, 1.0), c.tr, c.tl),
        CellEdge::Left => ((0.0, 0.0), (0.0, 1.0), c.bl, c.tl),
    };

    let t = if (a1 - a0).abs() < 1e-6 {
        0.5
    } else {
        ((threshold - a0) / (a1 - a0)).clamp(0.0, 1.0)
    };

    let p0 = Point2f::new(origin.x + x0, origin.y + y0);
    let p1 = Point2f::new(origin.x + x1, origin.y + y1);
    p0.lerp(p1, t)
}
