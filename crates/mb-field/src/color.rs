use mb_contour::{Contour, Segment};
use mb_core::Aabb2f;

/// Distance channel an edge contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeColor {
    R,
    G,
    B,
}

impl EdgeColor {
    pub const ALL: [EdgeColor; 3] = [EdgeColor::R, EdgeColor::G, EdgeColor::B];

    pub fn next(self) -> Self {
        match self {
            Self::R => Self::G,
            Self::G => Self::B,
            Self::B => Self::R,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::R => 0,
            Self::G => 1,
            Self::B => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColoredSegment {
    pub seg: Segment,
    pub color: EdgeColor,
    pub aabb: Aabb2f,
}

impl ColoredSegment {
    pub fn new(seg: Segment, color: EdgeColor) -> Self {
        Self {
            seg,
            color,
            aabb: seg.aabb(),
        }
    }
}

/// Reorients every contour counter-clockwise, then colors its edges
/// R, G, B, R, ... starting from the first vertex.
///
/// The cycle restarts at `R` for each contour and ignores corner angles, so
/// channel changes do not necessarily fall on geometric corners.
pub fn color_edges(contours: &mut [Contour]) -> Vec<ColoredSegment> {
    let total: usize = contours.iter().map(Contour::num_edges).sum();
    let mut out = Vec::with_capacity(total);

    for contour in contours.iter_mut() {
        if contour.signed_area() < 0.0 {
            contour.reverse();
        }

        let mut color = EdgeColor::R;
        for seg in contour.edges() {
            out.push(ColoredSegment::new(seg, color));
            color = color.next();
        }
    }

    out
}
