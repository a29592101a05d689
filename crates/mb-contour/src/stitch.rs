use std::collections::HashMap;

use log::debug;
use mb_core::{Point2f, Vec2f};

use crate::contour::{Contour, Segment};

/// Counts reported by [`stitch_contours_with_stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StitchStats {
    pub closed: usize,
    pub open: usize,
    pub degenerate: usize,
}

/// Links unordered segments into closed contours.
///
/// Endpoints are matched by their coordinates quantized to `eps`. From each
/// endpoint the walk continues along the unused incident segment that turns
/// least relative to the previous step; ties keep the earlier segment, so the
/// result depends only on the input order. Walks that dead-end are dropped.
pub fn stitch_contours(segments: &[Segment], eps: f32) -> Vec<Contour> {
    stitch_contours_with_stats(segments, eps).0
}

pub fn stitch_contours_with_stats(segments: &[Segment], eps: f32) -> (Vec<Contour>, StitchStats) {
    let mut incident: HashMap<EndpointKey, Vec<usize>> = HashMap::with_capacity(segments.len());
    for (i, s) in segments.iter().enumerate() {
        let ka = endpoint_key(s.a, eps);
        let kb = endpoint_key(s.b, eps);
        incident.entry(ka).or_default().push(i);
        if kb != ka {
            incident.entry(kb).or_default().push(i);
        }
    }

    let mut used = vec![false; segments.len()];
    let mut contours = Vec::new();
    let mut stats = StitchStats::default();

    for first in 0..segments.len() {
        if used[first] {
            continue;
        }
        used[first] = true;

        let seed = segments[first];
        let mut points = vec![seed.a, seed.b];
        let closed = walk(seed.a, &mut points, segments, &incident, &mut used, eps);

        if !closed {
            debug!(
                "contour break at ({:.3}, {:.3}) after {} points: no next segment",
                points[points.len() - 1].x,
                points[points.len() - 1].y,
                points.len()
            );
            stats.open += 1;
            continue;
        }

        match Contour::from_closed_points(points) {
            Some(c) => {
                contours.push(c);
                stats.closed += 1;
            }
            None => stats.degenerate += 1,
        }
    }

    debug!(
        "stitched {} segments into {} contours ({} open, {} degenerate discarded)",
        segments.len(),
        stats.closed,
        stats.open,
        stats.degenerate
    );

    (contours, stats)
}

/// Extends `points` until it returns to `start`. Returns `false` on a dead end.
fn walk(
    start: Point2f,
    points: &mut Vec<Point2f>,
    segments: &[Segment],
    incident: &HashMap<EndpointKey, Vec<usize>>,
    used: &mut [bool],
    eps: f32,
) -> bool {
    let eps_sq = eps * eps;
    let mut cur = points[points.len() - 1];

    loop {
        let key = endpoint_key(cur, eps);
        let Some(candidates) = incident.get(&key) else {
            return false;
        };

        let prev_dir = (cur - points[points.len() - 2]).normalize();

        let mut best: Option<(usize, Point2f)> = None;
        let mut best_turn = f32::INFINITY;
        for &si in candidates {
            if used[si] {
                continue;
            }

            let cand = segments[si];
            let next = if endpoint_key(cand.a, eps) == key {
                cand.b
            } else if endpoint_key(cand.b, eps) == key {
                cand.a
            } else {
                continue;
            };

            let turn = turning_angle(prev_dir, (next - cur).normalize());
            if turn < best_turn {
                best_turn = turn;
                best = Some((si, next));
            }
        }

        let Some((si, next)) = best else {
            return false;
        };

        used[si] = true;
        points.push(next);
        cur = next;

        if cur.dist_sq(start) <= eps_sq {
            let last = points.len() - 1;
            points[last] = start;
            return true;
        }
    }
}

/// Endpoint coordinates in units of `eps`.
type EndpointKey = (i64, i64);

/// Quantizes an endpoint. The cast saturates, so callers keep
/// `|coord| / eps` well inside `i64`.
#[inline]
fn endpoint_key(p: Point2f, eps: f32) -> EndpointKey {
    ((p.x / eps).round() as i64, (p.y / eps).round() as i64)
}

/// Unsigned angle in radians between unit directions. A zero direction
/// counts as no turn.
#[inline]
fn turning_angle(a: Vec2f, b: Vec2f) -> f32 {
    if a == Vec2f::default() || b == Vec2f::default() {
        return 0.0;
    }
    a.dot(b).clamp(-1.0, 1.0).acos()
}
