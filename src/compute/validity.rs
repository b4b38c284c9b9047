//! Road validity predicates.
//!
//! A road is invalid when its sampled centerline crosses itself, or when its
//! drivable corridor overlaps itself even though the centerline does not.
//! Corridor lines are indexed by the curve vertex they sit on: line `k`
//! touches centerline segments `k - 1` and `k` by construction, so only other
//! segments count as conflicts.

use super::geometry::{Segment, corridor_lines, polyline_segments};
use super::spline;
use crate::schema::{GeneratorConfig, Point2};

/// True if any two non-adjacent segments of the sampled curve intersect.
pub fn self_intersects_centerline(curve: &[Point2]) -> bool {
    let segments = polyline_segments(curve);
    segments.iter().enumerate().any(|(i, a)| {
        segments
            .iter()
            .skip(i + 2)
            .any(|b| a.intersects(b))
    })
}

/// True if the segment from the last existing point to `candidate` crosses
/// any earlier segment of `existing`.
pub fn new_point_conflicts(existing: &[Point2], candidate: Point2) -> bool {
    let Some((&last, earlier)) = existing.split_last() else {
        return false;
    };
    let new_segment = Segment::new(last, candidate);
    polyline_segments(earlier)
        .iter()
        .any(|seg| new_segment.intersects(seg))
}

/// True if a corridor line crosses a non-adjacent centerline segment or any
/// other corridor line. Zero-length corridor lines never conflict.
pub fn corridor_conflicts(corridor: &[Segment], centerline: &[Segment]) -> bool {
    for (k, line) in corridor.iter().enumerate() {
        if line.is_degenerate() {
            continue;
        }

        let crosses_centerline = centerline
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != k && j + 1 != k)
            .any(|(_, seg)| line.intersects(seg));
        if crosses_centerline {
            return true;
        }

        if corridor.iter().skip(k + 1).any(|other| line.intersects(other)) {
            return true;
        }
    }
    false
}

/// Final gate for an assembled road: centerline or corridor overlap.
pub fn full_curve_invalid(curve: &[Point2], half_width: f64) -> bool {
    if self_intersects_centerline(curve) {
        return true;
    }
    let centerline = polyline_segments(curve);
    let corridor = corridor_lines(curve, half_width);
    corridor_conflicts(&corridor, &centerline)
}

/// Sample `points` as configured and run the full validity gate.
pub fn road_is_valid(points: &[Point2], config: &GeneratorConfig) -> bool {
    let curve = spline::evaluate(
        points,
        config.profile.spline_degree,
        config.validation_samples,
    );
    !full_curve_invalid(&curve, config.half_width())
}
