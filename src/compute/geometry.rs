//! Planar segment geometry and road corridor construction.

use crate::schema::Point2;

/// Length of the terminal corridor cap as a multiple of the road width.
pub const CAP_WIDTH_FACTOR: f64 = 2.0;

/// A straight line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
}

impl Segment {
    pub const fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// True if the two segments share at least one point.
    ///
    /// Zero-length segments never intersect anything.
    pub fn intersects(&self, other: &Segment) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }

        let d1 = orientation(other.start, other.end, self.start);
        let d2 = orientation(other.start, other.end, self.end);
        let d3 = orientation(self.start, self.end, other.start);
        let d4 = orientation(self.start, self.end, other.end);

        if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
            && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
        {
            return true;
        }

        (d1 == 0.0 && on_segment(other, self.start))
            || (d2 == 0.0 && on_segment(other, self.end))
            || (d3 == 0.0 && on_segment(self, other.start))
            || (d4 == 0.0 && on_segment(self, other.end))
    }
}

/// Signed area of the triangle `a, b, c` (twice over).
#[inline]
fn orientation(a: Point2, b: Point2, c: Point2) -> f64 {
    (b - a).cross(c - a)
}

/// Whether collinear point `p` lies within the bounding box of `seg`.
#[inline]
fn on_segment(seg: &Segment, p: Point2) -> bool {
    p.x >= seg.start.x.min(seg.end.x)
        && p.x <= seg.start.x.max(seg.end.x)
        && p.y >= seg.start.y.min(seg.end.y)
        && p.y <= seg.start.y.max(seg.end.y)
}

/// Consecutive point pairs of a polyline as segments.
pub fn polyline_segments(points: &[Point2]) -> Vec<Segment> {
    points
        .windows(2)
        .map(|w| Segment::new(w[0], w[1]))
        .collect()
}

/// Rotate `p` by a quarter turn about `pivot`, counter-clockwise when `ccw`.
#[inline]
fn quarter_turn(p: Point2, pivot: Point2, ccw: bool) -> Point2 {
    let v = p - pivot;
    let r = if ccw {
        Point2::new(-v.y, v.x)
    } else {
        Point2::new(v.y, -v.x)
    };
    pivot + r
}

/// Rescale the segment `pivot -> p` to `target` length, keeping `pivot`.
/// Zero-length inputs stay at `pivot`.
#[inline]
fn rescale_from(pivot: Point2, p: Point2, target: f64) -> Point2 {
    let length = pivot.distance(p);
    let factor = if length == 0.0 { 0.0 } else { target / length };
    pivot + (p - pivot) * factor
}

/// Cross-corridor boundary lines of a sampled centerline.
///
/// Each centerline segment contributes one line through its start point,
/// perpendicular to it and spanning `half_width` to each side. The final
/// segment adds a cap through its end point spanning
/// `CAP_WIDTH_FACTOR * 2 * half_width`. The result therefore has one line
/// per segment plus the cap; an input with fewer than two points has none.
pub fn corridor_lines(curve: &[Point2], half_width: f64) -> Vec<Segment> {
    let segments = polyline_segments(curve);
    let mut lines = Vec::with_capacity(segments.len() + 1);

    for seg in &segments {
        let left = rescale_from(seg.start, quarter_turn(seg.end, seg.start, true), half_width);
        let right = rescale_from(seg.start, quarter_turn(seg.end, seg.start, false), half_width);
        lines.push(Segment::new(left, right));
    }

    if let Some(last) = segments.last() {
        let cap_half = CAP_WIDTH_FACTOR * half_width;
        let right = rescale_from(last.end, quarter_turn(last.start, last.end, false), cap_half);
        let left = rescale_from(last.end, quarter_turn(last.start, last.end, true), cap_half);
        lines.push(Segment::new(right, left));
    }

    lines
}
