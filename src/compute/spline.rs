//! Uniform clamped B-spline evaluation.
//!
//! Turns an ordered list of control points into a densely sampled curve that
//! starts at the first and ends at the last control point. The degree is
//! clamped to `[1, n - 1]`, so short point lists (as seen while a road is
//! grown point by point) still produce a valid curve.

use crate::schema::Point2;

/// Evaluate the B-spline of `points` at `samples` evenly spaced parameters.
pub fn evaluate(points: &[Point2], degree: usize, samples: usize) -> Vec<Point2> {
    match points.len() {
        0 => return Vec::new(),
        1 => return vec![points[0]; samples],
        _ => {}
    }

    let count = points.len();
    let degree = degree.clamp(1, count - 1);
    let knots = clamped_knots(count, degree);
    let u_max = (count - degree) as f64;

    let mut scratch = vec![Point2::default(); degree + 1];
    (0..samples)
        .map(|i| {
            let u = if samples > 1 {
                u_max * i as f64 / (samples - 1) as f64
            } else {
                0.0
            };
            let span = find_span(count - 1, degree, u, &knots);
            scratch.copy_from_slice(&points[span - degree..=span]);
            de_boor(&mut scratch, span, degree, u, &knots);
            scratch[degree]
        })
        .collect()
}

/// Clamped uniform knot vector: `degree` leading zeros, `0..=count-degree`,
/// then `degree` trailing copies of `count - degree`.
fn clamped_knots(count: usize, degree: usize) -> Vec<f64> {
    let last = (count - degree) as f64;
    std::iter::repeat_n(0.0, degree)
        .chain((0..=count - degree).map(|k| k as f64))
        .chain(std::iter::repeat_n(last, degree))
        .collect()
}

/// Knot span index containing `u` for `n + 1` control points.
fn find_span(n: usize, p: usize, u: f64, knots: &[f64]) -> usize {
    if u >= knots[n + 1] {
        return n;
    }
    if u <= knots[p] {
        return p;
    }

    let mut low = p;
    let mut high = n + 1;
    let mut mid = (low + high) / 2;
    while u < knots[mid] || u >= knots[mid + 1] {
        if u < knots[mid] {
            high = mid;
        } else {
            low = mid;
        }
        mid = (low + high) / 2;
    }
    mid
}

/// In-place de Boor recursion; the result ends up in `d[p]`.
fn de_boor(d: &mut [Point2], span: usize, p: usize, u: f64, knots: &[f64]) {
    for r in 1..=p {
        for j in (r..=p).rev() {
            let i = span - p + j;
            let denom = knots[i + p + 1 - r] - knots[i];
            let alpha = if denom == 0.0 {
                0.0
            } else {
                (u - knots[i]) / denom
            };
            d[j] = d[j - 1].lerp(d[j], alpha);
        }
    }
}
