//! Road synthesis: grow a valid control point sequence point by point.

use super::geometry::{corridor_lines, polyline_segments};
use super::retry::RetryBudget;
use super::rng::RoadRng;
use super::sampler::propose;
use super::spline;
use super::validity::{
    corridor_conflicts, full_curve_invalid, new_point_conflicts, self_intersects_centerline,
};
use crate::schema::{GeneratorConfig, Point2};

/// Fixed opening points of every synthesized road; they set the initial heading.
pub const START_POINTS: [Point2; 2] = [Point2::new(1.0, 0.0), Point2::new(65.0, 0.0)];

/// Grow a road from `START_POINTS` until it has `max_nodes` points or
/// `max_tries` consecutive proposals were rejected.
///
/// Returns `None` when the finished road is too short or fails the full
/// validity gate; callers retry the whole run.
pub fn synthesize(config: &GeneratorConfig, rng: &mut RoadRng) -> Option<Vec<Point2>> {
    let profile = &config.profile;
    let mut points = START_POINTS.to_vec();
    let mut budget = RetryBudget::new(config.max_tries);

    while points.len() < profile.max_nodes && !budget.exhausted() {
        let last = points[points.len() - 1];
        let penultimate = points[points.len() - 2];

        let accepted = propose(last, penultimate, config, rng)
            .filter(|&candidate| accepts_candidate(&points, candidate, config));

        match accepted {
            Some(candidate) => {
                points.push(candidate);
                budget.reset();
            }
            None => budget.record_failure(),
        }
    }

    finish(points, config)
}

/// Post-pass over a grown road: drop the last point if the curve crosses
/// itself, then apply the node count and full validity gate.
fn finish(mut points: Vec<Point2>, config: &GeneratorConfig) -> Option<Vec<Point2>> {
    let min_nodes = config.profile.min_nodes;

    if self_intersects_centerline(&sample(&points, config)) {
        points.pop();
    }

    let curve = sample(&points, config);
    if points.len() < min_nodes || full_curve_invalid(&curve, config.half_width()) {
        log::debug!(
            "Couldn't create enough valid nodes ({} of {})",
            points.len(),
            min_nodes
        );
        return None;
    }

    log::debug!("Synthesized road with {} control points", points.len());
    Some(points)
}

/// Incremental checks for appending `candidate` to a road under construction.
fn accepts_candidate(points: &[Point2], candidate: Point2, config: &GeneratorConfig) -> bool {
    if new_point_conflicts(points, candidate) {
        return false;
    }

    let mut tentative = Vec::with_capacity(points.len() + 1);
    tentative.extend_from_slice(points);
    tentative.push(candidate);

    let curve = sample(&tentative, config);
    if self_intersects_centerline(&curve) {
        return false;
    }
    let corridor = corridor_lines(&curve, config.half_width());
    !corridor_conflicts(&corridor, &polyline_segments(&curve))
}

fn sample(points: &[Point2], config: &GeneratorConfig) -> Vec<Point2> {
    spline::evaluate(
        points,
        config.profile.spline_degree,
        config.validation_samples,
    )
}
