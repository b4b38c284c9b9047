//! Candidate control point proposals under distance and turn constraints.

use super::retry::RetryBudget;
use super::rng::RoadRng;
use crate::schema::{GeneratorConfig, Point2};

/// Smallest accepted turn angle at the last point, in degrees.
pub const MIN_TURN_DEGREES: f64 = 70.0;
/// Largest accepted turn angle at the last point, in degrees.
pub const MAX_TURN_DEGREES: f64 = 290.0;

/// Angle at `b` from ray `b -> a` to ray `b -> c`, in `[0, 360)` degrees.
///
/// A straight continuation through `b` measures 180.
pub fn turn_angle(a: Point2, b: Point2, c: Point2) -> f64 {
    let to_c = (c.y - b.y).atan2(c.x - b.x);
    let to_a = (a.y - b.y).atan2(a.x - b.x);
    let angle = (to_c - to_a).to_degrees();
    if angle < 0.0 { angle + 360.0 } else { angle }
}

/// Whether `candidate` is an acceptable next point after `penultimate, last`.
pub fn is_acceptable(
    last: Point2,
    penultimate: Point2,
    candidate: Point2,
    config: &GeneratorConfig,
) -> bool {
    let dist = last.distance(candidate);
    let angle = turn_angle(penultimate, last, candidate);
    (config.profile.min_segment_length..=config.profile.max_segment_length).contains(&dist)
        && (MIN_TURN_DEGREES..=MAX_TURN_DEGREES).contains(&angle)
}

/// Propose a new integer-grid point near `last`.
///
/// Samples uniformly inside the square of half-side `max_segment_length`
/// around `last` until a sample passes `is_acceptable` or the candidate
/// budget runs out.
pub fn propose(
    last: Point2,
    penultimate: Point2,
    config: &GeneratorConfig,
    rng: &mut RoadRng,
) -> Option<Point2> {
    let reach = config.profile.max_segment_length.floor() as i64;
    let mut budget = RetryBudget::new(config.candidate_attempts());

    while budget.try_consume() {
        let candidate = Point2::new(
            last.x + rng.offset(reach) as f64,
            last.y + rng.offset(reach) as f64,
        );
        if is_acceptable(last, penultimate, candidate, config) {
            return Some(candidate);
        }
    }

    log::debug!(
        "No acceptable point near ({}, {}) after {} attempts",
        last.x,
        last.y,
        budget.used()
    );
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Difficulty;
    use proptest::prelude::*;

    #[test]
    fn test_turn_angle() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(10.0, 0.0);
        assert!((turn_angle(a, b, Point2::new(20.0, 0.0)) - 180.0).abs() < 1e-9);
        assert!((turn_angle(a, b, Point2::new(10.0, 10.0)) - 270.0).abs() < 1e-9);
        assert!((turn_angle(a, b, Point2::new(10.0, -10.0)) - 90.0).abs() < 1e-9);
        assert!(turn_angle(a, b, Point2::new(0.0, 1.0)) > 290.0);
    }

    #[test]
    fn test_rejects_fold_back() {
        let config = GeneratorConfig::for_difficulty(Difficulty::Easy);
        let last = Point2::new(65.0, 0.0);
        let penultimate = Point2::new(1.0, 0.0);
        // Straight ahead, in range.
        assert!(is_acceptable(last, penultimate, Point2::new(105.0, 0.0), &config));
        // Back along the previous segment.
        assert!(!is_acceptable(last, penultimate, Point2::new(25.0, 1.0), &config));
        // Too short and too long.
        assert!(!is_acceptable(last, penultimate, Point2::new(75.0, 0.0), &config));
        assert!(!is_acceptable(last, penultimate, Point2::new(120.0, 0.0), &config));
    }

    #[test]
    fn test_propose_finds_point() {
        let config = GeneratorConfig::for_difficulty(Difficulty::Medium);
        let mut rng = RoadRng::new(11);
        let found = (0..20)
            .filter_map(|_| {
                propose(
                    Point2::new(65.0, 0.0),
                    Point2::new(1.0, 0.0),
                    &config,
                    &mut rng,
                )
            })
            .count();
        assert!(found > 0);
    }

    #[test]
    fn test_propose_gives_up_on_impossible_bounds() {
        let mut config = GeneratorConfig::default();
        // Nothing inside the sampling square is this far away.
        config.profile.min_segment_length = 100.0;
        config.profile.max_segment_length = 10.0;
        let mut rng = RoadRng::new(2);
        assert_eq!(
            propose(Point2::new(0.0, 0.0), Point2::new(-5.0, 0.0), &config, &mut rng),
            None
        );
    }

    proptest! {
        #[test]
        fn prop_proposals_respect_length_and_angle(
            seed in any::<u64>(),
            lx in -200i32..200, ly in -200i32..200,
            px in -200i32..200, py in -200i32..200,
            difficulty in prop_oneof![
                Just(Difficulty::Easy),
                Just(Difficulty::Medium),
                Just(Difficulty::Hard),
            ],
        ) {
            let last = Point2::new(lx as f64, ly as f64);
            let penultimate = Point2::new(px as f64, py as f64);
            prop_assume!(last != penultimate);

            let config = GeneratorConfig::for_difficulty(difficulty);
            let mut rng = RoadRng::new(seed);
            if let Some(p) = propose(last, penultimate, &config, &mut rng) {
                let dist = last.distance(p);
                let angle = turn_angle(penultimate, last, p);
                prop_assert!(dist >= config.profile.min_segment_length);
                prop_assert!(dist <= config.profile.max_segment_length);
                prop_assert!((MIN_TURN_DEGREES..=MAX_TURN_DEGREES).contains(&angle));
            }
        }
    }
}
