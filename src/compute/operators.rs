//! Genetic operators over road individuals.
//!
//! Mutation and crossover only ever accept results that pass the full
//! validity gate, so a population seeded with valid roads stays valid.

use super::retry::RetryBudget;
use super::rng::RoadRng;
use super::sampler::propose;
use super::synthesis::synthesize;
use super::validity::road_is_valid;
use crate::schema::{ControlPoint, FitnessGoal, GeneratorConfig, Individual};

/// Per-point probability that mutation tries to replace a control point.
pub const MUTATION_PROBABILITY: f64 = 0.25;
/// Per-cut probability that crossover tries a recombination.
pub const CROSSOVER_PROBABILITY: f64 = 0.25;

/// Replace control points from index 2 onward with fresh proposals.
///
/// Each point is picked with `MUTATION_PROBABILITY`; a picked point is kept
/// when no valid replacement is found within the mutation budget. Fitness
/// is reset to the unassigned value.
pub fn mutate(
    mut individual: Individual,
    config: &GeneratorConfig,
    rng: &mut RoadRng,
) -> Individual {
    let mut positions = individual.positions();
    let mut replaced = 0;

    for index in 2..positions.len() {
        if !rng.chance(MUTATION_PROBABILITY) {
            continue;
        }

        let mut budget = RetryBudget::new(config.mutation_attempts());
        while budget.try_consume() {
            let Some(candidate) = propose(positions[index - 1], positions[index - 2], config, rng)
            else {
                continue;
            };

            let previous = std::mem::replace(&mut positions[index], candidate);
            if road_is_valid(&positions, config) {
                let width = individual.control_points[index].width;
                individual.control_points[index] = ControlPoint {
                    width,
                    ..ControlPoint::from(candidate)
                };
                replaced += 1;
                break;
            }
            positions[index] = previous;
        }
    }

    log::debug!("Mutated individual {}: {} points replaced", individual.id, replaced);
    individual.reset_fitness();
    individual
}

/// Single-point crossover at `cut`.
///
/// The first child takes `a` up to and including `cut` followed by the rest
/// of `b`; the second child is the mirror. Children keep their first
/// parent's identity. `cut` is clamped to the shorter parent. No validity
/// check is done here.
pub fn recombine(a: &Individual, b: &Individual, cut: usize) -> (Individual, Individual) {
    let cut = cut.min(a.len().min(b.len()).saturating_sub(1));

    let splice = |head: &Individual, tail: &Individual| -> Individual {
        let mut child = head.clone();
        child.control_points = head.control_points[..=cut]
            .iter()
            .chain(tail.control_points.iter().skip(cut + 1))
            .copied()
            .collect();
        child
    };

    (splice(a, b), splice(b, a))
}

/// Search cut positions for a recombination whose children are both valid.
///
/// Sweeps cuts `1..min(len)` up to `crossover_sweeps` times, trying each cut
/// with `CROSSOVER_PROBABILITY`. Returns copies of the parents unchanged
/// when nothing valid turns up.
pub fn crossover(
    a: &Individual,
    b: &Individual,
    config: &GeneratorConfig,
    rng: &mut RoadRng,
) -> (Individual, Individual) {
    let smaller = a.len().min(b.len());

    if smaller > 1 {
        let mut sweeps = RetryBudget::new(config.crossover_sweeps());
        while sweeps.try_consume() {
            for cut in 1..smaller {
                if !rng.chance(CROSSOVER_PROBABILITY) {
                    continue;
                }
                let (child_a, child_b) = recombine(a, b, cut);
                if road_is_valid(&child_a.positions(), config)
                    && road_is_valid(&child_b.positions(), config)
                {
                    log::debug!(
                        "Crossover of {} and {} at cut {} after {} sweeps",
                        a.id,
                        b.id,
                        cut,
                        sweeps.used()
                    );
                    return (child_a, child_b);
                }
            }
        }
    }

    log::debug!("No valid crossover of {} and {}, keeping parents", a.id, b.id);
    (a.clone(), b.clone())
}

/// Sort by fitness toward `goal` and keep the first `count` individuals.
///
/// Evaluated individuals always rank ahead of unevaluated ones, whose
/// placeholder fitness carries no information.
pub fn select_elites(
    population: &[Individual],
    count: usize,
    goal: FitnessGoal,
) -> Vec<Individual> {
    let mut sorted = population.to_vec();
    sorted.sort_by(|x, y| {
        y.evaluated
            .cmp(&x.evaluated)
            .then_with(|| match goal {
                FitnessGoal::Minimize => x.fitness.total_cmp(&y.fitness),
                FitnessGoal::Maximize => y.fitness.total_cmp(&x.fitness),
            })
    });
    sorted.truncate(count);
    sorted
}

/// Synthesize one fresh individual, retrying until synthesis succeeds.
///
/// There is no upper bound on retries: configurations that can never yield
/// a valid road spin here.
pub fn newcomer(
    id: u64,
    file_name: &str,
    config: &GeneratorConfig,
    rng: &mut RoadRng,
) -> Individual {
    let mut attempts = 0usize;
    loop {
        attempts += 1;
        if let Some(points) = synthesize(config, rng) {
            log::debug!("Synthesized individual {id} after {attempts} attempts");
            return Individual::new(id, file_name, points);
        }
    }
}

/// Append a freshly synthesized, width-annotated individual.
pub fn inject_newcomer(
    population: &mut Vec<Individual>,
    id: u64,
    file_name: &str,
    config: &GeneratorConfig,
    rng: &mut RoadRng,
) {
    let mut individual = newcomer(id, file_name, config, rng);
    individual.annotate_width(config.profile.width);
    population.push(individual);
}
