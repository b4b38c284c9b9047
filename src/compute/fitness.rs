//! Fitness assignment from execution traces.
//!
//! Lower `TimeNormalizedDeviation` means the agent tracked the lane center
//! tightly and quickly, i.e. the road was easy for it.

use std::collections::HashMap;

use crate::schema::{ExecutionTrace, FitnessConfig, FitnessMetric, Individual};

/// Errors turning a trace into a fitness value.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FitnessError {
    #[error("Trace for {scenario} has zero elapsed ticks")]
    ZeroTicks { scenario: String },
}

/// Reduce a trace to a scalar fitness according to `config`.
pub fn trace_fitness(
    trace: &ExecutionTrace,
    config: &FitnessConfig,
    scenario: &str,
) -> Result<f64, FitnessError> {
    match config.metric {
        FitnessMetric::TimeNormalizedDeviation => {
            if trace.ticks == 0 {
                return Err(FitnessError::ZeroTicks {
                    scenario: scenario.to_string(),
                });
            }
            let seconds = trace.ticks as f64 / config.tick_rate;
            Ok(trace.cumulative_distance() / seconds)
        }
        FitnessMetric::MaxDeviation => Ok(trace.max_distance()),
    }
}

/// Assign each individual the fitness of its own trace, keyed by scenario id.
///
/// Individuals without a trace keep their current fitness. Returns the
/// number of individuals updated.
pub fn assign_fitness(
    population: &mut [Individual],
    traces: &HashMap<String, ExecutionTrace>,
    config: &FitnessConfig,
) -> Result<usize, FitnessError> {
    let mut assigned = 0;
    for individual in population.iter_mut() {
        let scenario = individual.scenario_id();
        let Some(trace) = traces.get(&scenario) else {
            log::debug!("No trace for scenario {scenario}");
            continue;
        };
        individual.set_fitness(trace_fitness(trace, config, &scenario)?);
        assigned += 1;
    }
    Ok(assigned)
}

/// Assign the fitness of a single aggregate trace to every individual.
pub fn assign_uniform_fitness(
    population: &mut [Individual],
    trace: &ExecutionTrace,
    config: &FitnessConfig,
) -> Result<(), FitnessError> {
    let fitness = trace_fitness(trace, config, "aggregate")?;
    for individual in population.iter_mut() {
        individual.set_fitness(fitness);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FitnessGoal, Point2};

    fn individual(id: u64) -> Individual {
        Individual::new(id, "case", vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)])
    }

    #[test]
    fn test_time_normalized_deviation() {
        let trace = ExecutionTrace::new(vec![0.5, 1.0, 1.5], 120);
        let fitness = trace_fitness(&trace, &FitnessConfig::default(), "case0").unwrap();
        // 3.0 cumulative over 2 seconds at 60 ticks/s.
        assert!((fitness - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_max_deviation() {
        let config = FitnessConfig {
            metric: FitnessMetric::MaxDeviation,
            goal: FitnessGoal::Maximize,
            ..Default::default()
        };
        let trace = ExecutionTrace::new(vec![0.5, 2.5, 1.5], 0);
        assert_eq!(trace_fitness(&trace, &config, "case0"), Ok(2.5));
    }

    #[test]
    fn test_zero_ticks_is_an_error() {
        let trace = ExecutionTrace::new(vec![1.0], 0);
        assert_eq!(
            trace_fitness(&trace, &FitnessConfig::default(), "case3"),
            Err(FitnessError::ZeroTicks {
                scenario: "case3".to_string()
            })
        );
    }

    #[test]
    fn test_assign_per_individual() {
        let mut population = vec![individual(0), individual(1), individual(2)];
        population[2].fitness = 9.0;

        let traces = HashMap::from([
            ("case0".to_string(), ExecutionTrace::new(vec![1.0; 60], 60)),
            ("case1".to_string(), ExecutionTrace::new(vec![2.0; 60], 60)),
        ]);
        let assigned = assign_fitness(&mut population, &traces, &FitnessConfig::default()).unwrap();

        assert_eq!(assigned, 2);
        assert!((population[0].fitness - 60.0).abs() < 1e-9);
        assert!((population[1].fitness - 120.0).abs() < 1e-9);
        assert_eq!(population[2].fitness, 9.0);
        assert!(population[0].evaluated && population[1].evaluated);
        assert!(!population[2].evaluated);
    }

    #[test]
    fn test_assign_uniform() {
        let mut population = vec![individual(0), individual(1)];
        let trace = ExecutionTrace::new(vec![1.0, 1.0], 60);
        assign_uniform_fitness(&mut population, &trace, &FitnessConfig::default()).unwrap();
        assert!(population.iter().all(|i| (i.fitness - 2.0).abs() < 1e-12));
        assert!(population.iter().all(|i| i.evaluated));
    }
}
