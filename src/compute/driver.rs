//! Generation driver: the evolutionary loop over a population of roads.

use std::collections::HashMap;

use serde::Serialize;

use super::fitness::{FitnessError, assign_fitness, assign_uniform_fitness};
use super::operators::{crossover, inject_newcomer, mutate, newcomer, select_elites};
use super::rng::RoadRng;
use crate::scenario::{
    ClientError, ExecutionClient, ExportError, Scenario, ScenarioExporter, Visualizer,
};
use crate::schema::{ConfigError, EvolutionConfig, ExecutionTrace, FitnessGoal, Individual};

/// Lifecycle of the driver's population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DriverPhase {
    /// No population yet.
    Empty,
    /// Initial population synthesized, no generation completed.
    Seeded,
    /// At least one generation completed.
    Steady,
}

/// Errors surfaced to the caller of the driver.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
    #[error("Execution client failed: {0}")]
    Client(#[from] ClientError),
    #[error("Fitness assignment failed: {0}")]
    Fitness(#[from] FitnessError),
}

/// Summary of one completed generation.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub generation: usize,
    /// Population size after growth, before elite selection.
    pub population_size: usize,
    pub exported: Vec<String>,
    pub failed: Vec<String>,
    /// Individuals whose fitness came from the attached client.
    pub evaluated: usize,
    /// Best and mean over evaluated individuals only; `None` when none were.
    pub best_fitness: Option<f64>,
    pub mean_fitness: Option<f64>,
    /// Ids of the elites carried into the next generation.
    pub elites: Vec<u64>,
}

/// Owns the population and advances it one generation per `step`.
pub struct GenerationDriver {
    config: EvolutionConfig,
    rng: RoadRng,
    population: Vec<Individual>,
    phase: DriverPhase,
    generation: usize,
    next_id: u64,
    exporter: Box<dyn ScenarioExporter>,
    visualizer: Option<Box<dyn Visualizer>>,
    client: Option<Box<dyn ExecutionClient>>,
}

impl GenerationDriver {
    /// Create a driver exporting through `exporter`.
    pub fn new(
        config: EvolutionConfig,
        exporter: Box<dyn ScenarioExporter>,
    ) -> Result<Self, DriverError> {
        config.validate()?;
        let seed = config.random_seed.unwrap_or_else(rand::random);
        log::debug!("Generation driver seeded with {seed}");

        Ok(Self {
            config,
            rng: RoadRng::new(seed),
            population: Vec::new(),
            phase: DriverPhase::Empty,
            generation: 0,
            next_id: 0,
            exporter,
            visualizer: None,
            client: None,
        })
    }

    /// Render every exported population.
    pub fn with_visualizer(mut self, visualizer: Box<dyn Visualizer>) -> Self {
        self.visualizer = Some(visualizer);
        self
    }

    /// Evaluate every exported population through `client`.
    pub fn with_client(mut self, client: Box<dyn ExecutionClient>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn phase(&self) -> DriverPhase {
        self.phase
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    /// Synthesize individuals until the population reaches its target size.
    pub fn seed_population(&mut self) {
        let generator = &self.config.generator;
        while self.population.len() < self.config.population_size {
            let id = take_id(&mut self.next_id);
            let mut individual = newcomer(id, &self.config.files_name, generator, &mut self.rng);
            individual.annotate_width(generator.profile.width);
            self.population.push(individual);
        }
        self.phase = DriverPhase::Seeded;
        log::info!("Population seeded with {} individuals", self.population.len());
    }

    /// Run one generation.
    ///
    /// Grows the population back to its target size, exports it, evaluates
    /// it when a client is attached, keeps the elites and injects one
    /// newcomer. The population leaves with `number_elites + 1` members.
    pub fn step(&mut self) -> Result<GenerationReport, DriverError> {
        if self.phase == DriverPhase::Empty {
            self.seed_population();
        }

        self.grow();
        let population_size = self.population.len();
        log::info!(
            "Generation {}: population finished with {} individuals",
            self.generation,
            population_size
        );

        let scenarios: Vec<Scenario> = self
            .population
            .iter()
            .map(|individual| Scenario::from_individual(individual, &self.config.generator))
            .collect();
        let export = self.exporter.export(&scenarios)?;
        if !export.is_complete() {
            log::warn!(
                "Generation {}: {} scenarios failed to export and stay unevaluated",
                self.generation,
                export.failed.len()
            );
        }
        if let Some(visualizer) = self.visualizer.as_mut() {
            visualizer.render(&scenarios);
        }

        let evaluated = match self.client.as_mut() {
            Some(client) => {
                let mut traces = HashMap::with_capacity(export.exported.len());
                for id in &export.exported {
                    traces.insert(id.clone(), client.submit_and_await(id)?);
                }
                assign_fitness(&mut self.population, &traces, &self.config.fitness)?
            }
            None => 0,
        };

        let (best_fitness, mean_fitness) =
            fitness_stats(&self.population, self.config.fitness.goal);

        self.population = select_elites(
            &self.population,
            self.config.number_elites,
            self.config.fitness.goal,
        );
        let elites = self.population.iter().map(|e| e.id).collect();
        log::info!("Selected {} elites", self.population.len());

        let id = take_id(&mut self.next_id);
        inject_newcomer(
            &mut self.population,
            id,
            &self.config.files_name,
            &self.config.generator,
            &mut self.rng,
        );
        log::info!("Injected newcomer {id}");

        let report = GenerationReport {
            generation: self.generation,
            population_size,
            exported: export.exported,
            failed: export.failed.into_iter().map(|(id, _)| id).collect(),
            evaluated,
            best_fitness,
            mean_fitness,
            elites,
        };

        self.generation += 1;
        self.phase = DriverPhase::Steady;
        Ok(report)
    }

    /// Run `generations` steps, stopping at the first error.
    pub fn run(&mut self, generations: usize) -> Result<Vec<GenerationReport>, DriverError> {
        (0..generations).map(|_| self.step()).collect()
    }

    /// Assign per-scenario traces to the current population.
    pub fn apply_traces(
        &mut self,
        traces: &HashMap<String, ExecutionTrace>,
    ) -> Result<usize, FitnessError> {
        assign_fitness(&mut self.population, traces, &self.config.fitness)
    }

    /// Assign one aggregate trace to the whole current population.
    pub fn apply_uniform_trace(&mut self, trace: &ExecutionTrace) -> Result<(), FitnessError> {
        assign_uniform_fitness(&mut self.population, trace, &self.config.fitness)
    }

    /// Breed pairs until the population reaches its target size.
    ///
    /// Two children are appended per pair, so an odd shortfall overshoots
    /// the target by one.
    fn grow(&mut self) {
        let generator = &self.config.generator;
        while self.population.len() < self.config.population_size {
            let Some((i, j)) = self.rng.distinct_pair(self.population.len()) else {
                let id = take_id(&mut self.next_id);
                inject_newcomer(
                    &mut self.population,
                    id,
                    &self.config.files_name,
                    generator,
                    &mut self.rng,
                );
                continue;
            };

            let (a, b) = crossover(
                &self.population[i],
                &self.population[j],
                generator,
                &mut self.rng,
            );
            for child in [a, b] {
                let mut child = mutate(child, generator, &mut self.rng);
                child.id = take_id(&mut self.next_id);
                self.population.push(child);
            }
        }
    }
}

fn take_id(counter: &mut u64) -> u64 {
    let id = *counter;
    *counter += 1;
    id
}

fn fitness_stats(population: &[Individual], goal: FitnessGoal) -> (Option<f64>, Option<f64>) {
    let fitness: Vec<f64> = population
        .iter()
        .filter(|i| i.evaluated)
        .map(|i| i.fitness)
        .collect();
    if fitness.is_empty() {
        return (None, None);
    }
    let best = match goal {
        FitnessGoal::Minimize => fitness.iter().copied().fold(f64::INFINITY, f64::min),
        FitnessGoal::Maximize => fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    };
    let mean = fitness.iter().sum::<f64>() / fitness.len() as f64;
    (Some(best), Some(mean))
}
