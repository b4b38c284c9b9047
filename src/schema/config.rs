//! Configuration types for road synthesis and evolution.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Difficulty level selecting a road shape profile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Fixed road shape bundle for this difficulty.
    pub fn profile(self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                spline_degree: 7,
                min_segment_length: 30.0,
                max_segment_length: 50.0,
                width: 4.0,
                min_nodes: 8,
                max_nodes: 12,
            },
            Difficulty::Medium => DifficultyProfile {
                spline_degree: 6,
                min_segment_length: 25.0,
                max_segment_length: 45.0,
                width: 4.0,
                min_nodes: 12,
                max_nodes: 16,
            },
            Difficulty::Hard => DifficultyProfile {
                spline_degree: 2,
                min_segment_length: 20.0,
                max_segment_length: 40.0,
                width: 5.0,
                min_nodes: 14,
                max_nodes: 22,
            },
        }
    }
}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EASY" => Ok(Difficulty::Easy),
            "MEDIUM" => Ok(Difficulty::Medium),
            "HARD" => Ok(Difficulty::Hard),
            _ => Err(UnknownDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        };
        f.write_str(name)
    }
}

/// Difficulty name that matched no profile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown difficulty level: {0:?}")]
pub struct UnknownDifficulty(pub String);

/// Road shape parameters bundled per difficulty.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DifficultyProfile {
    /// B-spline degree (higher is smoother).
    pub spline_degree: usize,
    /// Minimum distance between consecutive control points.
    pub min_segment_length: f64,
    /// Maximum distance between consecutive control points.
    pub max_segment_length: f64,
    /// Corridor width of the road.
    pub width: f64,
    /// Minimum number of control points per road.
    pub min_nodes: usize,
    /// Maximum number of control points per road.
    pub max_nodes: usize,
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Self {
            spline_degree: 5,
            min_segment_length: 28.0,
            max_segment_length: 45.0,
            width: 4.0,
            min_nodes: 8,
            max_nodes: 12,
        }
    }
}

/// Immutable generator configuration passed into synthesis and every operator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratorConfig {
    /// Active road shape profile.
    #[serde(default)]
    pub profile: DifficultyProfile,
    /// Base budget of consecutive invalid points while growing a road.
    /// Candidate, mutation and crossover budgets derive from it.
    #[serde(default = "default_max_tries")]
    pub max_tries: usize,
    /// Samples used when evaluating a road for validity.
    #[serde(default = "default_validation_samples")]
    pub validation_samples: usize,
    /// Samples used when evaluating a road for export.
    #[serde(default = "default_export_samples")]
    pub export_samples: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            profile: DifficultyProfile::default(),
            max_tries: default_max_tries(),
            validation_samples: default_validation_samples(),
            export_samples: default_export_samples(),
        }
    }
}

fn default_max_tries() -> usize {
    500
}
fn default_validation_samples() -> usize {
    100
}
fn default_export_samples() -> usize {
    125
}

impl GeneratorConfig {
    /// Config with the profile of `difficulty`.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self {
            profile: difficulty.profile(),
            ..Default::default()
        }
    }

    /// Return a copy switched to the named difficulty profile.
    ///
    /// Unknown names keep the current profile and log a warning.
    pub fn with_difficulty(&self, name: &str) -> Self {
        match name.parse::<Difficulty>() {
            Ok(difficulty) => Self {
                profile: difficulty.profile(),
                ..self.clone()
            },
            Err(err) => {
                log::warn!("{err}. Keeping the current difficulty profile.");
                self.clone()
            }
        }
    }

    /// Attempts allowed when proposing a single candidate point.
    pub fn candidate_attempts(&self) -> usize {
        self.max_tries / 5
    }

    /// Attempts allowed when replacing one control point during mutation.
    pub fn mutation_attempts(&self) -> usize {
        self.max_tries / 10
    }

    /// Full sweeps over all cut positions allowed during crossover.
    pub fn crossover_sweeps(&self) -> usize {
        self.max_tries / 5
    }

    /// Half of the corridor width.
    #[inline]
    pub fn half_width(&self) -> f64 {
        self.profile.width / 2.0
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.profile;
        if p.spline_degree == 0 {
            return Err(ConfigError::InvalidSplineDegree);
        }
        if p.min_segment_length <= 0.0 || p.min_segment_length > p.max_segment_length {
            return Err(ConfigError::InvalidSegmentLength {
                min: p.min_segment_length,
                max: p.max_segment_length,
            });
        }
        if p.width <= 0.0 {
            return Err(ConfigError::InvalidWidth(p.width));
        }
        if p.min_nodes < 3 || p.min_nodes > p.max_nodes {
            return Err(ConfigError::InvalidNodeBounds {
                min: p.min_nodes,
                max: p.max_nodes,
            });
        }
        if self.validation_samples < 2 || self.export_samples < 2 {
            return Err(ConfigError::InvalidSampleCount);
        }
        // Below 5 there are no candidate attempts and synthesis can never succeed.
        if self.max_tries < 5 {
            return Err(ConfigError::InvalidMaxTries(self.max_tries));
        }
        Ok(())
    }
}

/// How a completed execution trace is reduced to a scalar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum FitnessMetric {
    /// Cumulative lateral deviation divided by elapsed seconds.
    #[default]
    TimeNormalizedDeviation,
    /// Largest single lateral deviation sample.
    MaxDeviation,
}

/// Which end of the fitness scale elite selection keeps.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum FitnessGoal {
    /// Keep the lowest fitness values (tight tracking).
    #[default]
    Minimize,
    /// Keep the highest fitness values (largest deviations).
    Maximize,
}

/// Fitness computation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FitnessConfig {
    #[serde(default)]
    pub metric: FitnessMetric,
    #[serde(default)]
    pub goal: FitnessGoal,
    /// Simulation ticks per second, used to turn ticks into elapsed time.
    #[serde(default = "default_tick_rate")]
    pub tick_rate: f64,
}

impl Default for FitnessConfig {
    fn default() -> Self {
        Self {
            metric: FitnessMetric::default(),
            goal: FitnessGoal::default(),
            tick_rate: default_tick_rate(),
        }
    }
}

fn default_tick_rate() -> f64 {
    60.0
}

/// Top-level configuration for an evolutionary road search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvolutionConfig {
    /// Road generation parameters.
    #[serde(default)]
    pub generator: GeneratorConfig,
    /// Target number of roads per generation.
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Roads kept unchanged into the next generation.
    #[serde(default = "default_number_elites")]
    pub number_elites: usize,
    /// Base name prefix for exported scenario documents.
    #[serde(default = "default_files_name")]
    pub files_name: String,
    #[serde(default)]
    pub fitness: FitnessConfig,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            population_size: default_population_size(),
            number_elites: default_number_elites(),
            files_name: default_files_name(),
            fitness: FitnessConfig::default(),
            random_seed: None,
        }
    }
}

fn default_population_size() -> usize {
    8
}
fn default_number_elites() -> usize {
    4
}
fn default_files_name() -> String {
    "exampleTest".to_string()
}

impl EvolutionConfig {
    /// Return a copy switched to the named difficulty profile.
    pub fn with_difficulty(&self, name: &str) -> Self {
        Self {
            generator: self.generator.with_difficulty(name),
            ..self.clone()
        }
    }

    /// Return a copy with a new scenario file name prefix.
    pub fn with_files_name(&self, name: impl Into<String>) -> Self {
        Self {
            files_name: name.into(),
            ..self.clone()
        }
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generator.validate()?;
        if self.population_size < 2 {
            return Err(ConfigError::InvalidPopulationSize(self.population_size));
        }
        if self.number_elites == 0 || self.number_elites > self.population_size {
            return Err(ConfigError::InvalidElites {
                elites: self.number_elites,
                population: self.population_size,
            });
        }
        if self.fitness.tick_rate <= 0.0 {
            return Err(ConfigError::InvalidTickRate(self.fitness.tick_rate));
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("Spline degree must be non-zero")]
    InvalidSplineDegree,
    #[error("Segment length bounds [{min}, {max}] must be positive and ordered")]
    InvalidSegmentLength { min: f64, max: f64 },
    #[error("Road width must be positive, got {0}")]
    InvalidWidth(f64),
    #[error("Node bounds [{min}, {max}] must be ordered and at least 3")]
    InvalidNodeBounds { min: usize, max: usize },
    #[error("Sample counts must be at least 2")]
    InvalidSampleCount,
    #[error("Retry budget must be at least 5, got {0}")]
    InvalidMaxTries(usize),
    #[error("Population size must be at least 2, got {0}")]
    InvalidPopulationSize(usize),
    #[error("Elite count {elites} must be between 1 and the population size {population}")]
    InvalidElites { elites: usize, population: usize },
    #[error("Tick rate must be positive, got {0}")]
    InvalidTickRate(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parse_case_insensitive() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!("MeDiUm".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert_eq!(" HARD ".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_with_difficulty_switches_profile() {
        let config = GeneratorConfig::default().with_difficulty("hard");
        assert_eq!(config.profile, Difficulty::Hard.profile());
        assert_eq!(config.profile.spline_degree, 2);
        assert_eq!(config.profile.max_nodes, 22);
    }

    #[test]
    fn test_unknown_difficulty_keeps_profile() {
        let medium = GeneratorConfig::for_difficulty(Difficulty::Medium);
        let unchanged = medium.with_difficulty("impossible");
        assert_eq!(unchanged, medium);
    }

    #[test]
    fn test_with_difficulty_is_idempotent() {
        let once = GeneratorConfig::default().with_difficulty("easy");
        let twice = once.with_difficulty("easy");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_derived_budgets() {
        let config = GeneratorConfig::default();
        assert_eq!(config.candidate_attempts(), 100);
        assert_eq!(config.mutation_attempts(), 50);
        assert_eq!(config.crossover_sweeps(), 100);
        assert!((config.half_width() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_validate() {
        assert!(EvolutionConfig::default().validate().is_ok());

        let config = EvolutionConfig {
            number_elites: 9,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidElites {
                elites: 9,
                population: 8
            })
        );

        let mut config = EvolutionConfig::default();
        config.generator.profile.min_nodes = 20;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidNodeBounds { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_budget_without_candidate_attempts() {
        let mut config = EvolutionConfig::default();
        config.generator.max_tries = 4;
        assert_eq!(config.generator.candidate_attempts(), 0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidMaxTries(4)));

        config.generator.max_tries = 5;
        assert_eq!(config.generator.candidate_attempts(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip_with_defaults() {
        let json = r#"{ "generator": { "profile": {
            "spline_degree": 7, "min_segment_length": 30.0, "max_segment_length": 50.0,
            "width": 4.0, "min_nodes": 8, "max_nodes": 12 } }, "files_name": "road" }"#;
        let config: EvolutionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.generator.profile, Difficulty::Easy.profile());
        assert_eq!(config.generator.max_tries, 500);
        assert_eq!(config.population_size, 8);
        assert_eq!(config.files_name, "road");
    }
}
