//! Road evolver - Valid road generation and genetic search for driving tests.
//!
//! This crate synthesizes drivable road layouts from randomized control
//! points, keeps every road free of centerline and corridor overlaps, and
//! evolves populations of roads toward a fitness signal computed from
//! externally reported execution traces.
//!
//! # Architecture
//!
//! The crate is split into three modules:
//!
//! - `schema`: Configuration, road and trace data types
//! - `compute`: Curve evaluation, validity, synthesis, genetic operators and
//!   the generation driver
//! - `scenario`: Scenario documents, export, plotting and execution clients
//!
//! # Example
//!
//! ```rust,no_run
//! use road_evolver::{
//!     compute::GenerationDriver,
//!     scenario::JsonScenarioExporter,
//!     schema::EvolutionConfig,
//! };
//!
//! let config = EvolutionConfig::default()
//!     .with_difficulty("EASY")
//!     .with_files_name("lane");
//! let exporter = JsonScenarioExporter::new("scenarios").unwrap();
//! let mut driver = GenerationDriver::new(config, Box::new(exporter)).unwrap();
//!
//! let report = driver.step().unwrap();
//! println!("Exported {} scenarios", report.exported.len());
//! ```

pub mod compute;
pub mod scenario;
pub mod schema;

// Re-export commonly used types
pub use compute::{GenerationDriver, GenerationReport, RoadRng};
pub use schema::{Difficulty, EvolutionConfig, GeneratorConfig, Individual, Point2};
