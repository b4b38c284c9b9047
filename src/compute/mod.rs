//! Compute module - Road synthesis, validity and the genetic search.

mod retry;
mod rng;

pub mod driver;
pub mod fitness;
pub mod geometry;
pub mod operators;
pub mod sampler;
pub mod spline;
pub mod synthesis;
pub mod validity;

pub use driver::{DriverError, DriverPhase, GenerationDriver, GenerationReport};
pub use fitness::{FitnessError, assign_fitness, assign_uniform_fitness, trace_fitness};
pub use geometry::{CAP_WIDTH_FACTOR, Segment, corridor_lines, polyline_segments};
pub use operators::{
    CROSSOVER_PROBABILITY, MUTATION_PROBABILITY, crossover, inject_newcomer, mutate, newcomer,
    recombine, select_elites,
};
pub use retry::RetryBudget;
pub use rng::RoadRng;
pub use sampler::{MAX_TURN_DEGREES, MIN_TURN_DEGREES, propose, turn_angle};
pub use synthesis::{START_POINTS, synthesize};
pub use validity::{
    corridor_conflicts, full_curve_invalid, new_point_conflicts, road_is_valid,
    self_intersects_centerline,
};
