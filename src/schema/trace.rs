//! Execution traces returned by the test-execution service.

use serde::{Deserialize, Serialize};

/// Telemetry of one completed simulation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ExecutionTrace {
    /// Per-tick lateral distance of the ego vehicle to the lane center.
    pub distances: Vec<f64>,
    /// Simulation ticks elapsed when the run ended.
    pub ticks: u64,
}

impl ExecutionTrace {
    pub fn new(distances: Vec<f64>, ticks: u64) -> Self {
        Self { distances, ticks }
    }

    /// Sum of all lateral deviation samples.
    pub fn cumulative_distance(&self) -> f64 {
        self.distances.iter().sum()
    }

    /// Largest lateral deviation sample, 0 for an empty trace.
    pub fn max_distance(&self) -> f64 {
        self.distances.iter().copied().fold(0.0, f64::max)
    }
}
