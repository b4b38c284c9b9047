//! Scenario document definitions and construction from individuals.

use serde::{Deserialize, Serialize};

use crate::compute::spline;
use crate::schema::{GeneratorConfig, Individual, Point2};

/// Identifier of the vehicle under test.
pub const EGO_ID: &str = "ego";
/// Vehicle model driven by the ego participant.
pub const EGO_MODEL: &str = "ETK800";
/// Initial ego speed.
pub const EGO_START_SPEED: f64 = 50.0;
/// Waypoint tolerance radius.
pub const WAYPOINT_TOLERANCE: f64 = 2.0;
/// Tolerance of the speed precondition position.
pub const PRECONDITION_TOLERANCE: f64 = 3.0;
/// Minimum speed the ego must hold at the precondition position.
pub const PRECONDITION_MIN_SPEED: f64 = 10.0;
/// Simulation steps per second.
pub const STEPS_PER_SECOND: u32 = 60;
/// Steps between two decisions of the agent.
pub const AI_FREQUENCY: u32 = 6;

/// How a participant is driven.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum MovementMode {
    /// Follows the waypoints under simulator control.
    #[default]
    #[serde(rename = "_BEAMNG")]
    Scripted,
}

/// Paired environment and criteria documents for one road.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    /// Scenario identifier, also the base file name of both documents.
    pub id: String,
    pub environment: EnvironmentDocument,
    pub criteria: CriteriaDocument,
}

/// Road network description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnvironmentDocument {
    pub time_of_day: f64,
    pub lanes: Vec<Lane>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lane {
    pub markings: bool,
    #[serde(default)]
    pub left_lanes: u32,
    #[serde(default)]
    pub right_lanes: u32,
    pub segments: Vec<LaneSegment>,
}

/// One sampled centerline point with the corridor width.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LaneSegment {
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

/// Test oracle: participants, preconditions, success and failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CriteriaDocument {
    pub name: String,
    /// File name of the matching environment document.
    pub environment: String,
    pub steps_per_second: u32,
    pub ai_frequency: u32,
    pub participants: Vec<Participant>,
    pub preconditions: Vec<SpeedPrecondition>,
    pub success: Vec<PositionCriterion>,
    pub failure: Vec<FailureCriterion>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Participant {
    pub id: String,
    pub model: String,
    pub initial_state: InitialState,
    pub waypoints: Vec<Waypoint>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct InitialState {
    pub x: f64,
    pub y: f64,
    pub orientation: f64,
    pub movement_mode: MovementMode,
    pub speed: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
    pub tolerance: f64,
    pub movement_mode: MovementMode,
}

/// Participant must not be below `min_speed` when inside the circle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpeedPrecondition {
    pub participant: String,
    pub x: f64,
    pub y: f64,
    pub tolerance: f64,
    pub min_speed: f64,
}

/// Participant reaches the circle around `(x, y)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PositionCriterion {
    pub participant: String,
    pub x: f64,
    pub y: f64,
    pub tolerance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum FailureCriterion {
    /// Participant leaves the road.
    Offroad { participant: String },
}

impl Scenario {
    /// Build the scenario for `individual`, re-sampling its road for export.
    pub fn from_individual(individual: &Individual, config: &GeneratorConfig) -> Self {
        let curve = spline::evaluate(
            &individual.positions(),
            config.profile.spline_degree,
            config.export_samples,
        );
        Self::from_curve(individual.scenario_id(), &curve, config.profile.width)
    }

    /// Build a scenario around an already sampled centerline.
    pub fn from_curve(id: String, curve: &[Point2], width: f64) -> Self {
        let start = curve.first().copied().unwrap_or_default();
        let finish = curve.last().copied().unwrap_or_default();
        let checkpoint = curve.get(1).copied().unwrap_or(start);

        let environment = EnvironmentDocument {
            time_of_day: 0.0,
            lanes: vec![Lane {
                markings: true,
                left_lanes: 0,
                right_lanes: 0,
                segments: curve
                    .iter()
                    .map(|p| LaneSegment {
                        x: p.x,
                        y: p.y,
                        width,
                    })
                    .collect(),
            }],
        };

        let ego = Participant {
            id: EGO_ID.to_string(),
            model: EGO_MODEL.to_string(),
            initial_state: InitialState {
                x: start.x,
                y: start.y,
                orientation: 0.0,
                movement_mode: MovementMode::Scripted,
                speed: EGO_START_SPEED,
            },
            waypoints: curve
                .iter()
                .map(|p| Waypoint {
                    x: p.x,
                    y: p.y,
                    tolerance: WAYPOINT_TOLERANCE,
                    movement_mode: MovementMode::Scripted,
                })
                .collect(),
        };

        let criteria = CriteriaDocument {
            name: format!("Lane following {id}"),
            environment: Self::environment_file_name(&id),
            steps_per_second: STEPS_PER_SECOND,
            ai_frequency: AI_FREQUENCY,
            participants: vec![ego],
            preconditions: vec![SpeedPrecondition {
                participant: EGO_ID.to_string(),
                x: checkpoint.x,
                y: checkpoint.y,
                tolerance: PRECONDITION_TOLERANCE,
                min_speed: PRECONDITION_MIN_SPEED,
            }],
            success: vec![PositionCriterion {
                participant: EGO_ID.to_string(),
                x: finish.x,
                y: finish.y,
                tolerance: width / 2.0,
            }],
            failure: vec![FailureCriterion::Offroad {
                participant: EGO_ID.to_string(),
            }],
        };

        Self {
            id,
            environment,
            criteria,
        }
    }

    /// File name of the environment document for scenario `id`.
    pub fn environment_file_name(id: &str) -> String {
        format!("{id}.dbe.json")
    }

    /// File name of the criteria document for scenario `id`.
    pub fn criteria_file_name(id: &str) -> String {
        format!("{id}.dbc.json")
    }

    /// Sampled centerline of the scenario's road.
    pub fn centerline(&self) -> Vec<Point2> {
        self.environment
            .lanes
            .iter()
            .flat_map(|lane| lane.segments.iter().map(|s| Point2::new(s.x, s.y)))
            .collect()
    }
}
