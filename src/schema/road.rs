//! Road representation: points, control points and individuals.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Fitness value of an individual that has not been evaluated yet.
pub const UNASSIGNED_FITNESS: f64 = 0.0;

/// A 2D coordinate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(self, other: Point2) -> f64 {
        (other - self).length()
    }

    /// Length of this point read as a vector.
    #[inline]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// 2D cross product (z component).
    #[inline]
    pub fn cross(self, other: Point2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Linear interpolation towards `other`.
    #[inline]
    pub fn lerp(self, other: Point2, t: f64) -> Point2 {
        self + (other - self) * t
    }
}

impl Add for Point2 {
    type Output = Point2;

    fn add(self, rhs: Point2) -> Point2 {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Point2;

    fn sub(self, rhs: Point2) -> Point2 {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point2 {
    type Output = Point2;

    fn mul(self, s: f64) -> Point2 {
        Point2::new(self.x * s, self.y * s)
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// A placed road control point, optionally annotated with the corridor width.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ControlPoint {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

impl ControlPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, width: None }
    }

    pub fn position(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

impl From<Point2> for ControlPoint {
    fn from(p: Point2) -> Self {
        Self::new(p.x, p.y)
    }
}

/// One candidate road in the population.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Individual {
    /// Unique identifier within a run.
    pub id: u64,
    /// Base name of the scenario documents exported for this road.
    pub file_name: String,
    /// Ordered control points defining the road shape.
    pub control_points: Vec<ControlPoint>,
    /// Fitness score, `UNASSIGNED_FITNESS` until evaluated.
    pub fitness: f64,
    /// Whether `fitness` came from an execution trace.
    #[serde(default)]
    pub evaluated: bool,
}

impl Individual {
    /// Create an unevaluated individual from raw points.
    pub fn new(id: u64, file_name: impl Into<String>, points: Vec<Point2>) -> Self {
        Self {
            id,
            file_name: file_name.into(),
            control_points: points.into_iter().map(ControlPoint::from).collect(),
            fitness: UNASSIGNED_FITNESS,
            evaluated: false,
        }
    }

    /// Record a fitness computed from a trace.
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
        self.evaluated = true;
    }

    /// Drop any previous evaluation, e.g. after the shape changed.
    pub fn reset_fitness(&mut self) {
        self.fitness = UNASSIGNED_FITNESS;
        self.evaluated = false;
    }

    /// Identifier of the scenario documents exported for this road.
    pub fn scenario_id(&self) -> String {
        format!("{}{}", self.file_name, self.id)
    }

    /// Control point coordinates.
    pub fn positions(&self) -> Vec<Point2> {
        self.control_points.iter().map(ControlPoint::position).collect()
    }

    /// Number of control points.
    pub fn len(&self) -> usize {
        self.control_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.control_points.is_empty()
    }

    /// Annotate every control point with the corridor width.
    pub fn annotate_width(&mut self, width: f64) {
        for point in &mut self.control_points {
            point.width = Some(width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_ops() {
        let a = Point2::new(1.0, 2.0);
        let b = Point2::new(4.0, 6.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-12);
        assert_eq!(a.lerp(b, 0.5), Point2::new(2.5, 4.0));
        assert_eq!(Point2::new(1.0, 0.0).cross(Point2::new(0.0, 1.0)), 1.0);
    }

    #[test]
    fn test_individual_from_points() {
        let mut ind = Individual::new(
            3,
            "road",
            vec![Point2::new(1.0, 0.0), Point2::new(65.0, 0.0)],
        );
        assert_eq!(ind.len(), 2);
        assert_eq!(ind.fitness, UNASSIGNED_FITNESS);
        assert!(!ind.evaluated);
        assert!(ind.control_points.iter().all(|p| p.width.is_none()));

        ind.annotate_width(4.0);
        assert!(ind.control_points.iter().all(|p| p.width == Some(4.0)));
        assert_eq!(ind.positions()[1], Point2::new(65.0, 0.0));
        assert_eq!(ind.scenario_id(), "road3");
    }

    #[test]
    fn test_fitness_evaluation_flag() {
        let mut ind = Individual::new(0, "road", vec![Point2::new(1.0, 0.0)]);
        ind.set_fitness(2.5);
        assert!(ind.evaluated);
        assert_eq!(ind.fitness, 2.5);

        ind.reset_fitness();
        assert!(!ind.evaluated);
        assert_eq!(ind.fitness, UNASSIGNED_FITNESS);
    }

    #[test]
    fn test_control_point_serialization_omits_missing_width() {
        let json = serde_json::to_string(&ControlPoint::new(1.0, 2.0)).unwrap();
        assert_eq!(json, r#"{"x":1.0,"y":2.0}"#);
    }
}
