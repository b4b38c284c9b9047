//! Scenario documents and the services around them.
//!
//! Each individual is exported as a pair of JSON documents sharing the
//! scenario id as base name. A plot renderer and a test-execution client
//! plug into the generation driver through the traits defined here.
//!
//! # File Format
//!
//! ```text
//! {id}.dbe.json   environment: time of day, lanes of (x, y, width) segments
//! {id}.dbc.json   criteria: ego participant with initial state and
//!                 waypoints, speed precondition at the second road point,
//!                 success at the last road point, failure when offroad
//! {id}.svg        optional centerline plot
//! {id}.trace.json execution trace read back by `TraceDirClient`
//! ```

mod client;
mod exporter;
mod format;
mod render;

pub use client::{ClientError, ExecutionClient, TraceDirClient};
pub use exporter::{ExportError, ExportReport, JsonScenarioExporter, ScenarioExporter};
pub use format::*;
pub use render::{SvgVisualizer, Visualizer, svg_document};
