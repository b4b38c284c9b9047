//! Road plots as standalone SVG files.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::format::Scenario;
use crate::schema::Point2;

const MARGIN: f64 = 10.0;

/// Renders a batch of scenarios. Failures are logged, never returned.
pub trait Visualizer {
    fn render(&mut self, scenarios: &[Scenario]);
}

/// Writes one `{id}.svg` per scenario showing the road centerline.
#[derive(Debug, Clone)]
pub struct SvgVisualizer {
    output_dir: PathBuf,
}

impl SvgVisualizer {
    pub fn new<P: AsRef<Path>>(dir: P) -> io::Result<Self> {
        let output_dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    /// Path of the plot for scenario `id`.
    pub fn plot_path(&self, id: &str) -> PathBuf {
        self.output_dir.join(format!("{id}.svg"))
    }
}

impl Visualizer for SvgVisualizer {
    fn render(&mut self, scenarios: &[Scenario]) {
        for scenario in scenarios {
            let path = self.plot_path(&scenario.id);
            let width = scenario
                .environment
                .lanes
                .first()
                .and_then(|lane| lane.segments.first())
                .map_or(1.0, |s| s.width);
            let svg = svg_document(&scenario.centerline(), width);
            if let Err(e) = fs::write(&path, svg) {
                log::warn!("Failed to render {}: {}", path.display(), e);
            }
        }
    }
}

/// Build an SVG with the polyline drawn at `stroke` width, y axis pointing up.
pub fn svg_document(points: &[Point2], stroke: f64) -> String {
    let (min, max) = bounds(points);
    let width = max.x - min.x + 2.0 * MARGIN;
    let height = max.y - min.y + 2.0 * MARGIN;

    let mut path = String::new();
    for p in points {
        let x = p.x - min.x + MARGIN;
        let y = max.y - p.y + MARGIN;
        let _ = write!(path, "{x:.2},{y:.2} ");
    }

    let path = path.trim_end();
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {width:.2} {height:.2}\">\n"
    );
    let _ = writeln!(
        svg,
        "<polyline points=\"{path}\" fill=\"none\" stroke=\"gray\" \
         stroke-width=\"{stroke:.2}\" stroke-linejoin=\"round\"/>"
    );
    let _ = writeln!(
        svg,
        "<polyline points=\"{path}\" fill=\"none\" stroke=\"white\" \
         stroke-width=\"0.3\" stroke-dasharray=\"2 2\"/>"
    );
    svg.push_str("</svg>\n");
    svg
}

fn bounds(points: &[Point2]) -> (Point2, Point2) {
    if points.is_empty() {
        return (Point2::default(), Point2::default());
    }
    points.iter().fold(
        (
            Point2::new(f64::INFINITY, f64::INFINITY),
            Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        ),
        |(lo, hi), p| {
            (
                Point2::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point2::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        },
    )
}
