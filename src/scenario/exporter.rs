//! Scenario export to a directory of JSON documents.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::format::Scenario;

/// Errors writing one scenario.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to serialize scenario {id}: {source}")]
    Json {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Outcome of exporting a batch of scenarios.
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Ids of scenarios written completely.
    pub exported: Vec<String>,
    /// Ids of scenarios that failed, with the reason.
    pub failed: Vec<(String, ExportError)>,
}

impl ExportReport {
    /// Whether every scenario in the batch was written.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Sink for generated scenarios.
///
/// Per-scenario failures go into the report; `Err` is reserved for failures
/// that stop the whole batch.
pub trait ScenarioExporter {
    fn export(&mut self, scenarios: &[Scenario]) -> Result<ExportReport, ExportError>;
}

/// Writes `{id}.dbe.json` and `{id}.dbc.json` per scenario into a directory.
#[derive(Debug, Clone)]
pub struct JsonScenarioExporter {
    output_dir: PathBuf,
}

impl JsonScenarioExporter {
    /// Create an exporter, creating `dir` if needed.
    pub fn new<P: AsRef<Path>>(dir: P) -> io::Result<Self> {
        let output_dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn write_scenario(&self, scenario: &Scenario) -> Result<(), ExportError> {
        let environment = self.output_dir.join(Scenario::environment_file_name(&scenario.id));
        let criteria = self.output_dir.join(Scenario::criteria_file_name(&scenario.id));

        write_json(&environment, &scenario.id, &scenario.environment)?;
        write_json(&criteria, &scenario.id, &scenario.criteria)
    }
}

impl ScenarioExporter for JsonScenarioExporter {
    fn export(&mut self, scenarios: &[Scenario]) -> Result<ExportReport, ExportError> {
        let mut report = ExportReport::default();
        for scenario in scenarios {
            match self.write_scenario(scenario) {
                Ok(()) => report.exported.push(scenario.id.clone()),
                Err(e) => {
                    log::warn!("Failed to export scenario {}: {}", scenario.id, e);
                    report.failed.push((scenario.id.clone(), e));
                }
            }
        }
        log::info!(
            "Exported {} of {} scenarios to {}",
            report.exported.len(),
            scenarios.len(),
            self.output_dir.display()
        );
        Ok(report)
    }
}

fn write_json<T: serde::Serialize>(path: &Path, id: &str, value: &T) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(value).map_err(|source| ExportError::Json {
        id: id.to_string(),
        source,
    })?;
    fs::write(path, json).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::format::CriteriaDocument;
    use crate::schema::Point2;
    use tempfile::tempdir;

    fn scenario(id: &str) -> Scenario {
        let curve = [Point2::new(1.0, 0.0), Point2::new(30.0, 5.0), Point2::new(65.0, 0.0)];
        Scenario::from_curve(id.to_string(), &curve, 4.0)
    }

    #[test]
    fn test_export_writes_both_documents() {
        let dir = tempdir().unwrap();
        let mut exporter = JsonScenarioExporter::new(dir.path().join("out")).unwrap();

        let report = exporter.export(&[scenario("road0"), scenario("road1")]).unwrap();
        assert!(report.is_complete());
        assert_eq!(report.exported, vec!["road0", "road1"]);

        let criteria = fs::read_to_string(exporter.output_dir().join("road1.dbc.json")).unwrap();
        let criteria: CriteriaDocument = serde_json::from_str(&criteria).unwrap();
        assert_eq!(criteria, scenario("road1").criteria);
        assert!(exporter.output_dir().join("road1.dbe.json").exists());
    }

    #[test]
    fn test_export_failure_is_per_scenario() {
        let dir = tempdir().unwrap();
        let mut exporter = JsonScenarioExporter::new(dir.path()).unwrap();
        // A directory in the way of the environment file makes the write fail.
        fs::create_dir(dir.path().join("blocked.dbe.json")).unwrap();

        let report = exporter.export(&[scenario("blocked"), scenario("fine")]).unwrap();
        assert_eq!(report.exported, vec!["fine"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "blocked");
        assert!(matches!(report.failed[0].1, ExportError::Io { .. }));
    }
}
