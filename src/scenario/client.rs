//! Test-execution service clients.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::schema::ExecutionTrace;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("No trace available for scenario {0}")]
    MissingTrace(String),
    #[error("I/O error reading trace for {scenario}: {source}")]
    Io {
        scenario: String,
        #[source]
        source: io::Error,
    },
    #[error("Malformed trace for {scenario}: {source}")]
    Malformed {
        scenario: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Submits an exported scenario for execution and waits for its trace.
pub trait ExecutionClient {
    fn submit_and_await(&mut self, scenario_id: &str) -> Result<ExecutionTrace, ClientError>;
}

/// Reads traces produced out of band as `{dir}/{id}.trace.json`.
#[derive(Debug, Clone)]
pub struct TraceDirClient {
    trace_dir: PathBuf,
}

impl TraceDirClient {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            trace_dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the trace file for scenario `id`.
    pub fn trace_path(&self, id: &str) -> PathBuf {
        self.trace_dir.join(format!("{id}.trace.json"))
    }
}

impl ExecutionClient for TraceDirClient {
    fn submit_and_await(&mut self, scenario_id: &str) -> Result<ExecutionTrace, ClientError> {
        let path = self.trace_path(scenario_id);
        let content = fs::read_to_string(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ClientError::MissingTrace(scenario_id.to_string()),
            _ => ClientError::Io {
                scenario: scenario_id.to_string(),
                source,
            },
        })?;
        serde_json::from_str(&content).map_err(|source| ClientError::Malformed {
            scenario: scenario_id.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_reads_trace_file() {
        let dir = tempdir().unwrap();
        let trace = ExecutionTrace::new(vec![0.5, 1.5], 60);
        fs::write(
            dir.path().join("road7.trace.json"),
            serde_json::to_string(&trace).unwrap(),
        )
        .unwrap();

        let mut client = TraceDirClient::new(dir.path());
        assert_eq!(client.submit_and_await("road7").unwrap(), trace);
    }

    #[test]
    fn test_missing_and_malformed_traces() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bad.trace.json"), "{not json").unwrap();
        let mut client = TraceDirClient::new(dir.path());

        assert!(matches!(
            client.submit_and_await("absent"),
            Err(ClientError::MissingTrace(id)) if id == "absent"
        ));
        assert!(matches!(
            client.submit_and_await("bad"),
            Err(ClientError::Malformed { .. })
        ));
    }
}
