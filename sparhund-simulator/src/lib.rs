//! # Sparhund Simulator
//!
//! Scripted endpoint-activity simulator. One [`SimulationRun`] owns a
//! unique run id and an event store, drives a fixed sequence of file,
//! process, and network actions, and persists the collected events as
//! a pretty-printed JSON artifact for detection tooling to chew on.
//!
//! ## Key components
//! - **Action units** (file, network, executable): perform one real
//!   side effect each and append the matching event record.
//! - **Orchestrator**: [`SimulationRun::execute`], a linear state
//!   machine with no retries; the first failure aborts the run.
//! - **Error taxonomy**: [`error::SimulationError`], closed set of
//!   failure kinds so callers can tell recoverable from fatal.

use std::fs;
use std::path::PathBuf;

use rand::Rng;
use tracing::info;

use sparhund_config::SimulationConfig;
use sparhund_telemetry::EventStore;

mod actions;
pub mod error;

pub use error::{RunError, SimulationError, Stage};

/// One end-to-end execution of the fixed action sequence.
///
/// The run owns its event store exclusively; nothing is shared across
/// runs. The id lands in every scratch file name and in the artifact
/// name, so concurrent runs in separate processes cannot collide.
pub struct SimulationRun {
    id: String,
    config: SimulationConfig,
    store: EventStore,
}

impl SimulationRun {
    /// Creates a run with a fresh random identifier.
    pub fn new(config: SimulationConfig) -> Self {
        let id = hex::encode(rand::rng().random::<[u8; 8]>());
        Self {
            id,
            config,
            store: EventStore::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SimulationConfig {
        &mut self.config
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut EventStore {
        &mut self.store
    }

    /// Where this run's event log lands once persisted.
    pub fn artifact_path(&self) -> PathBuf {
        self.config
            .report
            .directory
            .join(format!("simulation_{}.json", self.id))
    }

    /// Runs the full scripted sequence:
    /// create file → modify file → delete file → run executable →
    /// fetch network resource → persist log.
    ///
    /// Modify/delete targets default to fresh synthesized files when
    /// the configuration names none, which makes those stages append
    /// two events each. No stage is retried; the first failure aborts
    /// the run, tagged with the stage that hit it, and nothing is
    /// persisted. Returns a completion message naming the run id.
    pub fn execute(&mut self) -> Result<String, RunError> {
        info!(run_id = %self.id, "simulation run started");

        self.create_file(None, None).map_err(at(Stage::CreateFile))?;

        let target = self.config.scratch.modify_target.clone();
        self.modify_file(target).map_err(at(Stage::ModifyFile))?;

        let target = self.config.scratch.delete_target.clone();
        self.delete_file(target).map_err(at(Stage::DeleteFile))?;

        let program = self.config.executable.program.clone();
        let args = self.config.executable.args.clone();
        self.run_executable(&program, &args)
            .map_err(at(Stage::RunExecutable))?;

        self.fetch_data().map_err(at(Stage::FetchData))?;

        let artifact = self.persist().map_err(at(Stage::PersistLog))?;

        info!(
            run_id = %self.id,
            artifact = %artifact.display(),
            events = self.store.len(),
            "simulation run complete"
        );
        Ok(format!(
            "simulation run {} complete: {} events logged to {}",
            self.id,
            self.store.len(),
            artifact.display()
        ))
    }

    /// Serializes the event store snapshot to the run's artifact path.
    pub fn persist(&self) -> Result<PathBuf, SimulationError> {
        fs::create_dir_all(&self.config.report.directory)?;
        let path = self.artifact_path();
        let json = serde_json::to_string_pretty(&self.store.snapshot())?;
        fs::write(&path, json)?;
        Ok(path)
    }
}

fn at(stage: Stage) -> impl FnOnce(SimulationError) -> RunError {
    move |source| RunError { stage, source }
}


#[cfg(test)]
mod tests {
    use super::*;
    use test_support::{serve_once, test_run};

    #[test]
    fn full_run_produces_consistent_store_and_artifact() {
        let mut run = test_run("orchestrator-full");
        run.config_mut().scratch.extension = "log".to_string();
        run.config_mut().network.endpoint = serve_once(b"fetched payload");
        run.config_mut().executable.program = "echo".to_string();
        run.config_mut().executable.args = vec!["hi".to_string()];

        let message = run.execute().unwrap();
        assert!(message.contains(run.id()));

        // create(1) + modify-with-synthesis(2) + delete-with-synthesis(2)
        // + fetch body file(1)
        assert_eq!(run.store().file_events().len(), 6);
        assert_eq!(run.store().network_events().len(), 1);
        assert_eq!(run.store().executable_events().len(), 1);

        let artifact = run.artifact_path();
        assert!(artifact.exists());
        let document: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&artifact).unwrap()).unwrap();
        assert_eq!(
            document["file_processes"].as_array().unwrap().len(),
            run.store().file_events().len()
        );
        assert_eq!(document["network_processes"].as_array().unwrap().len(), 1);
        assert_eq!(document["executable_processes"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn reruns_never_overwrite_previous_artifacts() {
        let mut first = test_run("orchestrator-rerun");
        first.config_mut().network.endpoint = serve_once(b"one");

        let mut second = test_run("orchestrator-rerun");
        // Same report directory, distinct run ids.
        second.config_mut().report.directory = first.config().report.directory.clone();
        second.config_mut().network.endpoint = serve_once(b"two");

        first.execute().unwrap();
        second.execute().unwrap();

        assert_ne!(first.id(), second.id());
        assert_ne!(first.artifact_path(), second.artifact_path());
        assert!(first.artifact_path().exists());
        assert!(second.artifact_path().exists());
    }

    #[test]
    fn failed_stage_is_identified_and_nothing_is_persisted() {
        let mut run = test_run("orchestrator-spawn-fail");
        run.config_mut().executable.program = "sparhund-definitely-not-installed".to_string();

        let err = run.execute().unwrap_err();
        assert_eq!(err.stage, Stage::RunExecutable);
        assert!(matches!(err.source, SimulationError::Spawn { .. }));

        // The store keeps its partial state, but no artifact exists.
        assert_eq!(run.store().file_events().len(), 5);
        assert!(run.store().network_events().is_empty());
        assert!(!run.artifact_path().exists());
    }

    #[test]
    fn snapshot_matches_persisted_document() {
        let mut run = test_run("orchestrator-snapshot");
        run.create_file(None, None).unwrap();
        let artifact = run.persist().unwrap();

        let document: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(artifact).unwrap()).unwrap();
        let snapshot = serde_json::to_value(run.store().snapshot()).unwrap();
        assert_eq!(document, snapshot);
    }
}
