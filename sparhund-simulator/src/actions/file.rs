//! File action unit: scratch file creation, modification, deletion.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use rand::distr::{Alphanumeric, SampleString};
use rand::Rng;
use tracing::debug;

use sparhund_telemetry::{EventPayload, EventRecord, FileActivityKind, FilePayload};

use crate::error::SimulationError;
use crate::SimulationRun;

impl SimulationRun {
    /// Creates an empty scratch file and logs a `create` file event.
    ///
    /// The name combines the run id, the current unix time, and a
    /// random suffix, so concurrent runs cannot collide. Defaults for
    /// directory and extension come from the run configuration.
    pub fn create_file(
        &mut self,
        directory: Option<&Path>,
        extension: Option<&str>,
    ) -> Result<PathBuf, SimulationError> {
        let directory = directory.unwrap_or(self.config().scratch.directory.as_path());
        let extension = extension.unwrap_or(self.config().scratch.extension.as_str());

        fs::create_dir_all(directory)?;
        let name = format!(
            "{}-{}-{}",
            self.id(),
            Utc::now().timestamp(),
            rand::rng().random_range(0..10_000)
        );
        let path = directory.join(format!("{name}.{extension}"));

        fs::File::create(&path)?;
        debug!(path = %path.display(), "scratch file created");
        self.log_file_event(&path, FileActivityKind::Create)?;
        Ok(path)
    }

    /// Overwrites the target with a block of random content and logs a
    /// `modify` file event.
    ///
    /// With no target, a fresh file is created first, so the call
    /// appends two events: `create` then `modify`. A target that does
    /// not exist fails with [`SimulationError::NotFound`] and appends
    /// nothing.
    pub fn modify_file(&mut self, target: Option<PathBuf>) -> Result<PathBuf, SimulationError> {
        let path = match target {
            Some(path) => path,
            None => self.create_file(None, None)?,
        };
        if !path.exists() {
            return Err(SimulationError::NotFound(path));
        }

        let mut rng = rand::rng();
        let length = rng.random_range(24..=96);
        let contents = Alphanumeric.sample_string(&mut rng, length);
        fs::write(&path, contents)?;

        debug!(path = %path.display(), "scratch file modified");
        self.log_file_event(&path, FileActivityKind::Modify)?;
        Ok(path)
    }

    /// Removes the target from the file system and logs a `delete`
    /// file event. The returned path no longer refers to anything.
    ///
    /// Same no-target and missing-target behavior as [`Self::modify_file`].
    pub fn delete_file(&mut self, target: Option<PathBuf>) -> Result<PathBuf, SimulationError> {
        let path = match target {
            Some(path) => path,
            None => self.create_file(None, None)?,
        };
        if !path.exists() {
            return Err(SimulationError::NotFound(path));
        }

        fs::remove_file(&path)?;
        debug!(path = %path.display(), "scratch file deleted");
        self.log_file_event(&path, FileActivityKind::Delete)?;
        Ok(path)
    }

    fn log_file_event(
        &mut self,
        path: &Path,
        activity_kind: FileActivityKind,
    ) -> Result<(), SimulationError> {
        let record = EventRecord::new(EventPayload::File(FilePayload {
            filepath: path.to_path_buf(),
            activity_kind,
        }))?;
        self.store_mut().append(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_run;

    fn kinds(run: &SimulationRun) -> Vec<FileActivityKind> {
        run.store()
            .file_events()
            .iter()
            .map(|record| match &record.payload {
                EventPayload::File(payload) => payload.activity_kind,
                other => panic!("expected file payload, got {other:?}"),
            })
            .collect()
    }

    #[test]
    fn create_uses_configured_defaults() {
        let mut run = test_run("file-create");
        let path = run.create_file(None, None).unwrap();

        assert!(path.exists());
        assert!(path.starts_with(&run.config().scratch.directory));
        assert_eq!(path.extension().unwrap(), "txt");
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with(run.id()));

        let events = run.store().file_events();
        assert_eq!(events.len(), 1);
        match &events[0].payload {
            EventPayload::File(payload) => {
                assert_eq!(payload.filepath, path);
                assert_eq!(payload.activity_kind, FileActivityKind::Create);
            }
            other => panic!("expected file payload, got {other:?}"),
        }
    }

    #[test]
    fn create_honors_explicit_directory_and_extension() {
        let mut run = test_run("file-create-explicit");
        let directory = run.config().scratch.directory.join("elsewhere");
        let path = run
            .create_file(Some(directory.as_path()), Some("json"))
            .unwrap();

        assert!(path.exists());
        assert!(path.starts_with(&directory));
        assert_eq!(path.extension().unwrap(), "json");
    }

    #[test]
    fn modify_without_target_synthesizes_one_first() {
        let mut run = test_run("file-modify-none");
        let path = run.modify_file(None).unwrap();

        assert!(path.exists());
        assert!(fs::metadata(&path).unwrap().len() > 0);
        assert_eq!(
            kinds(&run),
            vec![FileActivityKind::Create, FileActivityKind::Modify]
        );
    }

    #[test]
    fn modify_overwrites_existing_target() {
        let mut run = test_run("file-modify-existing");
        let path = run.config().scratch.directory.join("target.txt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "before").unwrap();

        let returned = run.modify_file(Some(path.clone())).unwrap();

        assert_eq!(returned, path);
        assert_ne!(fs::read_to_string(&path).unwrap(), "before");
        assert_eq!(kinds(&run), vec![FileActivityKind::Modify]);
    }

    #[test]
    fn modify_missing_target_appends_nothing() {
        let mut run = test_run("file-modify-missing");
        let missing = run.config().scratch.directory.join("missing.txt");

        let err = run.modify_file(Some(missing.clone())).unwrap_err();
        assert!(matches!(err, SimulationError::NotFound(path) if path == missing));
        assert!(run.store().is_empty());
    }

    #[test]
    fn delete_without_target_synthesizes_one_first() {
        let mut run = test_run("file-delete-none");
        let path = run.delete_file(None).unwrap();

        assert!(!path.exists());
        assert_eq!(
            kinds(&run),
            vec![FileActivityKind::Create, FileActivityKind::Delete]
        );
    }

    #[test]
    fn delete_missing_target_appends_nothing() {
        let mut run = test_run("file-delete-missing");
        let missing = run.config().scratch.directory.join("missing.txt");

        let err = run.delete_file(Some(missing)).unwrap_err();
        assert!(matches!(err, SimulationError::NotFound(_)));
        assert!(run.store().is_empty());
    }
}
