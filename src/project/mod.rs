//! Frozen view of the host project
//!
//! The inventory is collected once, after every plugin had the chance to register
//! its tasks, and then only queried. Resolution never writes to it: changes the
//! resolver wants are returned as [`TaskMutation`] values and applied afterwards.

pub mod manifest;
pub mod snapshot;
pub mod task;

pub use manifest::{load_manifest, ProjectManifest};
pub use snapshot::{Artifact, Configuration, ProjectSnapshot, SourceSet};
pub use task::{ArchiveSpec, TaskMutation, TaskSpec};

use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SPRING_BOOT_PLUGIN_ID: &str = "org.springframework.boot";

/// Queries the resolver and classifier run against the host build.
pub trait ProjectInventory {
    fn project_dir(&self) -> &Path;

    fn build_dir(&self) -> PathBuf;

    fn task(&self, name: &str) -> Option<&TaskSpec>;

    fn has_plugin(&self, id: &str) -> bool;

    fn source_set(&self, name: &str) -> Option<&SourceSet>;

    fn configuration(&self, name: &str) -> Option<&Configuration>;

    fn has_task(&self, name: &str) -> bool {
        self.task(name).is_some()
    }

    /// Declared output files of a task, `None` when the task does not exist.
    fn task_outputs(&self, name: &str) -> Option<Vec<PathBuf>> {
        self.task(name)
            .map(|task| task.output_files(self.project_dir(), &self.build_dir()))
    }
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to read project manifest {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse project manifest {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Unsupported manifest format: {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(PathBuf),

    #[error("Task '{0}' does not exist in the project")]
    UnknownTask(String),

    #[error("Task '{0}' does not produce an archive, cannot set a classifier")]
    NotAnArchive(String),
}
