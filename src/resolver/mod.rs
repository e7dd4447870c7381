//! Packaging classification and task dependency resolution
//!
//! Both steps are pure functions over a [`ProjectInventory`](crate::project::ProjectInventory).
//! Changes to upstream tasks are returned, never applied here.

pub mod classifier;
pub mod dependencies;

pub use classifier::{classify, Classification, PackagingMode, WebArchiveMode, PACKAGED_MODE};
pub use dependencies::{
    Resolution, TaskDependency, TaskDependencyEdge, TaskDependencyResolver, BOOT_JAR_TASK,
    JAR_TASK, ORIGINAL_CLASSIFIER,
};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error(
        "Both 'bootJar' and 'jar' tasks are enabled, but they write their jar file into the same location at {path}. Did you forget to set 'archiveClassifier' on either task?"
    )]
    ConfigurationConflict { path: String },

    #[error("Task '{name}' not found; packaged containerizing mode requires it")]
    MissingConventionalTask { name: String },

    #[error("Source set '{name}' not found")]
    MissingSourceSet { name: String },

    #[error("Configuration '{name}' not found")]
    MissingConfiguration { name: String },
}
