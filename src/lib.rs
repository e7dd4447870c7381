//! tinyjib - containerization task planning for JVM projects
//!
//! Given a frozen inventory of a project's build (tasks, applied plugins,
//! source sets and dependency configurations) and its jib settings, tinyjib
//! decides which upstream tasks the `jib`, `jibDockerBuild` and `jibBuildTar`
//! tasks depend on, reconciles the output collision between `jar` and
//! `bootJar` in packaged mode, and resolves where image output files land.
//!
//! # Pipeline
//!
//! Planning runs in two halves. Classification and resolution read the
//! inventory through [`ProjectInventory`] and only describe changes as
//! [`TaskMutation`] values; a single apply phase writes them back. A
//! configuration conflict therefore aborts before anything is modified.
//!
//! ```no_run
//! use tinyjib::{plan_manifest, TinyJibConfig};
//! use std::path::Path;
//!
//! let plan = plan_manifest(Path::new("tinyjib.yaml"), TinyJibConfig::default(), None)?;
//! for edge in plan.edges() {
//!     println!("{}", edge);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! # Project Structure
//!
//! - [`project`]: inventory snapshot, task specs and manifest loading
//! - [`params`]: the jib extension and its parameter groups
//! - [`resolver`]: packaging classification and task dependency resolution
//! - [`pipeline`]: phase orchestration producing a [`ContainerizationPlan`]
//! - [`outputs`]: files written after an image is built

pub mod cli;
pub mod config;
pub mod entrypoint;
pub mod layers;
pub mod outputs;
pub mod params;
pub mod pipeline;
pub mod progress;
pub mod project;
pub mod resolver;
pub mod tasks;
pub mod util;

pub use config::{ConfigError, TinyJibConfig};
pub use params::{JibExtension, OutputPaths, ParamError};
pub use pipeline::{plan_manifest, ContainerizationPlan, PlanContext, PlanOrchestrator};
pub use project::{ProjectInventory, ProjectSnapshot, SnapshotError, TaskMutation};
pub use resolver::{
    classify, Classification, ResolveError, TaskDependency, TaskDependencyEdge,
    TaskDependencyResolver,
};
pub use tasks::ContainerizationTask;
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
