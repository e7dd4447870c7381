//! State threaded through the planning phases

use crate::config::TinyJibConfig;
use crate::entrypoint::EntrypointPlan;
use crate::layers::InputLayers;
use crate::params::{JibExtension, OutputPaths};
use crate::project::{ProjectManifest, ProjectSnapshot, TaskMutation};
use crate::resolver::{Classification, Resolution};
use anyhow::{anyhow, Result};

use super::plan::{ContainerizationPlan, ImagePlan};

/// Owns the project inventory and every intermediate result. Each phase fills
/// one slot and reads the slots of the phases before it.
pub struct PlanContext {
    pub project: ProjectSnapshot,
    pub extension: JibExtension,
    pub config: TinyJibConfig,

    pub classification: Option<Classification>,
    pub resolution: Option<Resolution>,
    /// Mutations already written back to `project`
    pub applied: Vec<TaskMutation>,
    pub layers: Option<InputLayers>,
    pub entrypoint: Option<EntrypointPlan>,
    pub image: Option<ImagePlan>,
    pub output_paths: Option<OutputPaths>,
    pub plan: Option<ContainerizationPlan>,
}

impl PlanContext {
    pub fn new(project: ProjectSnapshot, extension: JibExtension, config: TinyJibConfig) -> Self {
        Self {
            project,
            extension,
            config,
            classification: None,
            resolution: None,
            applied: Vec::new(),
            layers: None,
            entrypoint: None,
            image: None,
            output_paths: None,
            plan: None,
        }
    }

    pub fn from_manifest(manifest: ProjectManifest, config: TinyJibConfig) -> Self {
        Self::new(manifest.project, manifest.jib, config)
    }
}

/// Borrows the result of an earlier phase.
pub fn require<'a, T>(slot: &'a Option<T>, what: &str) -> Result<&'a T> {
    slot.as_ref()
        .ok_or_else(|| anyhow!("{} is not available yet; phases ran out of order", what))
}
