//! Containerization inputs, grouped the way the image layers are built
//!
//! Dependencies come from the resolved dependency configuration. Anything that
//! is really the project's own output (classes directories, the resources
//! directory) is filtered out before the remaining files are split into project,
//! snapshot and release dependencies.

use crate::project::{Artifact, ProjectInventory};
use crate::resolver::{Classification, ResolveError, JAR_TASK};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ApplicationLayer {
    /// Compiled classes and resources copied as-is.
    Exploded {
        classes: Vec<PathBuf>,
        #[serde(skip_serializing_if = "Option::is_none")]
        resources: Option<PathBuf>,
    },
    /// Archive files produced by an upstream task.
    Archive { task: String, files: Vec<PathBuf> },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyLayers {
    pub dependencies: Vec<Artifact>,
    pub snapshot_dependencies: Vec<Artifact>,
    pub project_dependencies: Vec<Artifact>,
}

impl DependencyLayers {
    /// Every dependency in layer order.
    pub fn all(&self) -> impl Iterator<Item = &Artifact> {
        self.dependencies
            .iter()
            .chain(&self.snapshot_dependencies)
            .chain(&self.project_dependencies)
    }

    pub fn len(&self) -> usize {
        self.dependencies.len() + self.snapshot_dependencies.len() + self.project_dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputLayers {
    pub dependencies: DependencyLayers,
    pub application: Vec<ApplicationLayer>,
}

fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

pub fn collect_input_layers(
    project: &dyn ProjectInventory,
    classification: &Classification,
    source_set_name: &str,
    configuration_name: &str,
) -> Result<InputLayers, ResolveError> {
    let project_dir = project.project_dir();
    let source_set = project
        .source_set(source_set_name)
        .ok_or_else(|| ResolveError::MissingSourceSet {
            name: source_set_name.to_string(),
        })?;
    let configuration =
        project
            .configuration(configuration_name)
            .ok_or_else(|| ResolveError::MissingConfiguration {
                name: configuration_name.to_string(),
            })?;

    let classes: Vec<PathBuf> = source_set
        .classes_dirs
        .iter()
        .map(|dir| absolutize(project_dir, dir))
        .collect();
    let resources = source_set
        .resources_dir
        .as_deref()
        .map(|dir| absolutize(project_dir, dir));

    let mut dependencies = DependencyLayers::default();
    for artifact in &configuration.artifacts {
        let file = absolutize(project_dir, &artifact.file);
        if classes.contains(&file) || resources.as_ref() == Some(&file) {
            continue;
        }

        let artifact = Artifact {
            file,
            ..artifact.clone()
        };
        if artifact.is_project_dependency() {
            dependencies.project_dependencies.push(artifact);
        } else if artifact.is_snapshot() {
            dependencies.snapshot_dependencies.push(artifact);
        } else {
            dependencies.dependencies.push(artifact);
        }
    }

    let archive = |task: &str| {
        project.task_outputs(task).map(|files| ApplicationLayer::Archive {
            task: task.to_string(),
            files,
        })
    };

    let application = if !classification.web_archive.is_none() {
        classification
            .web_archive
            .task_names()
            .iter()
            .filter_map(|&task| archive(task))
            .collect()
    } else if classification.is_packaged() {
        archive(JAR_TASK).into_iter().collect()
    } else {
        vec![ApplicationLayer::Exploded { classes, resources }]
    };

    Ok(InputLayers {
        dependencies,
        application,
    })
}
