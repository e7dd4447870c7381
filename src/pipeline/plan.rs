use crate::entrypoint::EntrypointPlan;
use crate::layers::InputLayers;
use crate::params::{
    BaseImageSource, CredentialHelper, ExtraDirectoryParameters, ImageFormat, OutputPaths, Platform,
};
use crate::project::TaskMutation;
use crate::resolver::{Classification, TaskDependency, TaskDependencyEdge};
use crate::tasks::ContainerizationTask;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPlan {
    pub name: String,
    pub group: String,
    pub description: String,
    /// The daemon only accepts Docker manifests, so `jibDockerBuild` always uses them.
    pub format: ImageFormat,
    pub depends_on: Vec<TaskDependency>,
}

impl TaskPlan {
    pub fn new(task: ContainerizationTask, format: ImageFormat, depends_on: Vec<TaskDependency>) -> Self {
        let format = match task {
            ContainerizationTask::DockerDaemon => ImageFormat::Docker,
            _ => format,
        };
        Self {
            name: task.task_name().to_string(),
            group: task.group().to_string(),
            description: task.description().to_string(),
            format,
            depends_on,
        }
    }
}

/// Image-level settings handed to the image builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<BaseImageSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub tags: BTreeSet<String>,
    pub platforms: BTreeSet<Platform>,
    pub format: ImageFormat,
    pub exposed_ports: Vec<String>,
    pub volumes: Vec<String>,
    pub environment: BTreeMap<String, String>,
    pub labels: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<String>,
    pub creation_time: DateTime<Utc>,
    pub files_modification_time: DateTime<Utc>,
    pub app_root: String,
    /// Source directories resolved against the project directory
    pub extra_directories: Vec<ExtraDirectoryParameters>,
    pub extra_directory_permissions: BTreeMap<String, String>,
    pub offline: bool,
    pub allow_insecure_registries: bool,
    pub from_credential: bool,
    pub to_credential: bool,
    pub credential_helpers: Vec<CredentialHelper>,
    pub docker_config_files: Vec<PathBuf>,
    pub docker_executable: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerizationPlan {
    pub project: String,
    pub project_dir: PathBuf,
    pub build_dir: PathBuf,
    pub classification: Classification,
    pub tasks: Vec<TaskPlan>,
    pub mutations: Vec<TaskMutation>,
    pub layers: InputLayers,
    pub entrypoint: EntrypointPlan,
    pub image: ImagePlan,
    pub output_paths: OutputPaths,
}

impl ContainerizationPlan {
    pub fn task(&self, task: ContainerizationTask) -> Option<&TaskPlan> {
        self.tasks.iter().find(|t| t.name == task.task_name())
    }

    pub fn edges(&self) -> Vec<TaskDependencyEdge> {
        self.tasks
            .iter()
            .filter_map(|plan| {
                ContainerizationTask::from_task_name(&plan.name).map(|task| (task, plan))
            })
            .flat_map(|(task, plan)| {
                plan.depends_on.iter().map(move |dependency| TaskDependencyEdge {
                    task,
                    dependency: dependency.clone(),
                })
            })
            .collect()
    }
}
