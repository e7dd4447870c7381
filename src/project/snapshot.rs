use super::{ProjectInventory, SnapshotError, TaskMutation, TaskSpec};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceSet {
    pub classes_dirs: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
    pub artifacts: Vec<Artifact>,
}

/// A resolved dependency file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub file: PathBuf,
    /// Path of the producing project when the dependency is another project of the same build.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl Artifact {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            project: None,
            size: None,
        }
    }

    pub fn file_name(&self) -> String {
        self.file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn is_project_dependency(&self) -> bool {
        self.project.is_some()
    }

    pub fn is_snapshot(&self) -> bool {
        self.file_name().contains("SNAPSHOT")
    }
}

/// Everything the plugin reads from a project once evaluation has finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub project_dir: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_dir: Option<PathBuf>,
    #[serde(default)]
    pub tasks: BTreeMap<String, TaskSpec>,
    #[serde(default)]
    pub plugins: BTreeSet<String>,
    #[serde(default)]
    pub source_sets: BTreeMap<String, SourceSet>,
    #[serde(default)]
    pub configurations: BTreeMap<String, Configuration>,
}

impl ProjectSnapshot {
    pub fn new(name: impl Into<String>, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            project_dir: project_dir.into(),
            build_dir: None,
            tasks: BTreeMap::new(),
            plugins: BTreeSet::new(),
            source_sets: BTreeMap::new(),
            configurations: BTreeMap::new(),
        }
    }

    pub fn with_task(mut self, name: impl Into<String>, task: TaskSpec) -> Self {
        self.tasks.insert(name.into(), task);
        self
    }

    pub fn with_plugin(mut self, id: impl Into<String>) -> Self {
        self.plugins.insert(id.into());
        self
    }

    pub fn with_source_set(mut self, name: impl Into<String>, source_set: SourceSet) -> Self {
        self.source_sets.insert(name.into(), source_set);
        self
    }

    pub fn with_configuration(mut self, name: impl Into<String>, configuration: Configuration) -> Self {
        self.configurations.insert(name.into(), configuration);
        self
    }

    /// Applies a single resolver decision. Applying the same mutation twice is a no-op.
    pub fn apply(&mut self, mutation: &TaskMutation) -> Result<(), SnapshotError> {
        let task = self
            .tasks
            .get_mut(mutation.task())
            .ok_or_else(|| SnapshotError::UnknownTask(mutation.task().to_string()))?;

        match mutation {
            TaskMutation::SetClassifier { task: name, classifier } => {
                let archive = task
                    .archive
                    .as_mut()
                    .ok_or_else(|| SnapshotError::NotAnArchive(name.clone()))?;
                archive.classifier = Some(classifier.clone());
            }
            TaskMutation::SetEnabled { enabled, .. } => task.enabled = *enabled,
        }
        Ok(())
    }

    pub fn apply_all<'a>(
        &mut self,
        mutations: impl IntoIterator<Item = &'a TaskMutation>,
    ) -> Result<(), SnapshotError> {
        mutations.into_iter().try_for_each(|m| self.apply(m))
    }
}

impl ProjectInventory for ProjectSnapshot {
    fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    fn build_dir(&self) -> PathBuf {
        match &self.build_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => self.project_dir.join(dir),
            None => self.project_dir.join("build"),
        }
    }

    fn task(&self, name: &str) -> Option<&TaskSpec> {
        self.tasks.get(name)
    }

    fn has_plugin(&self, id: &str) -> bool {
        self.plugins.contains(id)
    }

    fn source_set(&self, name: &str) -> Option<&SourceSet> {
        self.source_sets.get(name)
    }

    fn configuration(&self, name: &str) -> Option<&Configuration> {
        self.configurations.get(name)
    }
}
