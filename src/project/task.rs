use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

const LIBS_DIR: &str = "libs";

fn default_extension() -> String {
    "jar".to_string()
}

fn enabled_by_default() -> bool {
    true
}

/// Output naming of an archive-producing task, following Gradle's
/// `[baseName]-[appendix]-[version]-[classifier].[extension]` convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveSpec {
    /// Relative to the project directory; `<buildDir>/libs` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_directory: Option<PathBuf>,
    pub base_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appendix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Explicit file name; when set, the naming parts above are ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl ArchiveSpec {
    pub fn new(base_name: impl Into<String>) -> Self {
        Self {
            destination_directory: None,
            base_name: base_name.into(),
            appendix: None,
            version: None,
            classifier: None,
            extension: default_extension(),
            file_name: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn file_name(&self) -> String {
        if let Some(name) = &self.file_name {
            return name.clone();
        }

        let stem = [
            Some(self.base_name.as_str()),
            self.appendix.as_deref(),
            self.version.as_deref(),
            self.classifier.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

        if self.extension.is_empty() {
            stem
        } else {
            format!("{}.{}", stem, self.extension)
        }
    }

    pub fn output_file(&self, project_dir: &Path, build_dir: &Path) -> PathBuf {
        let directory = match &self.destination_directory {
            Some(dir) => resolve_against(project_dir, dir),
            None => build_dir.join(LIBS_DIR),
        };
        directory.join(self.file_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSpec {
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive: Option<ArchiveSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<PathBuf>,
}

impl Default for TaskSpec {
    fn default() -> Self {
        Self {
            enabled: true,
            archive: None,
            outputs: Vec::new(),
        }
    }
}

impl TaskSpec {
    pub fn archive(spec: ArchiveSpec) -> Self {
        Self {
            archive: Some(spec),
            ..Default::default()
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn output_files(&self, project_dir: &Path, build_dir: &Path) -> Vec<PathBuf> {
        self.archive
            .iter()
            .map(|archive| archive.output_file(project_dir, build_dir))
            .chain(self.outputs.iter().map(|p| resolve_against(project_dir, p)))
            .collect()
    }
}

fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Renders output files the way a classpath-style path string would list them.
pub fn display_outputs(files: &[PathBuf]) -> String {
    files
        .iter()
        .map(|f| f.display().to_string())
        .collect::<Vec<_>>()
        .join(":")
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TaskMutation {
    SetClassifier { task: String, classifier: String },
    SetEnabled { task: String, enabled: bool },
}

impl TaskMutation {
    pub fn task(&self) -> &str {
        match self {
            TaskMutation::SetClassifier { task, .. } | TaskMutation::SetEnabled { task, .. } => task,
        }
    }
}

impl fmt::Display for TaskMutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskMutation::SetClassifier { task, classifier } => {
                write!(f, "set archiveClassifier of '{}' to '{}'", task, classifier)
            }
            TaskMutation::SetEnabled { task, enabled: true } => write!(f, "enable '{}'", task),
            TaskMutation::SetEnabled {
                task,
                enabled: false,
            } => write!(f, "disable '{}'", task),
        }
    }
}
