use super::{ProjectSnapshot, SnapshotError};
use crate::params::JibExtension;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A frozen project inventory together with its `jib` extension block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectManifest {
    pub project: ProjectSnapshot,
    #[serde(default, alias = "tinyJib")]
    pub jib: JibExtension,
}

enum ManifestFormat {
    Yaml,
    Json,
}

fn detect_format(path: &Path) -> Result<ManifestFormat, SnapshotError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("yaml") | Some("yml") => Ok(ManifestFormat::Yaml),
        Some("json") => Ok(ManifestFormat::Json),
        _ => Err(SnapshotError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Loads a manifest from disk. A relative or missing `projectDir` is resolved
/// against the directory holding the manifest.
pub fn load_manifest(path: &Path) -> Result<ProjectManifest, SnapshotError> {
    let format = detect_format(path)?;
    let content = fs::read_to_string(path).map_err(|source| SnapshotError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parse_error = |message: String| SnapshotError::Parse {
        path: path.to_path_buf(),
        message,
    };
    let mut manifest: ProjectManifest = match format {
        ManifestFormat::Yaml => {
            serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))?
        }
        ManifestFormat::Json => {
            serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?
        }
    };

    let base = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    if manifest.project.project_dir.as_os_str().is_empty() {
        manifest.project.project_dir = base;
    } else if !manifest.project.project_dir.is_absolute() {
        manifest.project.project_dir = base.join(&manifest.project.project_dir);
    }

    debug!(
        manifest = %path.display(),
        project = %manifest.project.name,
        tasks = manifest.project.tasks.len(),
        plugins = manifest.project.plugins.len(),
        "Loaded project manifest"
    );

    Ok(manifest)
}
