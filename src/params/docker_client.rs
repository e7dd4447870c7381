use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_DOCKER_EXECUTABLE: &str = "docker";

/// How the daemon-load task reaches the local Docker daemon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DockerClientParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executable: Option<PathBuf>,
    pub environment: BTreeMap<String, String>,
}

impl DockerClientParameters {
    pub fn executable(&self) -> &Path {
        self.executable
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_DOCKER_EXECUTABLE))
    }
}
