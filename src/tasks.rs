//! The three containerization tasks registered on every project

use serde::{Deserialize, Serialize};
use std::fmt;

pub const TASK_GROUP: &str = "Jib";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContainerizationTask {
    /// Pushes to a remote registry.
    Registry,
    /// Loads into the local Docker daemon.
    DockerDaemon,
    /// Writes a tarball.
    Tarball,
}

impl ContainerizationTask {
    pub const ALL: [ContainerizationTask; 3] = [
        ContainerizationTask::Registry,
        ContainerizationTask::DockerDaemon,
        ContainerizationTask::Tarball,
    ];

    pub fn task_name(&self) -> &'static str {
        match self {
            ContainerizationTask::Registry => "jib",
            ContainerizationTask::DockerDaemon => "jibDockerBuild",
            ContainerizationTask::Tarball => "jibBuildTar",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ContainerizationTask::Registry => "Builds a container image to a registry.",
            ContainerizationTask::DockerDaemon => "Builds a container image to a Docker daemon.",
            ContainerizationTask::Tarball => "Builds a container image to a tarball.",
        }
    }

    pub fn group(&self) -> &'static str {
        TASK_GROUP
    }

    pub fn from_task_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|task| task.task_name() == name)
    }
}

impl fmt::Display for ContainerizationTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.task_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_names_are_unique() {
        let names: std::collections::BTreeSet<_> =
            ContainerizationTask::ALL.iter().map(|t| t.task_name()).collect();
        assert_eq!(names.len(), 3);
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(
            ContainerizationTask::from_task_name("jibBuildTar"),
            Some(ContainerizationTask::Tarball)
        );
        assert_eq!(ContainerizationTask::from_task_name("jar"), None);
        assert_eq!(ContainerizationTask::Registry.to_string(), "jib");
        assert_eq!(ContainerizationTask::DockerDaemon.group(), "Jib");
    }
}
