use crate::project::{ProjectInventory, SPRING_BOOT_PLUGIN_ID};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const PACKAGED_MODE: &str = "packaged";
pub const WAR_TASK: &str = "war";
pub const BOOT_WAR_TASK: &str = "bootWar";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackagingMode {
    Exploded,
    Packaged,
}

impl PackagingMode {
    /// Only the exact string `packaged` selects packaged mode.
    pub fn from_declared(mode: &str) -> Self {
        if mode == PACKAGED_MODE {
            PackagingMode::Packaged
        } else {
            PackagingMode::Exploded
        }
    }
}

impl fmt::Display for PackagingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackagingMode::Exploded => f.write_str("exploded"),
            PackagingMode::Packaged => f.write_str("packaged"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WebArchiveMode {
    None,
    War,
    BootWar,
    WarAndBootWar,
}

impl WebArchiveMode {
    fn from_flags(war: bool, boot_war: bool) -> Self {
        match (war, boot_war) {
            (false, false) => WebArchiveMode::None,
            (true, false) => WebArchiveMode::War,
            (false, true) => WebArchiveMode::BootWar,
            (true, true) => WebArchiveMode::WarAndBootWar,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, WebArchiveMode::None)
    }

    /// Web archive tasks the containerization tasks must wait on.
    pub fn task_names(&self) -> &'static [&'static str] {
        match self {
            WebArchiveMode::None => &[],
            WebArchiveMode::War => &[WAR_TASK],
            WebArchiveMode::BootWar => &[BOOT_WAR_TASK],
            WebArchiveMode::WarAndBootWar => &[WAR_TASK, BOOT_WAR_TASK],
        }
    }
}

/// Verdict of the packaging classifier. `packaging` is `None` whenever a web
/// archive is in play, since the declared containerizing mode is then ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub web_archive: WebArchiveMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packaging: Option<PackagingMode>,
}

impl Classification {
    pub fn is_packaged(&self) -> bool {
        self.web_archive.is_none() && self.packaging == Some(PackagingMode::Packaged)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.web_archive, self.packaging) {
            (WebArchiveMode::None, Some(mode)) => write!(f, "{}", mode),
            (WebArchiveMode::None, None) => f.write_str("exploded"),
            (web, _) => write!(f, "web archive ({})", web.task_names().join(", ")),
        }
    }
}

pub fn classify(project: &dyn ProjectInventory, containerizing_mode: &str) -> Classification {
    let war = project.has_task(WAR_TASK);
    let boot_war = project.has_task(BOOT_WAR_TASK) && project.has_plugin(SPRING_BOOT_PLUGIN_ID);
    let web_archive = WebArchiveMode::from_flags(war, boot_war);

    let packaging = if web_archive.is_none() {
        Some(PackagingMode::from_declared(containerizing_mode))
    } else {
        None
    };

    Classification {
        web_archive,
        packaging,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{ArchiveSpec, ProjectSnapshot, TaskSpec};
    use yare::parameterized;

    fn project(tasks: &[&str], spring_boot: bool) -> ProjectSnapshot {
        let mut snapshot = ProjectSnapshot::new("demo", "/repo");
        for name in tasks {
            snapshot = snapshot.with_task(*name, TaskSpec::archive(ArchiveSpec::new("demo")));
        }
        if spring_boot {
            snapshot = snapshot.with_plugin(SPRING_BOOT_PLUGIN_ID);
        }
        snapshot
    }

    #[parameterized(
        packaged = { "packaged", PackagingMode::Packaged },
        exploded = { "exploded", PackagingMode::Exploded },
        empty = { "", PackagingMode::Exploded },
        upper_case = { "PACKAGED", PackagingMode::Exploded },
        unknown = { "fat", PackagingMode::Exploded },
    )]
    fn test_declared_mode(declared: &str, expected: PackagingMode) {
        let verdict = classify(&project(&["jar"], false), declared);
        assert_eq!(verdict.web_archive, WebArchiveMode::None);
        assert_eq!(verdict.packaging, Some(expected));
    }

    #[parameterized(
        war = { &["jar", "war"], false, WebArchiveMode::War },
        boot_war = { &["jar", "bootWar"], true, WebArchiveMode::BootWar },
        both = { &["war", "bootWar"], true, WebArchiveMode::WarAndBootWar },
        boot_war_without_plugin = { &["jar", "bootWar"], false, WebArchiveMode::None },
    )]
    fn test_web_archive_detection(tasks: &[&str], spring_boot: bool, expected: WebArchiveMode) {
        let verdict = classify(&project(tasks, spring_boot), "packaged");
        assert_eq!(verdict.web_archive, expected);
    }

    #[test]
    fn test_web_archive_skips_packaging_mode() {
        let verdict = classify(&project(&["war"], false), "packaged");
        assert_eq!(verdict.packaging, None);
        assert!(!verdict.is_packaged());
        assert_eq!(verdict.to_string(), "web archive (war)");
    }
}
