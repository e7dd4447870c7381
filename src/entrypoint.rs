//! Container entrypoint and JVM classpath
//!
//! Without an explicit entrypoint the container runs
//! `java <jvmFlags> -cp @<appRoot>/jib-classpath-file <mainClass>`, reading the
//! classpath from an argument file written into the image. The main class is
//! written next to it so tools inside the image can find it.

use crate::params::ContainerConfig;
use crate::project::Artifact;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::warn;

pub const CLASSPATH_FILE: &str = "jib-classpath-file";
pub const MAIN_CLASS_FILE: &str = "jib-main-class-file";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrypointPlan {
    /// `None` keeps the base image entrypoint.
    pub entrypoint: Option<Vec<String>>,
    pub args: Option<Vec<String>>,
    pub classpath: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_class: Option<String>,
    /// Set when the entrypoint has to be derived but no main class is configured.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub main_class_unresolved: bool,
    /// Files added under `<appRoot>`, keyed by their path in the image.
    pub app_root_files: BTreeMap<String, String>,
}

impl EntrypointPlan {
    /// Contents of the classpath argument file.
    pub fn classpath_file_content(&self) -> String {
        self.classpath.join(":")
    }
}

fn container_path(root: &str, child: &str) -> String {
    format!("{}/{}", root.trim_end_matches('/'), child)
}

fn artifact_size(artifact: &Artifact) -> u64 {
    artifact
        .size
        .or_else(|| fs::metadata(&artifact.file).ok().map(|m| m.len()))
        .unwrap_or(0)
}

/// Jar names under `<appRoot>/libs`. Names shared by several jars get the file
/// size appended to the stem so they can live in the same directory.
pub fn library_names(jars: &[&Artifact]) -> Vec<String> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for jar in jars {
        *counts.entry(jar.file_name()).or_default() += 1;
    }

    jars.iter()
        .map(|jar| {
            let name = jar.file_name();
            if counts.get(&name).copied().unwrap_or(0) < 2 {
                return name;
            }
            let path = Path::new(&name);
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            match path.extension() {
                Some(ext) => format!("{}-{}.{}", stem, artifact_size(jar), ext.to_string_lossy()),
                None => format!("{}-{}", stem, artifact_size(jar)),
            }
        })
        .collect()
}

fn is_jar(artifact: &Artifact) -> bool {
    artifact.file_name().to_lowercase().ends_with(".jar")
}

/// A derived entrypoint without a main class is left unset and flagged as unresolved.
pub fn plan_entrypoint<'a>(
    container: &ContainerConfig,
    dependencies: impl IntoIterator<Item = &'a Artifact>,
) -> EntrypointPlan {
    let app_root = container.effective_app_root();

    let jars: Vec<&Artifact> = dependencies.into_iter().filter(|a| is_jar(a)).collect();
    let mut classpath = container.extra_classpath.clone();
    classpath.push(container_path(app_root, "resources"));
    classpath.push(container_path(app_root, "classes"));
    let libs = container_path(app_root, "libs");
    classpath.extend(
        library_names(&jars)
            .iter()
            .map(|name| container_path(&libs, name)),
    );

    let main_class = container
        .main_class
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty());

    let explicit = container.entrypoint.as_ref().filter(|e| !e.is_empty());
    let mut main_class_unresolved = false;
    let entrypoint = match (explicit, main_class) {
        (Some(_), _) if container.inherits_entrypoint() => None,
        (Some(entrypoint), _) => Some(entrypoint.clone()),
        (None, Some(main_class)) => {
            let mut command = vec!["java".to_string()];
            command.extend(container.jvm_flags.iter().cloned());
            command.push("-cp".to_string());
            command.push(format!("@{}", container_path(app_root, CLASSPATH_FILE)));
            command.push(main_class.to_string());
            Some(command)
        }
        (None, None) => {
            warn!(
                field = "container.mainClass",
                "No main class configured, the entrypoint cannot be derived yet"
            );
            main_class_unresolved = true;
            None
        }
    };

    let mut app_root_files = BTreeMap::new();
    app_root_files.insert(container_path(app_root, CLASSPATH_FILE), classpath.join(":"));
    if let Some(main_class) = main_class {
        app_root_files.insert(
            container_path(app_root, MAIN_CLASS_FILE),
            main_class.to_string(),
        );
    }

    EntrypointPlan {
        entrypoint,
        args: container.args.clone().filter(|a| !a.is_empty()),
        classpath,
        main_class: main_class.map(str::to_string),
        main_class_unresolved,
        app_root_files,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn jar(path: &str, size: u64) -> Artifact {
        Artifact {
            file: PathBuf::from(path),
            project: None,
            size: Some(size),
        }
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_derived_entrypoint() {
        let container = ContainerConfig {
            main_class: Some("com.acme.App".to_string()),
            jvm_flags: strings(&["-Xmx256m"]),
            extra_classpath: strings(&["/opt/agent.jar"]),
            ..Default::default()
        };
        let deps = vec![jar("/m2/a.jar", 10), jar("/m2/notes.txt", 1)];

        let plan = plan_entrypoint(&container, &deps);
        assert_eq!(
            plan.entrypoint,
            Some(strings(&[
                "java",
                "-Xmx256m",
                "-cp",
                "@/app/jib-classpath-file",
                "com.acme.App"
            ]))
        );
        assert_eq!(
            plan.classpath_file_content(),
            "/opt/agent.jar:/app/resources:/app/classes:/app/libs/a.jar"
        );
        assert_eq!(
            plan.app_root_files.get("/app/jib-classpath-file"),
            Some(&plan.classpath_file_content())
        );
        assert_eq!(
            plan.app_root_files.get("/app/jib-main-class-file").map(String::as_str),
            Some("com.acme.App")
        );
        assert!(!plan.main_class_unresolved);
    }

    #[test]
    fn test_duplicate_jar_names_get_size_suffix() {
        let deps = vec![
            jar("/m2/one/util.jar", 100),
            jar("/m2/two/util.jar", 200),
            jar("/m2/core.jar", 5),
        ];
        let refs: Vec<&Artifact> = deps.iter().collect();
        assert_eq!(
            library_names(&refs),
            strings(&["util-100.jar", "util-200.jar", "core.jar"])
        );
    }

    #[test]
    fn test_inherit_entrypoint() {
        let container = ContainerConfig {
            entrypoint: Some(strings(&["INHERIT"])),
            ..Default::default()
        };
        let plan = plan_entrypoint(&container, &[]);
        assert_eq!(plan.entrypoint, None);
        assert_eq!(plan.classpath, strings(&["/app/resources", "/app/classes"]));
    }

    #[test]
    fn test_explicit_entrypoint_does_not_need_main_class() {
        let container = ContainerConfig {
            entrypoint: Some(strings(&["/bin/run.sh"])),
            args: Some(Vec::new()),
            app_root: "/srv/".to_string(),
            ..Default::default()
        };
        let plan = plan_entrypoint(&container, &[]);
        assert_eq!(plan.entrypoint, Some(strings(&["/bin/run.sh"])));
        assert_eq!(plan.args, None);
        assert_eq!(plan.classpath[0], "/srv/resources");
    }

    #[test]
    fn test_missing_main_class_leaves_entrypoint_unresolved() {
        let container = ContainerConfig {
            entrypoint: Some(Vec::new()),
            main_class: Some("  ".to_string()),
            ..Default::default()
        };
        let plan = plan_entrypoint(&container, &[]);
        assert_eq!(plan.entrypoint, None);
        assert_eq!(plan.main_class, None);
        assert!(plan.main_class_unresolved);
        assert_eq!(
            plan.app_root_files.keys().collect::<Vec<_>>(),
            vec!["/app/jib-classpath-file"]
        );
    }

    #[test]
    fn test_inherit_is_not_an_unresolved_main_class() {
        let container = ContainerConfig {
            entrypoint: Some(strings(&["INHERIT"])),
            ..Default::default()
        };
        assert!(!plan_entrypoint(&container, &[]).main_class_unresolved);
    }
}
