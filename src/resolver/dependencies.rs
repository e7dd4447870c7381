use super::{Classification, ResolveError};
use crate::project::task::display_outputs;
use crate::project::{ProjectInventory, TaskMutation, SPRING_BOOT_PLUGIN_ID};
use crate::tasks::ContainerizationTask;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

pub const JAR_TASK: &str = "jar";
pub const BOOT_JAR_TASK: &str = "bootJar";
pub const ORIGINAL_CLASSIFIER: &str = "original";

/// Something a containerization task must wait on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TaskDependency {
    Task { name: String },
    #[serde(rename_all = "camelCase")]
    RuntimeClasspath { source_set: String },
    Configuration { name: String },
}

impl TaskDependency {
    fn task(name: &str) -> Self {
        TaskDependency::Task {
            name: name.to_string(),
        }
    }
}

impl fmt::Display for TaskDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskDependency::Task { name } => write!(f, "task '{}'", name),
            TaskDependency::RuntimeClasspath { source_set } => {
                write!(f, "runtime classpath of source set '{}'", source_set)
            }
            TaskDependency::Configuration { name } => write!(f, "configuration '{}'", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskDependencyEdge {
    pub task: ContainerizationTask,
    pub dependency: TaskDependency,
}

impl fmt::Display for TaskDependencyEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.task, self.dependency)
    }
}

/// Upstream requirements shared by every containerization task, plus the
/// task changes needed to keep archive outputs apart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub dependencies: Vec<TaskDependency>,
    pub mutations: Vec<TaskMutation>,
}

impl Resolution {
    fn depend_on(&mut self, dependency: TaskDependency) {
        if !self.dependencies.contains(&dependency) {
            self.dependencies.push(dependency);
        }
    }

    fn mutate(&mut self, mutation: TaskMutation) {
        info!(mutation = %mutation, "Scheduling task mutation");
        self.mutations.push(mutation);
    }

    /// The same dependency list fanned out to each containerization task.
    pub fn edges(&self) -> Vec<TaskDependencyEdge> {
        ContainerizationTask::ALL
            .iter()
            .flat_map(|task| {
                self.dependencies.iter().map(move |dependency| TaskDependencyEdge {
                    task: *task,
                    dependency: dependency.clone(),
                })
            })
            .collect()
    }
}

pub struct TaskDependencyResolver<'a> {
    project: &'a dyn ProjectInventory,
    configuration_name: &'a str,
    source_set_name: &'a str,
}

impl<'a> TaskDependencyResolver<'a> {
    pub fn new(
        project: &'a dyn ProjectInventory,
        configuration_name: &'a str,
        source_set_name: &'a str,
    ) -> Self {
        Self {
            project,
            configuration_name,
            source_set_name,
        }
    }

    pub fn resolve(&self, classification: &Classification) -> Result<Resolution, ResolveError> {
        let mut resolution = Resolution::default();

        if !classification.web_archive.is_none() {
            for name in classification.web_archive.task_names() {
                if self.project.has_task(name) {
                    resolution.depend_on(TaskDependency::task(name));
                }
            }
        } else if classification.is_packaged() {
            self.resolve_packaged(&mut resolution)?;
        }

        self.resolve_classpath(&mut resolution)?;

        debug!(
            classification = %classification,
            dependencies = resolution.dependencies.len(),
            mutations = resolution.mutations.len(),
            "Resolved containerization dependencies"
        );

        Ok(resolution)
    }

    fn resolve_packaged(&self, resolution: &mut Resolution) -> Result<(), ResolveError> {
        let jar = self
            .project
            .task(JAR_TASK)
            .ok_or_else(|| ResolveError::MissingConventionalTask {
                name: JAR_TASK.to_string(),
            })?;

        if self.project.has_plugin(SPRING_BOOT_PLUGIN_ID) {
            if let Some(boot_jar) = self.project.task(BOOT_JAR_TASK).filter(|t| t.enabled) {
                let project_dir = self.project.project_dir();
                let build_dir = self.project.build_dir();
                let jar_outputs = jar.output_files(project_dir, &build_dir);
                let boot_jar_outputs = boot_jar.output_files(project_dir, &build_dir);

                if !jar_outputs.is_empty() && jar_outputs == boot_jar_outputs {
                    if jar.enabled {
                        return Err(ResolveError::ConfigurationConflict {
                            path: display_outputs(&jar_outputs),
                        });
                    }
                    resolution.mutate(TaskMutation::SetClassifier {
                        task: JAR_TASK.to_string(),
                        classifier: ORIGINAL_CLASSIFIER.to_string(),
                    });
                }
            }

            // jar's output is what gets containerized, never bootJar's
            if !jar.enabled {
                resolution.mutate(TaskMutation::SetEnabled {
                    task: JAR_TASK.to_string(),
                    enabled: true,
                });
            }
        }

        resolution.depend_on(TaskDependency::task(JAR_TASK));
        Ok(())
    }

    fn resolve_classpath(&self, resolution: &mut Resolution) -> Result<(), ResolveError> {
        if self.project.source_set(self.source_set_name).is_none() {
            return Err(ResolveError::MissingSourceSet {
                name: self.source_set_name.to_string(),
            });
        }
        if self.project.configuration(self.configuration_name).is_none() {
            return Err(ResolveError::MissingConfiguration {
                name: self.configuration_name.to_string(),
            });
        }

        resolution.depend_on(TaskDependency::RuntimeClasspath {
            source_set: self.source_set_name.to_string(),
        });
        resolution.depend_on(TaskDependency::Configuration {
            name: self.configuration_name.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{
        ArchiveSpec, Configuration, ProjectSnapshot, SourceSet, TaskSpec,
    };
    use crate::resolver::classify;

    fn base_project() -> ProjectSnapshot {
        ProjectSnapshot::new("demo", "/repo")
            .with_source_set("main", SourceSet::default())
            .with_configuration("runtimeClasspath", Configuration::default())
            .with_task(JAR_TASK, TaskSpec::archive(ArchiveSpec::new("demo").with_version("1.0")))
    }

    fn spring_project(jar_enabled: bool) -> ProjectSnapshot {
        let mut jar = TaskSpec::archive(ArchiveSpec::new("demo").with_version("1.0"));
        jar.enabled = jar_enabled;
        base_project()
            .with_plugin(SPRING_BOOT_PLUGIN_ID)
            .with_task(JAR_TASK, jar)
            .with_task(
                BOOT_JAR_TASK,
                TaskSpec::archive(ArchiveSpec::new("demo").with_version("1.0")),
            )
    }

    fn resolve(project: &ProjectSnapshot, mode: &str) -> Result<Resolution, ResolveError> {
        let classification = classify(project, mode);
        TaskDependencyResolver::new(project, "runtimeClasspath", "main").resolve(&classification)
    }

    fn classpath_dependencies() -> Vec<TaskDependency> {
        vec![
            TaskDependency::RuntimeClasspath {
                source_set: "main".to_string(),
            },
            TaskDependency::Configuration {
                name: "runtimeClasspath".to_string(),
            },
        ]
    }

    #[test]
    fn test_exploded_has_only_classpath_edges() {
        let resolution = resolve(&spring_project(false), "exploded").unwrap();
        assert_eq!(resolution.dependencies, classpath_dependencies());
        assert!(resolution.mutations.is_empty());
    }

    #[test]
    fn test_packaged_without_spring_boot_leaves_jar_alone() {
        let mut project = base_project();
        project.tasks.get_mut(JAR_TASK).unwrap().enabled = false;

        let resolution = resolve(&project, "packaged").unwrap();
        assert_eq!(resolution.dependencies[0], TaskDependency::task(JAR_TASK));
        assert_eq!(resolution.dependencies.len(), 3);
        assert!(resolution.mutations.is_empty());
    }

    #[test]
    fn test_collision_with_disabled_jar_sets_classifier_and_enables() {
        let resolution = resolve(&spring_project(false), "packaged").unwrap();
        assert_eq!(
            resolution.mutations,
            vec![
                TaskMutation::SetClassifier {
                    task: JAR_TASK.to_string(),
                    classifier: ORIGINAL_CLASSIFIER.to_string(),
                },
                TaskMutation::SetEnabled {
                    task: JAR_TASK.to_string(),
                    enabled: true,
                },
            ]
        );
    }

    #[test]
    fn test_collision_with_enabled_jar_is_a_conflict() {
        let err = resolve(&spring_project(true), "packaged").unwrap_err();
        assert_eq!(
            err,
            ResolveError::ConfigurationConflict {
                path: "/repo/build/libs/demo-1.0.jar".to_string()
            }
        );
        assert!(err
            .to_string()
            .contains("same location at /repo/build/libs/demo-1.0.jar"));
    }

    #[test]
    fn test_no_collision_still_enables_jar() {
        let mut project = spring_project(false);
        project
            .tasks
            .get_mut(BOOT_JAR_TASK)
            .unwrap()
            .archive
            .as_mut()
            .unwrap()
            .classifier = Some("boot".to_string());

        let resolution = resolve(&project, "packaged").unwrap();
        assert_eq!(
            resolution.mutations,
            vec![TaskMutation::SetEnabled {
                task: JAR_TASK.to_string(),
                enabled: true,
            }]
        );
    }

    #[test]
    fn test_disabled_boot_jar_skips_collision_check() {
        let mut project = spring_project(true);
        project.tasks.get_mut(BOOT_JAR_TASK).unwrap().enabled = false;

        let resolution = resolve(&project, "packaged").unwrap();
        assert!(resolution.mutations.is_empty());
    }

    #[test]
    fn test_packaged_requires_jar_task() {
        let mut project = base_project();
        project.tasks.remove(JAR_TASK);

        assert_eq!(
            resolve(&project, "packaged").unwrap_err(),
            ResolveError::MissingConventionalTask {
                name: JAR_TASK.to_string()
            }
        );
    }

    #[test]
    fn test_web_archive_wins_over_packaged() {
        let project = spring_project(true)
            .with_task("war", TaskSpec::archive(ArchiveSpec::new("demo").with_extension("war")))
            .with_task(
                "bootWar",
                TaskSpec::archive(ArchiveSpec::new("demo").with_extension("war")),
            );

        let resolution = resolve(&project, "packaged").unwrap();
        assert_eq!(resolution.dependencies[0], TaskDependency::task("war"));
        assert_eq!(resolution.dependencies[1], TaskDependency::task("bootWar"));
        assert!(!resolution.dependencies.contains(&TaskDependency::task(JAR_TASK)));
        assert!(resolution.mutations.is_empty());
    }

    #[test]
    fn test_missing_configuration() {
        let mut project = base_project();
        project.configurations.clear();
        assert!(matches!(
            resolve(&project, "exploded"),
            Err(ResolveError::MissingConfiguration { name }) if name == "runtimeClasspath"
        ));
    }

    #[test]
    fn test_edges_are_identical_for_every_task() {
        let resolution = resolve(&spring_project(false), "packaged").unwrap();
        let edges = resolution.edges();
        assert_eq!(edges.len(), 3 * resolution.dependencies.len());

        for task in ContainerizationTask::ALL {
            let deps: Vec<_> = edges
                .iter()
                .filter(|e| e.task == task)
                .map(|e| e.dependency.clone())
                .collect();
            assert_eq!(deps, resolution.dependencies);
        }
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let project = spring_project(false);
        let first = resolve(&project, "packaged").unwrap();
        let second = resolve(&project, "packaged").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.edges(), second.edges());
    }
}
