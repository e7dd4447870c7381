//! Output formatting for plans, output paths and configuration
//!
//! JSON and YAML render the serialized structures as-is; the human format is a
//! compact summary meant for terminals.

use anyhow::{Context, Result};

use crate::config::TinyJibConfig;
use crate::layers::ApplicationLayer;
use crate::params::{OutputPaths, OutputSlot};
use crate::pipeline::ContainerizationPlan;

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format (human-friendly, version-control friendly)
    Yaml,
    /// Human-readable formatted text
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

fn branch(is_last: bool) -> &'static str {
    if is_last {
        "\u{2514}\u{2500}"
    } else {
        "\u{251C}\u{2500}"
    }
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_plan(&self, plan: &ContainerizationPlan) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(plan).context("Failed to serialize plan to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(plan).context("Failed to serialize plan to YAML")
            }
            OutputFormat::Human => Ok(self.format_plan_human(plan)),
        }
    }

    pub fn format_paths(&self, paths: &OutputPaths) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(paths)
                .context("Failed to serialize output paths to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(paths).context("Failed to serialize output paths to YAML")
            }
            OutputFormat::Human => {
                let mut output = String::new();
                for slot in OutputSlot::ALL {
                    output.push_str(&format!("{:<10} {}\n", slot, paths.get(slot).display()));
                }
                Ok(output)
            }
        }
    }

    pub fn format_config(&self, config: &TinyJibConfig) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&config.to_display_map())
                .context("Failed to serialize config to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(&config.to_display_map())
                .context("Failed to serialize config to YAML"),
            OutputFormat::Human => Ok(config.to_string()),
        }
    }

    fn format_plan_human(&self, plan: &ContainerizationPlan) -> String {
        let mut output = String::new();

        output.push_str(&format!("\u{2713} Containerization Plan: {}\n", plan.project));
        output.push_str(&format!("{}\n\n", RULE));
        output.push_str(&format!("Project Dir:     {}\n", plan.project_dir.display()));
        output.push_str(&format!("Packaging:       {}\n\n", plan.classification));

        // every task shares the same dependency list
        if let Some(first) = plan.tasks.first() {
            let names: Vec<&str> = plan.tasks.iter().map(|t| t.name.as_str()).collect();
            output.push_str(&format!("Tasks ({}):\n", names.join(", ")));
            for (i, dependency) in first.depends_on.iter().enumerate() {
                output.push_str(&format!(
                    "{} depends on {}\n",
                    branch(i + 1 == first.depends_on.len()),
                    dependency
                ));
            }
            output.push('\n');
        }

        if !plan.mutations.is_empty() {
            output.push_str("Task Adjustments:\n");
            for (i, mutation) in plan.mutations.iter().enumerate() {
                output.push_str(&format!(
                    "{} {}\n",
                    branch(i + 1 == plan.mutations.len()),
                    mutation
                ));
            }
            output.push('\n');
        }

        output.push_str("Layers:\n");
        let deps = &plan.layers.dependencies;
        output.push_str(&format!(
            "\u{251C}\u{2500} Dependencies:          {}\n",
            deps.dependencies.len()
        ));
        output.push_str(&format!(
            "\u{251C}\u{2500} Snapshot dependencies: {}\n",
            deps.snapshot_dependencies.len()
        ));
        output.push_str(&format!(
            "\u{251C}\u{2500} Project dependencies:  {}\n",
            deps.project_dependencies.len()
        ));
        for (i, layer) in plan.layers.application.iter().enumerate() {
            let connector = branch(i + 1 == plan.layers.application.len());
            match layer {
                ApplicationLayer::Exploded { classes, resources } => {
                    output.push_str(&format!(
                        "{} Application:           {} classes dir(s){}\n",
                        connector,
                        classes.len(),
                        if resources.is_some() { " + resources" } else { "" }
                    ));
                }
                ApplicationLayer::Archive { task, files } => {
                    for file in files {
                        output.push_str(&format!(
                            "{} Application:           {} ({})\n",
                            connector,
                            file.display(),
                            task
                        ));
                    }
                }
            }
        }
        output.push('\n');

        output.push_str("Container:\n");
        let entrypoint = match &plan.entrypoint.entrypoint {
            Some(entrypoint) => entrypoint.join(" "),
            None if plan.entrypoint.main_class_unresolved => {
                "(unresolved, container.mainClass is not set)".to_string()
            }
            None => "(inherited)".to_string(),
        };
        output.push_str(&format!("\u{251C}\u{2500} Entrypoint: {}\n", entrypoint));
        output.push_str(&format!("\u{251C}\u{2500} Format:     {}\n", plan.image.format));
        output.push_str(&format!("\u{2514}\u{2500} App Root:   {}\n\n", plan.image.app_root));

        output.push_str("Outputs:\n");
        for (i, slot) in OutputSlot::ALL.iter().enumerate() {
            output.push_str(&format!(
                "{} {:<10} {}\n",
                branch(i + 1 == OutputSlot::ALL.len()),
                slot,
                plan.output_paths.get(*slot).display()
            ));
        }

        output
    }
}
