use super::commands::{ConfigArgs, PathsArgs, PlanArgs, RecordArgs};
use super::output::{OutputFormat, OutputFormatter};
use crate::config::TinyJibConfig;
use crate::outputs::{write_image_outputs, ImageMetadataOutput};
use crate::params::OutputPaths;
use crate::pipeline::plan_manifest;
use crate::progress::{LoggingHandler, ProgressHandler};
use crate::project::{load_manifest, ProjectInventory};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{error, info};

fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            info!(path = %path.display(), "Output written");
        }
        None => println!("{}", content.trim_end()),
    }
    Ok(())
}

fn report(result: Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

fn resolve_output_paths(manifest: &Path) -> Result<OutputPaths> {
    let manifest = load_manifest(manifest)
        .with_context(|| format!("Failed to load project manifest {}", manifest.display()))?;
    let project = &manifest.project;
    Ok(OutputPaths::resolve(
        &manifest.jib.output_paths,
        project.project_dir(),
        &project.build_dir(),
    ))
}

pub fn handle_plan(args: &PlanArgs, quiet: bool) -> i32 {
    report(run_plan(args, quiet))
}

fn run_plan(args: &PlanArgs, quiet: bool) -> Result<()> {
    let config = TinyJibConfig::from_env().context("Invalid environment configuration")?;
    let handler: Option<Box<dyn ProgressHandler>> = if quiet {
        None
    } else {
        Some(Box::new(LoggingHandler))
    };

    let plan = plan_manifest(&args.manifest, config, handler)?;
    let formatted = OutputFormatter::new(OutputFormat::from(args.format)).format_plan(&plan)?;
    emit(&formatted, args.output.as_deref())
}

pub fn handle_paths(args: &PathsArgs) -> i32 {
    report(resolve_output_paths(&args.manifest).and_then(|paths| {
        let formatted = OutputFormatter::new(OutputFormat::from(args.format)).format_paths(&paths)?;
        emit(&formatted, None)
    }))
}

pub fn handle_record(args: &RecordArgs) -> i32 {
    report(resolve_output_paths(&args.manifest).and_then(|paths| {
        let metadata = ImageMetadataOutput {
            image: args.image.clone(),
            image_id: args.image_id.clone(),
            image_digest: args.digest.clone(),
            tags: args.tags.clone(),
            image_pushed: args.pushed,
        };
        write_image_outputs(&paths, &metadata)?;
        info!(
            image = %metadata.image,
            digest = %paths.digest.display(),
            "Recorded image outputs"
        );
        Ok(())
    }))
}

pub fn handle_config(args: &ConfigArgs) -> i32 {
    report(
        TinyJibConfig::from_env()
            .context("Invalid environment configuration")
            .and_then(|config| {
                let formatted =
                    OutputFormatter::new(OutputFormat::from(args.format)).format_config(&config)?;
                emit(&formatted, None)
            }),
    )
}
