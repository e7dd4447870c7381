use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Containerization planner for JVM projects
#[derive(Parser, Debug)]
#[command(
    name = "tinyjib",
    about = "Containerization planner for JVM projects",
    version,
    author,
    long_about = "tinyjib reads a frozen project inventory (tasks, plugins, source sets and \
                  dependency configurations) together with its jib settings, decides which \
                  build tasks the containerization tasks depend on, resolves archive output \
                  collisions and locates the image output files."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Plan the containerization tasks of a project",
        long_about = "Classifies the project's packaging, resolves the upstream dependencies of \
                      jib, jibDockerBuild and jibBuildTar, and prints the resulting plan.\n\n\
                      Examples:\n  \
                      tinyjib plan tinyjib.yaml\n  \
                      tinyjib plan project.json --format json\n  \
                      tinyjib plan tinyjib.yaml --format yaml --output plan.yaml"
    )]
    Plan(PlanArgs),

    #[command(
        about = "Print the resolved image output paths",
        long_about = "Resolves the digest, image id, image metadata and tarball paths without \
                      running dependency resolution.\n\n\
                      Examples:\n  \
                      tinyjib paths tinyjib.yaml\n  \
                      tinyjib paths tinyjib.yaml --format json"
    )]
    Paths(PathsArgs),

    #[command(
        about = "Record a built image into the output files",
        long_about = "Writes the digest, image id and image metadata JSON of a finished build to \
                      the project's resolved output paths.\n\n\
                      Examples:\n  \
                      tinyjib record tinyjib.yaml --image ghcr.io/acme/app --image-id sha256:... \
                      --digest sha256:... --tag latest --pushed"
    )]
    Record(RecordArgs),

    #[command(about = "Show the effective environment configuration")]
    Config(ConfigArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct PlanArgs {
    #[arg(value_name = "MANIFEST", help = "Project manifest (.yaml, .yml or .json)")]
    pub manifest: PathBuf,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct PathsArgs {
    #[arg(value_name = "MANIFEST", help = "Project manifest (.yaml, .yml or .json)")]
    pub manifest: PathBuf,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct RecordArgs {
    #[arg(value_name = "MANIFEST", help = "Project manifest (.yaml, .yml or .json)")]
    pub manifest: PathBuf,

    #[arg(long, value_name = "REFERENCE", help = "Image reference that was built")]
    pub image: String,

    #[arg(long, value_name = "ID", help = "Image id (config digest)")]
    pub image_id: String,

    #[arg(long, value_name = "DIGEST", help = "Image manifest digest")]
    pub digest: String,

    #[arg(long = "tag", value_name = "TAG", help = "Tag applied to the image (repeatable)")]
    pub tags: Vec<String>,

    #[arg(long, help = "The image was pushed to a registry")]
    pub pushed: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ConfigArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_default_plan_args() {
        let args = CliArgs::parse_from(["tinyjib", "plan", "tinyjib.yaml"]);
        match args.command {
            Commands::Plan(plan_args) => {
                assert_eq!(plan_args.manifest, PathBuf::from("tinyjib.yaml"));
                assert_eq!(plan_args.format, OutputFormatArg::Human);
                assert!(plan_args.output.is_none());
            }
            _ => panic!("Expected Plan command"),
        }
    }

    #[test]
    fn test_plan_with_options() {
        let args = CliArgs::parse_from([
            "tinyjib",
            "plan",
            "project.json",
            "--format",
            "json",
            "--output",
            "plan.json",
        ]);
        match args.command {
            Commands::Plan(plan_args) => {
                assert_eq!(plan_args.format, OutputFormatArg::Json);
                assert_eq!(plan_args.output, Some(PathBuf::from("plan.json")));
            }
            _ => panic!("Expected Plan command"),
        }
    }

    #[test]
    fn test_plan_requires_manifest() {
        assert!(CliArgs::try_parse_from(["tinyjib", "plan"]).is_err());
    }

    #[test]
    fn test_record_command() {
        let args = CliArgs::parse_from([
            "tinyjib",
            "record",
            "tinyjib.yaml",
            "--image",
            "ghcr.io/acme/app",
            "--image-id",
            "sha256:aa",
            "--digest",
            "sha256:bb",
            "--tag",
            "latest",
            "--tag",
            "1.0",
        ]);
        match args.command {
            Commands::Record(record_args) => {
                assert_eq!(record_args.tags, vec!["latest", "1.0"]);
                assert!(!record_args.pushed);
            }
            _ => panic!("Expected Record command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let args = CliArgs::parse_from(["tinyjib", "-v", "paths", "tinyjib.yaml"]);
        assert!(args.verbose);
        assert!(!args.quiet);

        let args = CliArgs::parse_from(["tinyjib", "--log-level", "debug", "config"]);
        assert_eq!(args.log_level, Some("debug".to_string()));

        assert!(CliArgs::try_parse_from(["tinyjib", "-v", "-q", "config"]).is_err());
    }
}
