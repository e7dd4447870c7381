pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, ConfigArgs, PathsArgs, PlanArgs, RecordArgs};
pub use output::{OutputFormat, OutputFormatter};
