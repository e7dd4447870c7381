use tinyjib::cli::commands::{CliArgs, Commands};
use tinyjib::cli::handlers::{handle_config, handle_paths, handle_plan, handle_record};
use tinyjib::util::logging::{init_logging, parse_level, LoggingConfig, LOG_JSON_ENV, LOG_LEVEL_ENV};
use tinyjib::VERSION;

use clap::Parser;
use std::env;
use tracing::{debug, Level};

fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("tinyjib v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Plan(plan_args) => handle_plan(plan_args, args.quiet),
        Commands::Paths(paths_args) => handle_paths(paths_args),
        Commands::Record(record_args) => handle_record(record_args),
        Commands::Config(config_args) => handle_config(config_args),
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let level = if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        let level_str = env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| "info".to_string());
        parse_level(&level_str)
    };

    let use_json = env::var(LOG_JSON_ENV)
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);

    init_logging(LoggingConfig {
        level,
        use_json,
        ..Default::default()
    });
}
