//! Command-line interface entry point for `degnav`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use degree_navigator::config::Config;
use degree_navigator::info;
use degree_navigator::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use std::path::PathBuf;

fn main() {
    let args = Cli::parse();

    // Config file first, then CLI overrides on top
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    init_logging(&args, &config);

    match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
        }
        Command::Audit {
            input_files,
            output,
            stdout,
            ..
        } => {
            commands::audit::run(&input_files, &output, stdout, &config);
        }
        Command::Prereq { expression, json } => {
            commands::prereq::run(&expression, json, &config);
        }
        Command::Path {
            courses,
            audit,
            json,
        } => {
            commands::path::run(&courses, &audit, json, &config);
        }
        Command::Recommend {
            audit,
            candidates,
            json,
            ..
        } => {
            commands::recommend::run(&audit, &candidates, json, &config);
        }
    }
}

/// Apply level, debug, verbose and file-sink settings
fn init_logging(args: &Cli, config: &Config) {
    // --log-level beats logging.level; unparsable config falls back to warn
    let level = if args.debug_flag {
        Level::Debug
    } else {
        args.log_level
            .map(Level::from)
            .or_else(|| config.logging.level.parse::<Level>().ok())
            .unwrap_or(Level::Warn)
    };
    if level == Level::Debug {
        enable_debug();
    }
    set_level(level);

    if args.verbose || config.logging.verbose {
        enable_verbose();
    }

    let log_path = args.log_file.clone().or_else(|| {
        (!config.logging.file.is_empty()).then(|| PathBuf::from(&config.logging.file))
    });
    if let Some(path) = log_path {
        if init_file_logging(&path) {
            info!("Logging to {}", path.display());
        } else {
            eprintln!("✗ Failed to initialize file logging at: {}", path.display());
        }
    }
}
