//! CLI argument definitions for `degnav`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use degree_navigator::config::ConfigOverrides;
use degree_navigator::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level`
/// for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Level::from(*self))
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `catalog`, `top_k`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Parse degree audit reports into JSON.
    ///
    /// Reads the plain text extracted from one or more DARS reports and writes
    /// the structured record of each.
    Audit {
        /// Paths to report text files (supports multiple)
        #[arg(value_name = "FILES", num_args = 1..)]
        input_files: Vec<PathBuf>,

        /// Output file paths (optional; defaults to config `out_dir` when omitted)
        ///
        /// When provided, must match the number of input files 1:1.
        #[arg(short, long, value_name = "FILES", num_args = 1..)]
        output: Vec<PathBuf>,

        /// Date separating in-progress from upcoming terms (YYYY-MM-DD; default: today)
        #[arg(long, value_name = "DATE")]
        as_of: Option<String>,

        /// Print each record to stdout instead of writing files
        #[arg(long)]
        stdout: bool,
    },
    /// Parse a requisite expression and list the sequences it allows.
    Prereq {
        /// Requisite text, e.g. "MATH 221 and (MATH 222 or MATH 234)"
        #[arg(value_name = "EXPR")]
        expression: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Select a prerequisite path for one or more courses.
    Path {
        /// Target course codes
        #[arg(value_name = "COURSES", num_args = 1..)]
        courses: Vec<String>,

        /// Audit report text files supplying the completed courses
        #[arg(short, long, value_name = "FILES", num_args = 1..)]
        audit: Vec<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Filter ranked course candidates against audit reports.
    Recommend {
        /// Audit report text files supplying completed and required courses
        #[arg(short, long, value_name = "FILES", num_args = 1..)]
        audit: Vec<PathBuf>,

        /// JSON array of ranked candidates (`title`/`courseTitle`, `description`)
        #[arg(short, long, value_name = "FILE")]
        candidates: PathBuf,

        /// Number of candidates to consider before widening (default from config)
        #[arg(long, value_name = "N")]
        top_k: Option<usize>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "degnav",
    about = "Degree audit parsing, prerequisite paths and course recommendations",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config catalog CSV path
    #[arg(long = "catalog", value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Override config output directory
    #[arg(long = "config-out-dir", value_name = "DIR")]
    pub config_out_dir: Option<PathBuf>,

    /// Override config output directory (short form)
    #[arg(long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `--out-dir` takes precedence over `--config-out-dir`. Subcommand options
    /// that shadow config values (`audit --as-of`, `recommend --top-k`) are
    /// carried over as well.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let (reference_date, top_k) = match &self.command {
            Command::Audit { as_of, .. } => (as_of.clone(), None),
            Command::Recommend { top_k, .. } => (None, *top_k),
            _ => (None, None),
        };

        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            out_dir: self
                .out_dir
                .as_ref()
                .or(self.config_out_dir.as_ref())
                .map(|p| p.to_string_lossy().to_string()),
            catalog: self
                .catalog
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            reference_date,
            top_k,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(command: Command) -> Cli {
        Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            config_level: None,
            config_log_file: None,
            config_verbose: None,
            catalog: None,
            config_out_dir: None,
            out_dir: None,
            command,
        }
    }

    #[test]
    fn test_log_level_names_match_logger() {
        for arg in [
            LogLevelArg::Error,
            LogLevelArg::Warn,
            LogLevelArg::Info,
            LogLevelArg::Debug,
        ] {
            let level = Level::from(arg);
            assert_eq!(arg.to_string(), level.to_string());
            assert_eq!(arg.to_string().parse::<Level>(), Ok(level));
        }
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = cli(Command::Prereq {
            expression: "MATH 221".to_string(),
            json: false,
        })
        .to_config_overrides();
        assert_eq!(overrides, ConfigOverrides::default());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let mut args = cli(Command::Config { subcommand: None });
        args.config_level = Some(LogLevelArg::Debug);
        args.config_log_file = Some(PathBuf::from("/tmp/test.log"));
        args.config_verbose = Some(true);
        args.catalog = Some(PathBuf::from("/data/catalog.csv"));
        args.out_dir = Some(PathBuf::from("/output"));

        let expected = ConfigOverrides {
            level: Some("debug".into()),
            file: Some("/tmp/test.log".into()),
            verbose: Some(true),
            out_dir: Some("/output".into()),
            catalog: Some("/data/catalog.csv".into()),
            ..ConfigOverrides::default()
        };
        assert_eq!(args.to_config_overrides(), expected);
    }

    #[test]
    fn test_short_form_precedence_over_long_form() {
        let mut args = cli(Command::Config { subcommand: None });
        args.config_out_dir = Some(PathBuf::from("/long/out"));
        args.out_dir = Some(PathBuf::from("/short/out"));
        assert_eq!(
            args.to_config_overrides().out_dir,
            Some("/short/out".to_string())
        );

        args.out_dir = None;
        assert_eq!(
            args.to_config_overrides().out_dir,
            Some("/long/out".to_string())
        );
    }

    #[test]
    fn test_subcommand_overrides() {
        let audit = cli(Command::Audit {
            input_files: vec![PathBuf::from("report.txt")],
            output: Vec::new(),
            as_of: Some("2025-02-01".to_string()),
            stdout: false,
        });
        assert_eq!(
            audit.to_config_overrides().reference_date,
            Some("2025-02-01".to_string())
        );

        let recommend = cli(Command::Recommend {
            audit: vec![PathBuf::from("report.txt")],
            candidates: PathBuf::from("ranked.json"),
            top_k: Some(20),
            json: false,
        });
        let overrides = recommend.to_config_overrides();
        assert_eq!(overrides.top_k, Some(20));
        assert!(overrides.reference_date.is_none());
    }

    #[test]
    fn test_parse_from_command_line() {
        let args = Cli::try_parse_from([
            "degnav",
            "--catalog",
            "catalog.csv",
            "path",
            "COMP SCI 300",
            "--audit",
            "a.txt",
            "b.txt",
        ])
        .unwrap();
        match args.command {
            Command::Path { courses, audit, .. } => {
                assert_eq!(courses, vec!["COMP SCI 300"]);
                assert_eq!(audit.len(), 2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
