//! Configuration module for `degree-navigator`

use crate::core::prereq::{PathSelector, DEFAULT_MAX_DEPTH};
use crate::core::recommend::RecommendPolicy;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the configuration directory in path values
const DIR_VARIABLE: &str = "$DEGNAV";

/// Date format accepted for `reference_date`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

const fn default_top_k() -> usize {
    10
}

const fn default_min_results() -> usize {
    3
}

const fn default_widen_factor() -> f64 {
    2.5
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for parsed audit JSON files
    #[serde(default)]
    pub out_dir: String,
    /// Course catalog CSV export
    #[serde(default)]
    pub catalog: String,
}

/// Audit parsing configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Date used to split in-progress from upcoming terms (`YYYY-MM-DD`, empty for today)
    #[serde(default)]
    pub reference_date: String,
}

/// Prerequisite path configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrereqConfig {
    /// Largest sequence count enumerated per course (0 for no limit)
    #[serde(default)]
    pub max_sequences: usize,
    /// Deepest parenthesis nesting accepted in requisite text
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for PrereqConfig {
    fn default() -> Self {
        Self {
            max_sequences: 0,
            max_depth: default_max_depth(),
        }
    }
}

/// Recommendation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendConfig {
    /// Candidates requested from the similarity search
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Survivors below this count trigger a widened search
    #[serde(default = "default_min_results")]
    pub min_results: usize,
    /// Multiplier applied to `top_k` for the widened search
    #[serde(default = "default_widen_factor")]
    pub widen_factor: f64,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            min_results: default_min_results(),
            widen_factor: default_widen_factor(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Audit parsing settings
    #[serde(default)]
    pub audit: AuditConfig,
    /// Prerequisite path settings
    #[serde(default)]
    pub prereq: PrereqConfig,
    /// Recommendation settings
    #[serde(default)]
    pub recommend: RecommendConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override audit JSON output directory
    pub out_dir: Option<String>,
    /// Override catalog CSV path
    pub catalog: Option<String>,
    /// Override audit reference date
    pub reference_date: Option<String>,
    /// Override candidate count
    pub top_k: Option<usize>,
}

impl Config {
    /// Get the `$DEGNAV` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/degnav`
    /// - macOS: `~/Library/Application Support/degnav`
    /// - Windows: `%APPDATA%\degnav`
    #[must_use]
    pub fn get_degnav_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("degnav")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only string fields that are empty here and non-empty in `defaults` are
    /// filled; numeric fields already receive serde defaults when absent.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        if self.paths.out_dir.is_empty() && !defaults.paths.out_dir.is_empty() {
            self.paths.out_dir.clone_from(&defaults.paths.out_dir);
            changed = true;
        }
        if self.paths.catalog.is_empty() && !defaults.paths.catalog.is_empty() {
            self.paths.catalog.clone_from(&defaults.paths.catalog);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Only non-`None` values replace config values; the file on disk is not
    /// touched.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(out_dir) = &overrides.out_dir {
            self.paths.out_dir = Self::expand_variables(out_dir);
        }
        if let Some(catalog) = &overrides.catalog {
            self.paths.catalog = Self::expand_variables(catalog);
        }

        if let Some(date) = &overrides.reference_date {
            self.audit.reference_date.clone_from(date);
        }
        if let Some(top_k) = overrides.top_k {
            self.recommend.top_k = top_k;
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_degnav_dir`](Self::get_degnav_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_degnav_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$DEGNAV` to the configuration directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_degnav_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// `$DEGNAV` is expanded in path values. Missing fields use their serde
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    ///
    /// # Examples
    ///
    /// ```
    /// use degree_navigator::config::Config;
    ///
    /// let config = Config::from_toml("[logging]\nlevel = \"warn\"\n").unwrap();
    /// assert_eq!(config.logging.level, "warn");
    /// assert_eq!(config.recommend.top_k, 10);
    /// ```
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.out_dir = Self::expand_variables(&config.paths.out_dir);
        config.paths.catalog = Self::expand_variables(&config.paths.catalog);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// Debug builds use `DefaultCLIConfigDebug.toml`, release builds
    /// `DefaultCLIConfigRelease.toml`.
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// An existing file has missing fields merged from defaults and is saved
    /// back when that changed anything. On first run the defaults are written
    /// out. Any read or parse failure falls back to defaults.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the file
    /// cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `out_dir`, `catalog`,
    /// `reference_date`, `max_sequences`, `max_depth`, `top_k`, `min_results`,
    /// `widen_factor` (dashes are accepted in place of underscores).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key.replace('-', "_").as_str() {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "out_dir" => Some(self.paths.out_dir.clone()),
            "catalog" => Some(self.paths.catalog.clone()),
            "reference_date" => Some(self.audit.reference_date.clone()),
            "max_sequences" => Some(self.prereq.max_sequences.to_string()),
            "max_depth" => Some(self.prereq.max_depth.to_string()),
            "top_k" => Some(self.recommend.top_k.to_string()),
            "min_results" => Some(self.recommend.min_results.to_string()),
            "widen_factor" => Some(self.recommend.widen_factor.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Values are validated and converted to the field type. Call
    /// [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value cannot be parsed
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key.replace('-', "_").as_str() {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => self.logging.verbose = parse_value(key, value)?,
            "out_dir" => self.paths.out_dir = value.to_string(),
            "catalog" => self.paths.catalog = value.to_string(),
            "reference_date" => {
                if !value.is_empty() {
                    parse_date(value)?;
                }
                self.audit.reference_date = value.to_string();
            }
            "max_sequences" => self.prereq.max_sequences = parse_value(key, value)?,
            "max_depth" => {
                let depth: usize = parse_value(key, value)?;
                if depth == 0 {
                    return Err(format!("'max_depth' must be at least 1, got '{value}'"));
                }
                self.prereq.max_depth = depth;
            }
            "top_k" => self.recommend.top_k = parse_value(key, value)?,
            "min_results" => self.recommend.min_results = parse_value(key, value)?,
            "widen_factor" => {
                let factor: f64 = parse_value(key, value)?;
                if !factor.is_finite() || factor < 1.0 {
                    return Err(format!("'widen_factor' must be at least 1.0, got '{value}'"));
                }
                self.recommend.widen_factor = factor;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key.replace('-', "_").as_str() {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "out_dir" => self.paths.out_dir.clone_from(&defaults.paths.out_dir),
            "catalog" => self.paths.catalog.clone_from(&defaults.paths.catalog),
            "reference_date" => self
                .audit
                .reference_date
                .clone_from(&defaults.audit.reference_date),
            "max_sequences" => self.prereq.max_sequences = defaults.prereq.max_sequences,
            "max_depth" => self.prereq.max_depth = defaults.prereq.max_depth,
            "top_k" => self.recommend.top_k = defaults.recommend.top_k,
            "min_results" => self.recommend.min_results = defaults.recommend.min_results,
            "widen_factor" => self.recommend.widen_factor = defaults.recommend.widen_factor,
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. A missing file is not an error.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Reference date for audit parsing, today when unset
    ///
    /// # Errors
    /// Returns an error if `reference_date` is not a `YYYY-MM-DD` date
    pub fn reference_date(&self) -> Result<NaiveDate, String> {
        let value = self.audit.reference_date.trim();
        if value.is_empty() {
            Ok(Local::now().date_naive())
        } else {
            parse_date(value)
        }
    }

    /// Path selector honoring `max_sequences` and `max_depth`
    #[must_use]
    pub const fn path_selector(&self) -> PathSelector {
        let selector = match self.prereq.max_sequences {
            0 => PathSelector::new(),
            limit => PathSelector::with_max_sequences(limit),
        };
        selector.nesting_limit(self.prereq.max_depth)
    }

    /// Recommendation escalation policy
    #[must_use]
    pub const fn recommend_policy(&self) -> RecommendPolicy {
        RecommendPolicy {
            min_results: self.recommend.min_results,
            widen_factor: self.recommend.widen_factor,
        }
    }
}

/// Parse a `YYYY-MM-DD` date
///
/// # Errors
/// Returns a message naming the rejected value
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| format!("Invalid date '{value}' (expected YYYY-MM-DD): {e}"))
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, String> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| format!("Invalid value for '{key}': '{value}'"))
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  out_dir = \"{}\"", self.paths.out_dir)?;
        writeln!(f, "  catalog = \"{}\"", self.paths.catalog)?;

        writeln!(f, "\n[audit]")?;
        writeln!(f, "  reference_date = \"{}\"", self.audit.reference_date)?;

        writeln!(f, "\n[prereq]")?;
        writeln!(f, "  max_sequences = {}", self.prereq.max_sequences)?;
        writeln!(f, "  max_depth = {}", self.prereq.max_depth)?;

        writeln!(f, "\n[recommend]")?;
        writeln!(f, "  top_k = {}", self.recommend.top_k)?;
        writeln!(f, "  min_results = {}", self.recommend.min_results)?;
        writeln!(f, "  widen_factor = {}", self.recommend.widen_factor)?;

        Ok(())
    }
}
