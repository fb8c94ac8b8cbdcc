//! Engine settings management
//!
//! Loads engine settings from TOML files and `EXOTIC_*` environment
//! variables, then converts them into a [`MonteCarloConfig`].
//!
//! | Variable | Field |
//! |----------|-------|
//! | `EXOTIC_GENERATOR` | `generator` (`park-miller`, `std-rng`) |
//! | `EXOTIC_VARIANCE_REDUCTION` | `variance_reduction` (`none`, `antithetic`) |
//! | `EXOTIC_SCHEDULING` | `scheduling` (`sequential`, `parallel`) |
//! | `EXOTIC_WORKERS` | `workers` |
//! | `EXOTIC_CONVERGENCE_RATIO` | `convergence_ratio` |
//! | `EXOTIC_TIME_BUDGET_MS` | `time_budget_ms` |
//! | `EXOTIC_PATH_COUNT` | `path_count` |
//! | `EXOTIC_SEED` | `seed` |
//! | `EXOTIC_LOG_LEVEL` | `log_level` |

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::mc::{ConfigError, MonteCarloConfig, Scheduling};
use crate::rng::{GeneratorKind, VarianceReduction};
use crate::statistics::DEFAULT_CONVERGENCE_RATIO;

/// Settings error types
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("Failed to read settings file {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The settings text is not valid TOML for [`EngineSettings`].
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// An environment variable holds an unusable value.
    #[error("Invalid value '{value}' for {key}")]
    InvalidValue {
        /// Variable name
        key: &'static str,
        /// Rejected value
        value: String,
    },

    /// The resulting engine configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Log levels for the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything, including per-worker events
    Trace,
    /// Run start and worker faults
    Debug,
    /// Run outcomes
    #[default]
    Info,
    /// Faulted runs only
    Warn,
    /// Errors only
    Error,
}

impl FromStr for LogLevel {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(SettingsError::InvalidValue {
                key: ENV_LOG_LEVEL,
                value: s.to_string(),
            }),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Sequential or parallel execution, as written in settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulingMode {
    /// Calling thread only
    #[default]
    Sequential,
    /// Rayon pool
    Parallel,
}

impl FromStr for SchedulingMode {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sequential" => Ok(SchedulingMode::Sequential),
            "parallel" => Ok(SchedulingMode::Parallel),
            _ => Err(SettingsError::InvalidValue {
                key: ENV_SCHEDULING,
                value: s.to_string(),
            }),
        }
    }
}

const ENV_GENERATOR: &str = "EXOTIC_GENERATOR";
const ENV_VARIANCE_REDUCTION: &str = "EXOTIC_VARIANCE_REDUCTION";
const ENV_SCHEDULING: &str = "EXOTIC_SCHEDULING";
const ENV_WORKERS: &str = "EXOTIC_WORKERS";
const ENV_CONVERGENCE_RATIO: &str = "EXOTIC_CONVERGENCE_RATIO";
const ENV_TIME_BUDGET_MS: &str = "EXOTIC_TIME_BUDGET_MS";
const ENV_PATH_COUNT: &str = "EXOTIC_PATH_COUNT";
const ENV_SEED: &str = "EXOTIC_SEED";
const ENV_LOG_LEVEL: &str = "EXOTIC_LOG_LEVEL";

/// Engine settings structure
///
/// Missing fields take their defaults.
///
/// # Examples
///
/// ```rust
/// use exotic_engine::settings::EngineSettings;
///
/// let settings = EngineSettings::from_toml_str(
///     r#"
///     variance_reduction = "antithetic"
///     scheduling = "parallel"
///     workers = 4
///     path_count = 50000
///     "#,
/// )
/// .unwrap();
///
/// let config = settings.to_config().unwrap();
/// assert_eq!(config.scheduling().workers(), 4);
/// assert_eq!(settings.path_count, 50_000);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSettings {
    /// Underlying generator
    pub generator: GeneratorKind,
    /// Variance reduction
    pub variance_reduction: VarianceReduction,
    /// Sequential or parallel execution
    pub scheduling: SchedulingMode,
    /// Parallel worker count; one per logical CPU when absent
    pub workers: Option<usize>,
    /// Multiplier between convergence snapshots
    pub convergence_ratio: u64,
    /// Wall-clock budget in milliseconds
    pub time_budget_ms: Option<u64>,
    /// Default number of paths per pricing call
    pub path_count: u64,
    /// Default seed
    pub seed: u64,
    /// Log level
    pub log_level: LogLevel,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            generator: GeneratorKind::default(),
            variance_reduction: VarianceReduction::default(),
            scheduling: SchedulingMode::default(),
            workers: None,
            convergence_ratio: DEFAULT_CONVERGENCE_RATIO,
            time_budget_ms: None,
            path_count: 100_000,
            seed: 1,
            log_level: LogLevel::Info,
        }
    }
}

impl EngineSettings {
    /// Parse settings from TOML text
    ///
    /// # Errors
    ///
    /// [`SettingsError::Parse`] on malformed TOML or unknown fields.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from a TOML file
    ///
    /// # Errors
    ///
    /// [`SettingsError::Io`] when the file cannot be read, otherwise see
    /// [`EngineSettings::from_toml_str`].
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load settings from environment variables over the defaults
    ///
    /// # Errors
    ///
    /// [`SettingsError::InvalidValue`] for a variable that does not parse.
    pub fn from_env() -> Result<Self, SettingsError> {
        let mut settings = Self::default();
        settings.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Overrides fields for which `lookup` returns a value
    ///
    /// `lookup` maps an `EXOTIC_*` variable name to its value.
    ///
    /// # Errors
    ///
    /// [`SettingsError::InvalidValue`] for a value that does not parse.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_GENERATOR) {
            self.generator = parse_value(ENV_GENERATOR, &value)?;
        }
        if let Some(value) = lookup(ENV_VARIANCE_REDUCTION) {
            self.variance_reduction = parse_value(ENV_VARIANCE_REDUCTION, &value)?;
        }
        if let Some(value) = lookup(ENV_SCHEDULING) {
            self.scheduling = SchedulingMode::from_str(&value)?;
        }
        if let Some(value) = lookup(ENV_WORKERS) {
            self.workers = Some(parse_value(ENV_WORKERS, &value)?);
        }
        if let Some(value) = lookup(ENV_CONVERGENCE_RATIO) {
            self.convergence_ratio = parse_value(ENV_CONVERGENCE_RATIO, &value)?;
        }
        if let Some(value) = lookup(ENV_TIME_BUDGET_MS) {
            self.time_budget_ms = Some(parse_value(ENV_TIME_BUDGET_MS, &value)?);
        }
        if let Some(value) = lookup(ENV_PATH_COUNT) {
            self.path_count = parse_value(ENV_PATH_COUNT, &value)?;
        }
        if let Some(value) = lookup(ENV_SEED) {
            self.seed = parse_value(ENV_SEED, &value)?;
        }
        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&value)?;
        }
        Ok(())
    }

    /// Scheduling described by these settings
    pub fn scheduling(&self) -> Scheduling {
        match (self.scheduling, self.workers) {
            (SchedulingMode::Sequential, _) => Scheduling::Sequential,
            (SchedulingMode::Parallel, Some(workers)) => Scheduling::Parallel { workers },
            (SchedulingMode::Parallel, None) => Scheduling::parallel_auto(),
        }
    }

    /// Build the engine configuration
    ///
    /// # Errors
    ///
    /// [`ConfigError`] when the values are out of range.
    pub fn to_config(&self) -> Result<MonteCarloConfig, ConfigError> {
        let mut builder = MonteCarloConfig::builder()
            .generator(self.generator)
            .variance_reduction(self.variance_reduction)
            .scheduling(self.scheduling())
            .convergence_ratio(self.convergence_ratio);
        if let Some(ms) = self.time_budget_ms {
            builder = builder.time_budget(Duration::from_millis(ms));
        }
        builder.build()
    }
}

fn parse_value<T: FromStr>(key: &'static str, value: &str) -> Result<T, SettingsError> {
    value.trim().parse().map_err(|_| SettingsError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

/// Build settings from all sources
///
/// Priority (highest to lowest):
/// 1. Environment variables
/// 2. Settings file
/// 3. Default values
///
/// # Errors
///
/// Any [`SettingsError`] from loading, plus [`SettingsError::Config`] when
/// the merged values do not form a valid configuration.
pub fn build_settings(path: Option<&Path>) -> Result<EngineSettings, SettingsError> {
    let mut settings = match path {
        Some(path) => EngineSettings::from_file(path)?,
        None => EngineSettings::default(),
    };
    settings.apply_overrides(|key| std::env::var(key).ok())?;
    settings.to_config()?;
    Ok(settings)
}
