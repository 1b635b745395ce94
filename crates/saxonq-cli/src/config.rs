//! CLI configuration.
//!
//! Settings are read with the following precedence (highest first):
//! 1. `SAXONQ_*` environment variables
//! 2. The configuration file (`--config`, or `saxonq/config.yaml` under the
//!    user configuration directory when it exists)
//! 3. Default values

use anyhow::{Context, Result, bail};
use saxonq_ir::ProcessorCatalog;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Processor catalog file; the built-in catalog when unset.
    pub catalog: Option<PathBuf>,
    /// Processor used when a command does not name one.
    pub default_processor: Option<String>,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Output settings.
    pub output: OutputConfig,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `warn` or `saxonq_pulse=debug`.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Console,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines on stderr.
    #[default]
    Console,
    /// One JSON object per event on stderr.
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "console" => Ok(LogFormat::Console),
            "json" => Ok(LogFormat::Json),
            other => bail!("Unknown log format '{other}' (expected console or json)"),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Console => f.write_str("console"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Print machine-readable JSON instead of text.
    pub json: bool,
}

impl Config {
    /// Default configuration file location, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("saxonq").join("config.yaml"))
    }

    /// Load a YAML configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_yaml_ng::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load the effective configuration.
    ///
    /// An explicit path must exist; the default path is used only when
    /// present.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        let config = config.merge_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `SAXONQ_*` overrides read through `lookup`.
    ///
    /// Only variables that are set override the current values.
    pub fn merge_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(v) = lookup("SAXONQ_CATALOG") {
            self.catalog = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("SAXONQ_PROCESSOR") {
            self.default_processor = Some(v);
        }
        if let Some(v) = lookup("SAXONQ_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = lookup("SAXONQ_LOG_FORMAT") {
            self.logging.format = v.parse()?;
        }
        if let Some(v) = lookup("SAXONQ_JSON") {
            self.output.json = parse_flag(&v).with_context(|| "Invalid SAXONQ_JSON")?;
        }
        Ok(self)
    }

    /// Reject settings no command could use.
    pub fn validate(&self) -> Result<()> {
        if self.logging.level.trim().is_empty() {
            bail!("logging.level must not be empty");
        }
        if let Some(name) = &self.default_processor {
            if name.trim().is_empty() {
                bail!("default_processor must not be empty");
            }
        }
        if let Some(path) = &self.catalog {
            if !path.is_file() {
                bail!("Catalog file not found: {}", path.display());
            }
        }
        Ok(())
    }

    /// The processor catalog: `override_path`, then the configured file, then
    /// the built-in catalog.
    pub fn catalog(&self, override_path: Option<&Path>) -> Result<ProcessorCatalog> {
        match override_path.or(self.catalog.as_deref()) {
            Some(path) => ProcessorCatalog::from_file(path)
                .with_context(|| format!("Failed to load catalog: {}", path.display())),
            None => Ok(ProcessorCatalog::builtin()),
        }
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("'{other}' is not a boolean"),
    }
}
