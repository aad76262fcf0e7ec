use std::fmt;
use std::io::ErrorKind;

use serde::Deserialize;

use crate::error::{BuildInfoError, Result};

/// Config file read when no explicit path is given.
pub const DEFAULT_CONFIG_PATH: &str = "buildinfo.toml";

/// How reports are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain `<program> version <ver>` lines.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
    /// Bordered table.
    Table,
}

impl std::str::FromStr for OutputFormat {
    type Err = BuildInfoError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            _ => Err(BuildInfoError::ConfigError(format!(
                "Invalid output format '{}'. Use 'text', 'json', or 'table'.",
                s
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Table => "table",
        };
        f.write_str(name)
    }
}

/// Settings for version reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Program name printed in front of the version.
    pub program: String,
    /// Include build properties in text reports.
    pub verbose: bool,
    pub format: OutputFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            program: "rocksdb".to_string(),
            verbose: false,
            format: OutputFormat::Text,
        }
    }
}

// ── TOML deserialization structs ──

#[derive(Deserialize, Default)]
struct TomlConfig {
    report: Option<TomlReportConfig>,
}

#[derive(Deserialize, Default)]
struct TomlReportConfig {
    program: Option<String>,
    verbose: Option<bool>,
    format: Option<String>,
}

/// CLI overrides that take highest priority.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub program: Option<String>,
    pub verbose: Option<bool>,
    pub format: Option<OutputFormat>,
}

impl ReportConfig {
    /// Load configuration with the following priority (highest wins):
    /// 1. CLI arguments
    /// 2. Environment variables
    /// 3. TOML config file
    /// 4. Built-in defaults
    pub fn load(config_path: Option<&str>, overrides: &CliOverrides) -> Result<Self> {
        let mut config = ReportConfig::default();

        // Layer 3: TOML config file
        let toml_path = config_path.unwrap_or(DEFAULT_CONFIG_PATH);
        match std::fs::read_to_string(toml_path) {
            Ok(content) => {
                log::debug!("Loading report config from {}", toml_path);
                let toml_config: TomlConfig = toml::from_str(&content).map_err(|e| {
                    BuildInfoError::ConfigError(format!(
                        "Failed to parse config file '{}': {}",
                        toml_path, e
                    ))
                })?;
                config.apply_toml(toml_config)?;
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // If explicitly specified, error if not found
                if config_path.is_some() {
                    return Err(BuildInfoError::ConfigError(format!(
                        "Config file '{}' not found",
                        toml_path
                    )));
                }
            }
            Err(e) => return Err(e.into()),
        }

        // Layer 2: Environment variables
        config.apply_env(std::env::vars());

        // Layer 1: CLI overrides
        config.apply_cli(overrides);

        if config.program.trim().is_empty() {
            return Err(BuildInfoError::ConfigError(
                "Program name must not be empty".to_string(),
            ));
        }

        Ok(config)
    }

    fn apply_toml(&mut self, toml: TomlConfig) -> Result<()> {
        if let Some(r) = toml.report {
            if let Some(v) = r.program { self.program = v; }
            if let Some(v) = r.verbose { self.verbose = v; }
            if let Some(v) = r.format { self.format = v.parse()?; }
        }
        Ok(())
    }

    /// Apply `ROCKSDB_BUILDINFO_*` variables. Unparseable values are ignored
    /// with a warning.
    fn apply_env<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            match key.as_str() {
                "ROCKSDB_BUILDINFO_PROGRAM" => self.program = value,
                "ROCKSDB_BUILDINFO_VERBOSE" => match parse_bool(&value) {
                    Some(v) => self.verbose = v,
                    None => log::warn!("Ignoring {}={}: expected a boolean", key, value),
                },
                "ROCKSDB_BUILDINFO_FORMAT" => match value.parse() {
                    Ok(format) => self.format = format,
                    Err(e) => log::warn!("Ignoring {}: {}", key, e),
                },
                _ => {}
            }
        }
    }

    fn apply_cli(&mut self, overrides: &CliOverrides) {
        if let Some(ref v) = overrides.program {
            self.program = v.clone();
        }
        if let Some(v) = overrides.verbose {
            self.verbose = v;
        }
        if let Some(v) = overrides.format {
            self.format = v;
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
