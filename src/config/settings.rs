//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use serde::Deserialize;

use crate::error::ConfigError;

/// Log levels accepted in `logging.level`.
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Lookup settings.
    #[serde(default)]
    pub lookup: LookupConfig,

    /// Layout of the demonstration slat queried by the CLI.
    #[serde(default)]
    pub demo_slat: DemoSlatConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    LOG_LEVELS.join(", ")
                ),
            });
        }
        self.demo_slat.validate()
    }
}

/// Lookup behaviour.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LookupConfig {
    /// Report lookup misses as warnings.
    /// Default: true
    #[serde(default = "default_true")]
    pub warn_on_miss: bool,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            warn_on_miss: default_true(),
        }
    }
}

const fn default_true() -> bool {
    true
}

/// A regular slat: identical rectangular motifs side by side along x.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DemoSlatConfig {
    /// Number of motifs along the slat.
    #[serde(default = "default_motif_count")]
    pub motif_count: usize,

    /// Pad columns per motif.
    #[serde(default = "default_motif_columns")]
    pub motif_columns: usize,

    /// Pad rows per motif.
    #[serde(default = "default_motif_rows")]
    pub motif_rows: usize,

    /// Pad width in mm.
    #[serde(default = "default_pad_width")]
    pub pad_width: f64,

    /// Pad height in mm.
    #[serde(default = "default_pad_height")]
    pub pad_height: f64,

    /// Connector id of the leftmost motif.
    #[serde(default = "default_first_connector_id")]
    pub first_connector_id: i32,

    /// Increment between neighbouring connector ids.
    #[serde(default = "default_connector_step")]
    pub connector_step: i32,
}

impl DemoSlatConfig {
    /// Validates the layout parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if a count, size or connector parameter is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: &str| {
            Err(ConfigError::ValidationError {
                message: format!("demo_slat: {message}"),
            })
        };
        if self.motif_count == 0 || self.motif_columns == 0 || self.motif_rows == 0 {
            return invalid("motif_count, motif_columns and motif_rows must be positive");
        }
        if !(self.pad_width > 0.0 && self.pad_height > 0.0) {
            return invalid("pad_width and pad_height must be positive");
        }
        if self.first_connector_id < 0 || self.connector_step <= 0 {
            return invalid("first_connector_id must not be negative and connector_step must be positive");
        }
        Ok(())
    }
}

impl Default for DemoSlatConfig {
    fn default() -> Self {
        Self {
            motif_count: default_motif_count(),
            motif_columns: default_motif_columns(),
            motif_rows: default_motif_rows(),
            pad_width: default_pad_width(),
            pad_height: default_pad_height(),
            first_connector_id: default_first_connector_id(),
            connector_step: default_connector_step(),
        }
    }
}

const fn default_motif_count() -> usize {
    4
}

const fn default_motif_columns() -> usize {
    4
}

const fn default_motif_rows() -> usize {
    16
}

const fn default_pad_width() -> f64 {
    2.5
}

const fn default_pad_height() -> f64 {
    0.5
}

const fn default_first_connector_id() -> i32 {
    1
}

const fn default_connector_step() -> i32 {
    1
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
