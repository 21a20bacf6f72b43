//! Error types for slat-segmentation.
//!
//! Configuration problems are reported here, including configured layouts
//! that do not make a valid slat. Geometry construction errors themselves
//! live in [`crate::mapping::error`]; pad lookups never fail and report
//! misses through [`crate::mapping::Pad::INVALID`] instead.

use std::path::PathBuf;

use thiserror::Error;

use crate::mapping::GeometryError;

/// Errors that can occur during configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file: {path}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path where the configuration file was expected.
        path: PathBuf,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation failure.
        message: String,
    },

    /// The configured slat layout does not describe a valid geometry.
    #[error("invalid slat layout: {source}")]
    InvalidLayout {
        /// The geometry check that failed.
        #[from]
        source: GeometryError,
    },
}
