//! Error types for dataset and configuration loading
//!
//! Everything here is a load-time failure: it surfaces before the first
//! frame is drawn. Per-frame code never returns these.

use thiserror::Error;

/// Errors raised while loading the static trip and marker datasets.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Dataset file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Dataset file is not valid JSON or has the wrong shape
    #[error("malformed {dataset} dataset: {source}")]
    Json {
        dataset: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Top-level JSON value is not the expected container
    #[error("malformed {dataset} dataset: expected {expected}")]
    Shape {
        dataset: &'static str,
        expected: &'static str,
    },

    /// A trip record violates an invariant
    #[error("invalid trip #{index}: {reason}")]
    InvalidTrip { index: usize, reason: String },

    /// A marker record violates an invariant
    #[error("invalid marker {key}: {reason}")]
    InvalidMarker { key: String, reason: String },
}

/// Errors raised while building or validating the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),

    /// A numeric setting is out of its allowed range
    #[error("{field} = {value} is out of range ({expected})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },

    /// An environment override could not be parsed
    #[error("environment variable {var}={value:?} is not a number")]
    BadEnv { var: &'static str, value: String },
}

impl ConfigError {
    pub(crate) fn out_of_range(field: &'static str, value: f64, expected: &'static str) -> Self {
        Self::OutOfRange {
            field,
            value,
            expected,
        }
    }
}
