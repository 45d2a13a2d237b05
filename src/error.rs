//! Error types for loading plan inputs and persisting snapshots

use std::path::PathBuf;
use thiserror::Error;

/// Failure while reading plans, events, reference tables or configuration
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// An enumerated tag (stage, institution, event type, ...) we don't recognise
    #[error("unknown {field}: {value:?}")]
    UnknownValue { field: &'static str, value: String },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io { path: path.into(), source }
    }

    pub(crate) fn unknown(field: &'static str, value: &str) -> Self {
        LoadError::UnknownValue { field, value: value.to_string() }
    }
}

/// Failure while handing a snapshot set to storage
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
