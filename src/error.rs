//! Error types for loading unit and ability data.
//!
//! Combat itself never fails: malformed data degrades to fallback
//! behavior during a battle. Only reading the data can go wrong.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading units and ability tables.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    #[error("duplicate unit name: {0}")]
    DuplicateUnit(String),
}

impl DataError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DataError::Io { path: path.into(), source }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        DataError::Parse { path: path.into(), source }
    }
}

pub type DataResult<T> = Result<T, DataError>;
