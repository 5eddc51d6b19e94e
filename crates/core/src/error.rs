use std::path::PathBuf;
use thiserror::Error;

use crate::models::EntityKind;

/// Errors raised while reading from an external data source
#[derive(Error, Debug)]
pub enum DataSourceError {
    /// Error reading a snapshot document from disk
    #[error("Failed to read snapshot file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error decoding a snapshot document
    #[error("Failed to parse snapshot data: {0}")]
    Parse(#[from] serde_json::Error),

    /// Error launching the automation process
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The automation process ran but reported a failure
    #[error("{program} exited with {status}: {stderr}")]
    ScriptFailed {
        program: String,
        status: String,
        stderr: String,
    },

    /// The source cannot serve requests right now
    #[error("Data source unavailable: {0}")]
    Unavailable(String),
}

/// Query error types for Focusview
#[derive(Error, Debug)]
pub enum QueryError {
    /// A project, folder or tag lookup found nothing
    #[error("{kind} '{name}' not found")]
    NotFound { kind: EntityKind, name: String },

    /// The data source failed while fetching the snapshot
    #[error("Data source error: {0}")]
    DataSource(#[from] DataSourceError),

    /// The block text contained no recognized selector
    #[error("No recognized selector in block")]
    NoSelector,
}

impl QueryError {
    /// Shorthand for a lookup miss.
    pub fn not_found(kind: EntityKind, name: impl Into<String>) -> Self {
        QueryError::NotFound {
            kind,
            name: name.into(),
        }
    }
}

/// Result type alias for query operations
pub type QueryResult<T> = Result<T, QueryError>;
