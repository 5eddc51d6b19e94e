use std::path::PathBuf;
use thiserror::Error;

/// Errors that can stop the CLI before a block is rendered
#[derive(Error, Debug)]
pub enum AppError {
    /// Error reading the block text from stdin
    #[error("Failed to read block from stdin: {0}")]
    ReadStdin(#[source] std::io::Error),

    /// Error reading the block text from a file
    #[error("Failed to read block file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error encoding rows as JSON
    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type alias for CLI operations
pub type AppResult<T> = Result<T, AppError>;
