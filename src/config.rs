//! Source and query configuration for the CLI
//!
//! Every setting is resolved with the same priority:
//! 1. Command line argument
//! 2. Environment variable (if non-empty)
//! 3. Built-in default

use std::path::PathBuf;
use std::sync::Arc;

use focusview_core::{
    DEFAULT_ROOT_FOLDER_NAME, DataSource, JsonFileSource, OmniFocusSource, QueryConfig,
    QueryEngine,
};
use tracing::debug;

/// Environment variable naming a JSON snapshot file to query
pub const FV_SNAPSHOT_ENV: &str = "FV_SNAPSHOT";

/// Environment variable overriding the root folder name
pub const FV_ROOT_FOLDER_ENV: &str = "FV_ROOT_FOLDER";

/// Where the hierarchy is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceChoice {
    /// The running OmniFocus application
    Live,
    /// A JSON snapshot file
    File(PathBuf),
}

impl SourceChoice {
    /// Build the data source this choice names
    pub fn into_source(self) -> Arc<dyn DataSource> {
        match self {
            SourceChoice::Live => Arc::new(OmniFocusSource::new()),
            SourceChoice::File(path) => Arc::new(JsonFileSource::new(path)),
        }
    }
}

/// Read an environment variable, treating empty values as unset
fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

/// Decide which data source to use.
///
/// `--live` wins over everything; otherwise a snapshot path from the
/// command line or `FV_SNAPSHOT` selects a file, and the live application
/// is the fallback.
pub fn resolve_source(cli_snapshot: Option<PathBuf>, live: bool) -> SourceChoice {
    if live {
        return SourceChoice::Live;
    }

    if let Some(path) = cli_snapshot {
        return SourceChoice::File(path);
    }

    if let Some(path) = non_empty_env(FV_SNAPSHOT_ENV) {
        return SourceChoice::File(PathBuf::from(path));
    }

    SourceChoice::Live
}

/// Decide the root sentinel folder name
pub fn resolve_root_folder(cli_root: Option<String>) -> String {
    cli_root
        .or_else(|| non_empty_env(FV_ROOT_FOLDER_ENV))
        .unwrap_or_else(|| DEFAULT_ROOT_FOLDER_NAME.to_string())
}

/// Build a query engine from resolved settings
pub fn build_engine(source: SourceChoice, root_folder: String) -> QueryEngine {
    debug!("Using source {:?} with root folder '{}'", source, root_folder);
    let config = QueryConfig::new().with_root_folder_name(root_folder);
    QueryEngine::with_config(source.into_source(), config)
}
