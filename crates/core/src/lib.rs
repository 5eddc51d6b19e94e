//! Query core for Focusview
//!
//! Resolves block selectors (`project:`, `list-projects:`, `tag:`) against
//! a snapshot of an OmniFocus-style hierarchy of folders, projects, tasks
//! and tags, and shapes the matches into display rows.

pub mod ancestry;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod presenter;
pub mod query;
pub mod selector;
pub mod snapshot;
pub mod source;

pub use ancestry::AncestryResolver;
pub use config::{DEFAULT_ROOT_FOLDER_NAME, QueryConfig};
pub use engine::QueryEngine;
pub use error::{DataSourceError, QueryError, QueryResult};
pub use models::{
    Container, EntityKind, Folder, Project, ProjectRecord, QueryMatches, Tag, Task, TaskRecord,
};
pub use presenter::{DEEP_LINK_PREFIX, DisplayRow, RenderedBlock, present};
pub use query::SnapshotQueries;
pub use selector::Selector;
pub use snapshot::{Snapshot, SnapshotDocument};
pub use source::{DataSource, InMemorySource, JsonFileSource, OmniFocusSource};
