//! Data source capability and its backends
//!
//! The query engine never talks to OmniFocus directly; it receives a
//! `DataSource` and reads one full document from it per query.

mod file;
mod memory;
mod omnifocus;

pub use file::JsonFileSource;
pub use memory::InMemorySource;
pub use omnifocus::OmniFocusSource;

use async_trait::async_trait;

use crate::error::DataSourceError;
use crate::models::{Folder, Project, Tag, Task};
use crate::snapshot::SnapshotDocument;

/// Read-only access to a task hierarchy
///
/// Every call may fail with a `DataSourceError`. Implementations must not
/// cache across calls: each fetch reflects the current state of the store.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn list_folders(&self) -> Result<Vec<Folder>, DataSourceError>;

    async fn list_projects(&self) -> Result<Vec<Project>, DataSourceError>;

    async fn list_tasks(&self) -> Result<Vec<Task>, DataSourceError>;

    /// All tags; `task_ids` may be left empty and is filled from `tasks_of_tag`
    async fn list_tags(&self) -> Result<Vec<Tag>, DataSourceError>;

    /// Ids of the tasks carrying `tag`, in the source's order
    async fn tasks_of_tag(&self, tag: &Tag) -> Result<Vec<String>, DataSourceError>;

    /// Read the whole hierarchy.
    ///
    /// The default composes the granular calls. Sources that can answer in
    /// a single round trip should override it.
    async fn fetch_document(&self) -> Result<SnapshotDocument, DataSourceError> {
        let folders = self.list_folders().await?;
        let projects = self.list_projects().await?;
        let tasks = self.list_tasks().await?;

        let mut tags = self.list_tags().await?;
        for tag in &mut tags {
            let task_ids = self.tasks_of_tag(tag).await?;
            tag.task_ids = task_ids;
        }

        Ok(SnapshotDocument {
            folders,
            projects,
            tasks,
            tags,
        })
    }
}
