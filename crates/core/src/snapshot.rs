//! In-memory hierarchy model
//!
//! A `Snapshot` is an immutable, point-in-time copy of every folder,
//! project, task and tag, indexed for the lookups the query engine needs.
//! One snapshot serves exactly one query and is dropped afterwards.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DataSourceError;
use crate::models::{Container, Folder, Project, Tag, Task};
use crate::source::DataSource;

/// The serialized form of a full hierarchy read
///
/// Collections are kept in the source's enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    #[serde(default)]
    pub folders: Vec<Folder>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// Read-only view over one fetched hierarchy
#[derive(Debug, Clone)]
pub struct Snapshot {
    folders: Vec<Folder>,
    projects: Vec<Project>,
    tasks: Vec<Task>,
    tags: Vec<Tag>,
    folder_index: HashMap<String, usize>,
    project_index: HashMap<String, usize>,
    task_index: HashMap<String, usize>,
    fetched_at: DateTime<Utc>,
}

/// Map ids to positions; on a duplicate id the first entry wins.
fn index_by_id<'a>(ids: impl Iterator<Item = &'a String>) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    for (position, id) in ids.enumerate() {
        index.entry(id.clone()).or_insert(position);
    }
    index
}

impl Snapshot {
    /// Fetch a fresh snapshot from the data source.
    ///
    /// This is the single suspension point of a query.
    ///
    /// # Errors
    ///
    /// Returns whatever `DataSourceError` the source reports.
    pub async fn fetch(source: &dyn DataSource) -> Result<Self, DataSourceError> {
        let document = source.fetch_document().await?;
        let snapshot = Self::new(document);
        debug!(
            "Fetched snapshot: {} folders, {} projects, {} tasks, {} tags",
            snapshot.folders.len(),
            snapshot.projects.len(),
            snapshot.tasks.len(),
            snapshot.tags.len()
        );
        Ok(snapshot)
    }

    /// Build a snapshot stamped with the current time
    pub fn new(document: SnapshotDocument) -> Self {
        Self::taken_at(document, Utc::now())
    }

    /// Build a snapshot with an explicit timestamp
    pub fn taken_at(document: SnapshotDocument, fetched_at: DateTime<Utc>) -> Self {
        let SnapshotDocument {
            folders,
            projects,
            tasks,
            tags,
        } = document;

        Self {
            folder_index: index_by_id(folders.iter().map(|f| &f.id)),
            project_index: index_by_id(projects.iter().map(|p| &p.id)),
            task_index: index_by_id(tasks.iter().map(|t| &t.id)),
            folders,
            projects,
            tasks,
            tags,
            fetched_at,
        }
    }

    /// When the underlying data was read
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    // ========================================
    // Name lookups
    // ========================================

    /// Find a project by exact, case-sensitive name.
    ///
    /// When several projects share the name, the first one in enumeration
    /// order is returned.
    pub fn find_project_by_name(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name == name)
    }

    /// Find a folder by exact, case-sensitive name (first match wins)
    pub fn find_folder_by_name(&self, name: &str) -> Option<&Folder> {
        self.folders.iter().find(|f| f.name == name)
    }

    /// Find a tag by exact, case-sensitive name (first match wins)
    pub fn find_tag_by_name(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.name == name)
    }

    // ========================================
    // Id lookups
    // ========================================

    pub fn folder(&self, id: &str) -> Option<&Folder> {
        self.folder_index.get(id).map(|&i| &self.folders[i])
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.project_index.get(id).map(|&i| &self.projects[i])
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.task_index.get(id).map(|&i| &self.tasks[i])
    }

    // ========================================
    // Relations
    // ========================================

    /// Tasks owned by the project, in enumeration order
    pub fn tasks_of_project<'a>(&'a self, project: &'a Project) -> impl Iterator<Item = &'a Task> {
        self.tasks
            .iter()
            .filter(move |t| t.project_id.as_deref() == Some(project.id.as_str()))
    }

    /// Projects placed directly inside the folder.
    ///
    /// Projects in nested folders are not included; use the ancestry
    /// resolver for recursive membership.
    pub fn projects_of_folder<'a>(
        &'a self,
        folder: &'a Folder,
    ) -> impl Iterator<Item = &'a Project> {
        self.projects
            .iter()
            .filter(move |p| p.folder_id.as_deref() == Some(folder.id.as_str()))
    }

    /// Tasks carrying the tag, in the tag's own order.
    ///
    /// Task ids that do not resolve in this snapshot are skipped.
    pub fn tasks_of_tag<'a>(&'a self, tag: &'a Tag) -> impl Iterator<Item = &'a Task> {
        tag.task_ids.iter().filter_map(move |id| self.task(id))
    }

    /// The project owning the task, `None` when absent or dangling
    pub fn project_containing_task(&self, task: &Task) -> Option<&Project> {
        task.project_id.as_deref().and_then(|id| self.project(id))
    }

    /// The folder containing a project or folder, `None` at the top level
    /// or when the parent id does not resolve.
    pub fn parent_folder_of(&self, entity: Container<'_>) -> Option<&Folder> {
        entity.parent_folder_id().and_then(|id| self.folder(id))
    }
}
