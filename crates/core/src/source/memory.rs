//! In-memory data source

use async_trait::async_trait;

use crate::error::DataSourceError;
use crate::models::{Folder, Project, Tag, Task};
use crate::snapshot::SnapshotDocument;

use super::DataSource;

/// A data source backed by a document held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    document: SnapshotDocument,
}

impl InMemorySource {
    pub fn new(document: SnapshotDocument) -> Self {
        Self { document }
    }

    pub fn with_folder(mut self, folder: Folder) -> Self {
        self.document.folders.push(folder);
        self
    }

    pub fn with_project(mut self, project: Project) -> Self {
        self.document.projects.push(project);
        self
    }

    pub fn with_task(mut self, task: Task) -> Self {
        self.document.tasks.push(task);
        self
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.document.tags.push(tag);
        self
    }
}

#[async_trait]
impl DataSource for InMemorySource {
    async fn list_folders(&self) -> Result<Vec<Folder>, DataSourceError> {
        Ok(self.document.folders.clone())
    }

    async fn list_projects(&self) -> Result<Vec<Project>, DataSourceError> {
        Ok(self.document.projects.clone())
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, DataSourceError> {
        Ok(self.document.tasks.clone())
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, DataSourceError> {
        Ok(self.document.tags.clone())
    }

    async fn tasks_of_tag(&self, tag: &Tag) -> Result<Vec<String>, DataSourceError> {
        Ok(self
            .document
            .tags
            .iter()
            .find(|t| t.id == tag.id)
            .map(|t| t.task_ids.clone())
            .unwrap_or_default())
    }

    async fn fetch_document(&self) -> Result<SnapshotDocument, DataSourceError> {
        Ok(self.document.clone())
    }
}
