//! JSON snapshot file data source
//!
//! Reads an exported hierarchy from disk. The file is re-read on every
//! fetch so that a refreshed export is picked up by the next query.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::error::DataSourceError;
use crate::models::{Folder, Project, Tag, Task};
use crate::snapshot::SnapshotDocument;

use super::DataSource;

/// A data source reading a `SnapshotDocument` from a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the file.
    ///
    /// # Errors
    ///
    /// Returns `DataSourceError::Read` if the file cannot be read.
    /// Returns `DataSourceError::Parse` if it is not a valid document.
    async fn load(&self) -> Result<SnapshotDocument, DataSourceError> {
        debug!("Reading snapshot file: {}", self.path.display());
        let contents =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|e| DataSourceError::Read {
                    path: self.path.clone(),
                    source: e,
                })?;

        Ok(serde_json::from_str(&contents)?)
    }
}

#[async_trait]
impl DataSource for JsonFileSource {
    async fn list_folders(&self) -> Result<Vec<Folder>, DataSourceError> {
        Ok(self.load().await?.folders)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, DataSourceError> {
        Ok(self.load().await?.projects)
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, DataSourceError> {
        Ok(self.load().await?.tasks)
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, DataSourceError> {
        Ok(self.load().await?.tags)
    }

    async fn tasks_of_tag(&self, tag: &Tag) -> Result<Vec<String>, DataSourceError> {
        Ok(self
            .load()
            .await?
            .tags
            .into_iter()
            .find(|t| t.id == tag.id)
            .map(|t| t.task_ids)
            .unwrap_or_default())
    }

    async fn fetch_document(&self) -> Result<SnapshotDocument, DataSourceError> {
        self.load().await
    }
}
