//! Query engine
//!
//! Owns the data source handle and runs one fetch-and-resolve cycle per
//! call. The public `resolve_*` and `render_block` operations never fail:
//! lookup misses, missing selectors and data source failures all come out
//! as an empty result. The `try_*` variants expose the underlying error.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::QueryConfig;
use crate::error::{QueryError, QueryResult};
use crate::models::{ProjectRecord, QueryMatches, TaskRecord};
use crate::presenter::{RenderedBlock, present};
use crate::query::SnapshotQueries;
use crate::selector::Selector;
use crate::snapshot::Snapshot;
use crate::source::DataSource;

/// Runs selector queries against a data source
#[derive(Clone)]
pub struct QueryEngine {
    source: Arc<dyn DataSource>,
    config: QueryConfig,
}

impl QueryEngine {
    /// Create an engine with the default configuration
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self::with_config(source, QueryConfig::default())
    }

    pub fn with_config(source: Arc<dyn DataSource>, config: QueryConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Fetch a fresh snapshot for one query
    pub async fn snapshot(&self) -> QueryResult<Snapshot> {
        Ok(Snapshot::fetch(self.source.as_ref()).await?)
    }

    // ========================================
    // Fallible operations
    // ========================================

    /// Tasks of the named project.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::NotFound` for an unknown project and
    /// `QueryError::DataSource` if the fetch fails.
    pub async fn try_resolve_tasks_for_project(&self, name: &str) -> QueryResult<Vec<TaskRecord>> {
        let snapshot = self.snapshot().await?;
        self.queries(&snapshot).tasks_for_project(name)
    }

    /// Projects under the named folder, at any depth.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::NotFound` for an unknown folder and
    /// `QueryError::DataSource` if the fetch fails.
    pub async fn try_resolve_projects_in_folder(
        &self,
        name: &str,
    ) -> QueryResult<Vec<ProjectRecord>> {
        let snapshot = self.snapshot().await?;
        self.queries(&snapshot).projects_in_folder(name)
    }

    /// Tasks carrying any of the named tags, duplicates included.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::DataSource` if the fetch fails.
    pub async fn try_resolve_tasks_for_tags(
        &self,
        names: &[String],
    ) -> QueryResult<Vec<TaskRecord>> {
        let snapshot = self.snapshot().await?;
        Ok(self.queries(&snapshot).tasks_for_tags(names))
    }

    /// Tagged tasks restricted to projects under any of `folders`.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::DataSource` if the fetch fails.
    pub async fn try_resolve_tasks_for_tags_in_folders(
        &self,
        tags: &[String],
        folders: &[String],
    ) -> QueryResult<Vec<TaskRecord>> {
        let snapshot = self.snapshot().await?;
        Ok(self
            .queries(&snapshot)
            .tasks_for_tags_in_folders(tags, folders))
    }

    /// Parse block text and resolve it.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::NoSelector` before touching the data source when
    /// the text has no selector, otherwise any error of the selected mode.
    pub async fn try_execute(&self, text: &str) -> QueryResult<QueryMatches> {
        let selector = Selector::parse(text)?;
        let snapshot = self.snapshot().await?;
        self.queries(&snapshot).execute(&selector)
    }

    // ========================================
    // Boundary operations
    // ========================================

    pub async fn resolve_tasks_for_project(&self, name: &str) -> Vec<TaskRecord> {
        absorb(self.try_resolve_tasks_for_project(name).await)
    }

    pub async fn resolve_projects_in_folder(&self, name: &str) -> Vec<ProjectRecord> {
        absorb(self.try_resolve_projects_in_folder(name).await)
    }

    pub async fn resolve_tasks_for_tags(&self, names: &[String]) -> Vec<TaskRecord> {
        absorb(self.try_resolve_tasks_for_tags(names).await)
    }

    pub async fn resolve_tasks_for_tags_in_folders(
        &self,
        tags: &[String],
        folders: &[String],
    ) -> Vec<TaskRecord> {
        absorb(self.try_resolve_tasks_for_tags_in_folders(tags, folders).await)
    }

    /// Parse and resolve block text; empty on any failure
    pub async fn execute(&self, text: &str) -> QueryMatches {
        absorb(self.try_execute(text).await)
    }

    /// Run a full parse, fetch, resolve and present cycle for one block
    pub async fn render_block(&self, text: &str) -> RenderedBlock {
        let mut block = RenderedBlock {
            source_text: text.to_string(),
            selector: None,
            rows: Vec::new(),
            fetched_at: None,
        };

        let selector = match Selector::parse(text) {
            Ok(selector) => selector,
            Err(e) => {
                log_absorbed(&e);
                return block;
            }
        };
        block.selector = Some(selector.clone());

        let snapshot = match self.snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log_absorbed(&e);
                return block;
            }
        };
        block.fetched_at = Some(snapshot.fetched_at());

        let matches = absorb(self.queries(&snapshot).execute(&selector));
        block.rows = present(&matches);
        block
    }

    /// Render the block again from its original text with a fresh snapshot.
    ///
    /// Does not cancel or wait for any other in-flight render.
    pub async fn rerun(&self, block: &RenderedBlock) -> RenderedBlock {
        self.render_block(&block.source_text).await
    }

    fn queries<'a>(&'a self, snapshot: &'a Snapshot) -> SnapshotQueries<'a> {
        SnapshotQueries::new(snapshot, &self.config.root_folder_name)
    }
}

/// Turn a failed query into an empty result
fn absorb<T: Default>(result: QueryResult<T>) -> T {
    result.unwrap_or_else(|e| {
        log_absorbed(&e);
        T::default()
    })
}

fn log_absorbed(err: &QueryError) {
    match err {
        QueryError::DataSource(_) => warn!("Query failed, rendering no rows: {}", err),
        QueryError::NotFound { .. } | QueryError::NoSelector => {
            debug!("Query matched nothing: {}", err)
        }
    }
}

static_assertions::assert_impl_all!(QueryEngine: Send, Sync);
