//! Live OmniFocus data source
//!
//! Runs a JavaScript for Automation script through `osascript` that dumps
//! the default document as one JSON object, then decodes it. The whole
//! hierarchy is read in a single process invocation.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::DataSourceError;
use crate::models::{Folder, Project, Tag, Task};
use crate::snapshot::SnapshotDocument;

use super::DataSource;

/// Program used to run automation scripts
pub const DEFAULT_OSASCRIPT: &str = "osascript";

/// Script printing every folder, project, task and tag of the default
/// OmniFocus document in the snapshot JSON format.
const EXPORT_SCRIPT: &str = r#"
(() => {
    const doc = Application('OmniFocus').defaultDocument;
    const folderIdOf = (item) => {
        try {
            const container = item.container();
            return container && container.class() === 'folder' ? container.id() : null;
        } catch (e) {
            return null;
        }
    };
    const projectIdOf = (task) => {
        try {
            const project = task.containingProject();
            return project ? project.id() : null;
        } catch (e) {
            return null;
        }
    };
    return JSON.stringify({
        folders: doc.flattenedFolders().map(f => ({ id: f.id(), name: f.name(), parent_id: folderIdOf(f) })),
        projects: doc.flattenedProjects().map(p => ({ id: p.id(), name: p.name(), folder_id: folderIdOf(p) })),
        tasks: doc.flattenedTasks().map(t => ({ id: t.id(), name: t.name(), project_id: projectIdOf(t) })),
        tags: doc.flattenedTags().map(g => ({ id: g.id(), name: g.name(), task_ids: g.tasks().map(t => t.id()) })),
    });
})()
"#;

/// A data source that queries the running OmniFocus application
///
/// Tasks are exported from `flattenedTasks`, so subtasks count as tasks of
/// their containing project. Project mode therefore lists nested action
/// groups and their children, not only the project's top-level tasks.
#[derive(Debug, Clone)]
pub struct OmniFocusSource {
    program: String,
}

impl OmniFocusSource {
    pub fn new() -> Self {
        Self {
            program: DEFAULT_OSASCRIPT.to_string(),
        }
    }

    /// Use a different script runner binary
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run the export script and decode its output.
    ///
    /// # Errors
    ///
    /// Returns `DataSourceError::Spawn` if the runner cannot be started.
    /// Returns `DataSourceError::ScriptFailed` if it exits unsuccessfully.
    /// Returns `DataSourceError::Parse` if stdout is not a snapshot document.
    async fn export(&self) -> Result<SnapshotDocument, DataSourceError> {
        debug!("Running OmniFocus export via {}", self.program);

        let output = Command::new(&self.program)
            .args(["-l", "JavaScript", "-e", EXPORT_SCRIPT])
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| DataSourceError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!("OmniFocus export failed: {}", stderr);
            return Err(DataSourceError::ScriptFailed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr,
            });
        }

        parse_export(&output.stdout)
    }
}

impl Default for OmniFocusSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode the export script's stdout
fn parse_export(stdout: &[u8]) -> Result<SnapshotDocument, DataSourceError> {
    Ok(serde_json::from_slice(stdout)?)
}

#[async_trait]
impl DataSource for OmniFocusSource {
    async fn list_folders(&self) -> Result<Vec<Folder>, DataSourceError> {
        Ok(self.export().await?.folders)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, DataSourceError> {
        Ok(self.export().await?.projects)
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, DataSourceError> {
        Ok(self.export().await?.tasks)
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, DataSourceError> {
        Ok(self.export().await?.tags)
    }

    async fn tasks_of_tag(&self, tag: &Tag) -> Result<Vec<String>, DataSourceError> {
        Ok(self
            .export()
            .await?
            .tags
            .into_iter()
            .find(|t| t.id == tag.id)
            .map(|t| t.task_ids)
            .unwrap_or_default())
    }

    async fn fetch_document(&self) -> Result<SnapshotDocument, DataSourceError> {
        self.export().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_export_with_null_parents() {
        let stdout = br#"{
            "folders": [{"id": "f1", "name": "Work", "parent_id": null}],
            "projects": [{"id": "p1", "name": "Billing", "folder_id": "f1"}],
            "tasks": [{"id": "t1", "name": "Invoice", "project_id": null}],
            "tags": [{"id": "g1", "name": "onGoing", "task_ids": ["t1"]}]
        }"#;

        let document = parse_export(stdout).unwrap();
        assert_eq!(document.folders[0], Folder::new("f1", "Work"));
        assert_eq!(document.tasks[0].project_id, None);
        assert_eq!(document.tags[0].task_ids, vec!["t1"]);
    }

    #[test]
    fn test_parse_export_rejects_garbage() {
        let result = parse_export(b"execution error: OmniFocus got an error (-1728)");
        assert!(matches!(result, Err(DataSourceError::Parse(_))));
    }

    #[test]
    fn test_export_script_emits_every_collection() {
        for key in ["folders:", "projects:", "tasks:", "tags:"] {
            assert!(EXPORT_SCRIPT.contains(key), "script should emit {}", key);
        }
    }

    #[test]
    fn test_export_script_reads_flattened_tasks() {
        assert!(EXPORT_SCRIPT.contains("doc.flattenedTasks()"));
        assert!(EXPORT_SCRIPT.contains("task.containingProject()"));
    }

    #[tokio::test]
    async fn test_missing_runner_is_spawn_error() {
        let source = OmniFocusSource::with_program("fv-no-such-osascript-binary");
        let result = source.fetch_document().await;
        match result {
            Err(DataSourceError::Spawn { program, .. }) => {
                assert_eq!(program, "fv-no-such-osascript-binary")
            }
            other => panic!("Expected spawn error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_runner_is_script_failed() {
        let source = OmniFocusSource::with_program("false");
        let result = source.fetch_document().await;
        assert!(matches!(result, Err(DataSourceError::ScriptFailed { .. })));
    }
}
