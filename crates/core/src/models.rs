//! Data models for the task hierarchy
//!
//! Folders contain projects and other folders, projects own tasks, and
//! tags attach to tasks. Every entity is a read-only value copied out of
//! the data source when a snapshot is taken.

use serde::{Deserialize, Serialize};

/// The kinds of entity a lookup can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Folder,
    Project,
    Task,
    Tag,
}

impl EntityKind {
    /// Returns the lowercase name used in messages
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Folder => "folder",
            EntityKind::Project => "project",
            EntityKind::Task => "task",
            EntityKind::Tag => "tag",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A folder in the hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
    /// Containing folder, `None` at the top level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl Folder {
    /// Create a top-level folder
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id: None,
        }
    }

    /// Place this folder inside another folder
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }
}

/// A project, contained by at most one folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    /// Containing folder, `None` when the project sits at the root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
}

impl Project {
    /// Create a project at the root
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            folder_id: None,
        }
    }

    /// Place this project inside a folder
    pub fn in_folder(mut self, folder_id: impl Into<String>) -> Self {
        self.folder_id = Some(folder_id.into());
        self
    }
}

/// A task, owned by at most one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

impl Task {
    /// Create a task outside any project (inbox)
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            project_id: None,
        }
    }

    /// Attach this task to a project
    pub fn in_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }
}

/// A tag together with the tasks carrying it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    /// Tagged task ids, in the source's enumeration order
    #[serde(default)]
    pub task_ids: Vec<String>,
}

impl Tag {
    /// Create a tag with no tasks
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            task_ids: Vec::new(),
        }
    }

    /// Attach the tag to the given tasks, keeping their order
    pub fn with_tasks(mut self, task_ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.task_ids.extend(task_ids.into_iter().map(Into::into));
        self
    }
}

/// Anything that can live inside a folder
///
/// Ancestry walks start from a project and continue through folders, so
/// both share one closed type with a guaranteed parent lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container<'a> {
    Folder(&'a Folder),
    Project(&'a Project),
}

impl<'a> Container<'a> {
    /// Id of the containing folder, if any
    pub fn parent_folder_id(&self) -> Option<&'a str> {
        match self {
            Container::Folder(folder) => folder.parent_id.as_deref(),
            Container::Project(project) => project.folder_id.as_deref(),
        }
    }
}

/// A matched task, shaped for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub name: String,
    pub id: String,
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            name: task.name.clone(),
            id: task.id.clone(),
        }
    }
}

/// A matched project, shaped for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub name: String,
    pub id: String,
}

impl From<&Project> for ProjectRecord {
    fn from(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            id: project.id.clone(),
        }
    }
}

/// The raw match set of one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryMatches {
    Tasks(Vec<TaskRecord>),
    Projects(Vec<ProjectRecord>),
}

impl QueryMatches {
    pub fn len(&self) -> usize {
        match self {
            QueryMatches::Tasks(tasks) => tasks.len(),
            QueryMatches::Projects(projects) => projects.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for QueryMatches {
    fn default() -> Self {
        QueryMatches::Tasks(Vec::new())
    }
}
