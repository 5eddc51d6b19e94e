//! Selector resolution over a snapshot
//!
//! `SnapshotQueries` answers the three selector kinds (plus the scoped tag
//! query) against one already-fetched snapshot. Lookup misses surface as
//! `QueryError::NotFound`; absorbing them is the engine's job.

use std::collections::HashSet;

use tracing::debug;

use crate::ancestry::AncestryResolver;
use crate::error::{QueryError, QueryResult};
use crate::models::{EntityKind, ProjectRecord, QueryMatches, Task, TaskRecord};
use crate::selector::Selector;
use crate::snapshot::Snapshot;

/// Query operations bound to one snapshot
pub struct SnapshotQueries<'a> {
    snapshot: &'a Snapshot,
    resolver: AncestryResolver<'a>,
}

impl<'a> SnapshotQueries<'a> {
    /// Create queries over `snapshot`, stopping ancestry walks at
    /// folders named `root_folder_name`
    pub fn new(snapshot: &'a Snapshot, root_folder_name: &'a str) -> Self {
        Self {
            snapshot,
            resolver: AncestryResolver::new(snapshot, root_folder_name),
        }
    }

    /// Resolve a parsed selector into its match set
    pub fn execute(&self, selector: &Selector) -> QueryResult<QueryMatches> {
        match selector {
            Selector::Project(name) => self.tasks_for_project(name).map(QueryMatches::Tasks),
            Selector::Folder(name) => self.projects_in_folder(name).map(QueryMatches::Projects),
            Selector::Tags(names) => Ok(QueryMatches::Tasks(self.tasks_for_tags(names))),
        }
    }

    /// All tasks of the named project, in source order.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::NotFound` if no project has that name.
    pub fn tasks_for_project(&self, name: &str) -> QueryResult<Vec<TaskRecord>> {
        let project = self
            .snapshot
            .find_project_by_name(name)
            .ok_or_else(|| QueryError::not_found(EntityKind::Project, name))?;

        let tasks: Vec<TaskRecord> = self
            .snapshot
            .tasks_of_project(project)
            .map(TaskRecord::from)
            .collect();

        debug!("Project '{}' has {} tasks", name, tasks.len());
        Ok(tasks)
    }

    /// Every project under the named folder, at any depth.
    ///
    /// Scans all projects in the snapshot, not only direct children.
    /// Membership is by folder name, so projects under a different folder
    /// sharing the name are included as well.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::NotFound` if no folder has that name.
    pub fn projects_in_folder(&self, name: &str) -> QueryResult<Vec<ProjectRecord>> {
        if self.snapshot.find_folder_by_name(name).is_none() {
            return Err(QueryError::not_found(EntityKind::Folder, name));
        }

        let projects: Vec<ProjectRecord> = self
            .snapshot
            .projects()
            .iter()
            .filter(|project| self.resolver.is_under_folder(project, name))
            .map(ProjectRecord::from)
            .collect();

        debug!("Folder '{}' holds {} projects", name, projects.len());
        Ok(projects)
    }

    /// Tasks carrying any of the named tags.
    ///
    /// Tags are visited in the given order and their tasks appended as-is:
    /// a task carrying two requested tags appears twice. Unknown tag names
    /// are skipped.
    pub fn tasks_for_tags(&self, names: &[String]) -> Vec<TaskRecord> {
        self.tagged_tasks(names).map(TaskRecord::from).collect()
    }

    /// Tasks carrying any of `tags` whose project lies under any of
    /// `folders`.
    ///
    /// Keeps the ordering and duplicates of `tasks_for_tags`.
    pub fn tasks_for_tags_in_folders(
        &self,
        tags: &[String],
        folders: &[String],
    ) -> Vec<TaskRecord> {
        let tasks: Vec<&Task> = self.tagged_tasks(tags).collect();
        self.filter_tasks_by_folders(tasks, folders)
            .into_iter()
            .map(TaskRecord::from)
            .collect()
    }

    /// Keep the tasks whose project lies under any of the named folders.
    ///
    /// Tasks without a project, or whose project id does not resolve, are
    /// dropped.
    pub fn filter_tasks_by_folders<'t>(
        &self,
        tasks: impl IntoIterator<Item = &'t Task>,
        folder_names: &[String],
    ) -> Vec<&'t Task> {
        let targets: HashSet<&str> = folder_names.iter().map(String::as_str).collect();
        tasks
            .into_iter()
            .filter(|task| {
                self.snapshot
                    .project_containing_task(task)
                    .is_some_and(|project| self.resolver.is_under_any_folder(project, &targets))
            })
            .collect()
    }

    fn tagged_tasks<'n>(&'n self, names: &'n [String]) -> impl Iterator<Item = &'a Task> + 'n {
        let snapshot = self.snapshot;
        names.iter().flat_map(move |name| {
            let tag = snapshot.find_tag_by_name(name);
            match tag {
                Some(tag) => debug!("Tag '{}' has {} task references", name, tag.task_ids.len()),
                None => debug!("Tag '{}' not found, skipping", name),
            }
            tag.into_iter().flat_map(move |tag| snapshot.tasks_of_tag(tag))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Folder, Project, Tag};
    use crate::snapshot::SnapshotDocument;

    fn names(records: &[TaskRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    fn fixture() -> Snapshot {
        Snapshot::new(SnapshotDocument {
            folders: vec![
                Folder::new("root", "OmniFocus"),
                Folder::new("f-work", "Work").with_parent("root"),
                Folder::new("f-gematik", "Gematik").with_parent("f-work"),
                Folder::new("f-home", "Home").with_parent("root"),
                Folder::new("f-empty", "Empty").with_parent("root"),
            ],
            projects: vec![
                Project::new("p-billing", "Billing").in_folder("f-gematik"),
                Project::new("p-hiring", "Hiring").in_folder("f-work"),
                Project::new("p-garden", "Garden").in_folder("f-home"),
                Project::new("p-loose", "Loose"),
            ],
            tasks: vec![
                Task::new("t1", "Send invoice").in_project("p-billing"),
                Task::new("t2", "Interview").in_project("p-hiring"),
                Task::new("t3", "Mow lawn").in_project("p-garden"),
                Task::new("t4", "Reconcile").in_project("p-billing"),
                Task::new("t5", "Call bank"),
                Task::new("t6", "Ghost").in_project("p-deleted"),
            ],
            tags: vec![
                Tag::new("g1", "onGoing").with_tasks(["t1", "t3", "t5"]),
                Tag::new("g2", "waiting").with_tasks(["t3", "t2", "t6"]),
            ],
        })
    }

    #[test]
    fn test_tasks_for_project() {
        let snapshot = fixture();
        let queries = SnapshotQueries::new(&snapshot, "OmniFocus");
        let tasks = queries.tasks_for_project("Billing").unwrap();
        assert_eq!(
            tasks,
            vec![
                TaskRecord {
                    name: "Send invoice".to_string(),
                    id: "t1".to_string()
                },
                TaskRecord {
                    name: "Reconcile".to_string(),
                    id: "t4".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_tasks_for_unknown_project_is_not_found() {
        let snapshot = fixture();
        let queries = SnapshotQueries::new(&snapshot, "OmniFocus");
        match queries.tasks_for_project("Nonexistent") {
            Err(QueryError::NotFound { kind, name }) => {
                assert_eq!(kind, EntityKind::Project);
                assert_eq!(name, "Nonexistent");
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_projects_in_folder_is_recursive() {
        let snapshot = fixture();
        let queries = SnapshotQueries::new(&snapshot, "OmniFocus");
        let ids: Vec<String> = queries
            .projects_in_folder("Work")
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["p-billing", "p-hiring"]);
    }

    #[test]
    fn test_projects_in_empty_folder() {
        let snapshot = fixture();
        let queries = SnapshotQueries::new(&snapshot, "OmniFocus");
        assert!(queries.projects_in_folder("Empty").unwrap().is_empty());
    }

    #[test]
    fn test_projects_in_unknown_folder_is_not_found() {
        let snapshot = fixture();
        let queries = SnapshotQueries::new(&snapshot, "OmniFocus");
        assert!(matches!(
            queries.projects_in_folder("Nowhere"),
            Err(QueryError::NotFound {
                kind: EntityKind::Folder,
                ..
            })
        ));
    }

    #[test]
    fn test_projects_in_root_folder_is_empty() {
        let snapshot = fixture();
        let queries = SnapshotQueries::new(&snapshot, "OmniFocus");
        assert!(queries.projects_in_folder("OmniFocus").unwrap().is_empty());
    }

    #[test]
    fn test_tasks_for_tags_appends_in_tag_order_with_duplicates() {
        let snapshot = fixture();
        let queries = SnapshotQueries::new(&snapshot, "OmniFocus");
        let tasks = queries.tasks_for_tags(&["onGoing".to_string(), "waiting".to_string()]);
        assert_eq!(
            names(&tasks),
            vec![
                "Send invoice",
                "Mow lawn",
                "Call bank",
                "Mow lawn",
                "Interview",
                "Ghost"
            ]
        );
    }

    #[test]
    fn test_tasks_for_tags_skips_unknown_tags() {
        let snapshot = fixture();
        let queries = SnapshotQueries::new(&snapshot, "OmniFocus");
        let tasks = queries.tasks_for_tags(&["nope".to_string(), "waiting".to_string()]);
        assert_eq!(names(&tasks), vec!["Mow lawn", "Interview", "Ghost"]);

        assert!(queries.tasks_for_tags(&["nope".to_string()]).is_empty());
    }

    #[test]
    fn test_filter_tasks_by_folders_drops_unattached_tasks() {
        let snapshot = fixture();
        let queries = SnapshotQueries::new(&snapshot, "OmniFocus");
        let kept = queries.filter_tasks_by_folders(snapshot.tasks(), &["Work".to_string()]);
        let ids: Vec<&str> = kept.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2", "t4"]);
    }

    #[test]
    fn test_tasks_for_tags_in_folders() {
        let snapshot = fixture();
        let queries = SnapshotQueries::new(&snapshot, "OmniFocus");
        let tasks = queries.tasks_for_tags_in_folders(
            &["onGoing".to_string(), "waiting".to_string()],
            &["Home".to_string(), "Gematik".to_string()],
        );
        assert_eq!(names(&tasks), vec!["Send invoice", "Mow lawn", "Mow lawn"]);
    }

    #[test]
    fn test_execute_dispatches_on_selector() {
        let snapshot = fixture();
        let queries = SnapshotQueries::new(&snapshot, "OmniFocus");

        let by_folder = queries
            .execute(&Selector::Folder("Gematik".to_string()))
            .unwrap();
        assert_eq!(
            by_folder,
            QueryMatches::Projects(vec![ProjectRecord {
                name: "Billing".to_string(),
                id: "p-billing".to_string()
            }])
        );

        let by_tag = queries
            .execute(&Selector::Tags(vec!["unknown".to_string()]))
            .unwrap();
        assert!(by_tag.is_empty());

        assert!(
            queries
                .execute(&Selector::Project("Nope".to_string()))
                .is_err()
        );
    }
}
