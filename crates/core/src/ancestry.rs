//! Folder ancestry walks
//!
//! Climbs a project's containing-folder chain to decide whether it sits,
//! directly or through nested folders, under one of a set of folders.

use std::collections::HashSet;

use tracing::trace;

use crate::models::{Container, Project};
use crate::snapshot::Snapshot;

/// Resolves indirect folder membership against one snapshot
pub struct AncestryResolver<'a> {
    snapshot: &'a Snapshot,
    root_folder_name: &'a str,
}

impl<'a> AncestryResolver<'a> {
    /// Create a resolver that stops at folders named `root_folder_name`
    pub fn new(snapshot: &'a Snapshot, root_folder_name: &'a str) -> Self {
        Self {
            snapshot,
            root_folder_name,
        }
    }

    /// Check whether the project lives under any of the named folders.
    ///
    /// Walks upward from the project's containing folder. The walk ends
    /// with `false` at the root sentinel, at a folder without a parent, or
    /// when a folder repeats (cyclic or self-referencing parent links).
    /// The first ancestor whose name is in `target_folder_names` ends it
    /// with `true`.
    ///
    /// Runs in O(depth).
    pub fn is_under_any_folder(
        &self,
        project: &Project,
        target_folder_names: &HashSet<&str>,
    ) -> bool {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut current = self.snapshot.parent_folder_of(Container::Project(project));

        while let Some(folder) = current {
            if !visited.insert(folder.id.as_str()) {
                trace!(
                    "Folder cycle at '{}' while walking from project '{}'",
                    folder.id,
                    project.id
                );
                return false;
            }

            if folder.name == self.root_folder_name {
                trace!("Reached root folder from project '{}'", project.id);
                return false;
            }

            if target_folder_names.contains(folder.name.as_str()) {
                trace!("Project '{}' is under folder '{}'", project.id, folder.name);
                return true;
            }

            current = self.snapshot.parent_folder_of(Container::Folder(folder));
        }

        false
    }

    /// Check membership under a single folder name
    pub fn is_under_folder(&self, project: &Project, folder_name: &str) -> bool {
        self.is_under_any_folder(project, &HashSet::from([folder_name]))
    }
}
