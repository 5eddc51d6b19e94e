//! Test infrastructure for integration tests
//!
//! Provides isolated snapshot files and command builder helpers.
//! Each test writes its own snapshot into a unique temp directory.

use std::path::PathBuf;

use focusview::commands::{RenderCommand, TaggedCommand};
use focusview::config::{SourceChoice, build_engine};
use focusview_core::{Folder, Project, QueryEngine, SnapshotDocument, Tag, Task};

/// Test context holding a snapshot file on disk
pub struct TestContext {
    pub temp_dir: PathBuf,
    pub snapshot_path: PathBuf,
}

impl TestContext {
    /// Create a new test context with `document` written as the snapshot.
    ///
    /// The temp directory name uses process ID, thread ID, and nanosecond
    /// timestamp to guarantee isolation.
    pub fn new(document: &SnapshotDocument) -> Self {
        let temp_dir = std::env::temp_dir().join(format!(
            "fv-integration-test-{}-{:?}-{}",
            std::process::id(),
            std::thread::current().id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::create_dir_all(&temp_dir).unwrap();

        let ctx = Self {
            snapshot_path: temp_dir.join("snapshot.json"),
            temp_dir,
        };
        ctx.write_snapshot(document);
        ctx
    }

    /// Replace the snapshot on disk
    pub fn write_snapshot(&self, document: &SnapshotDocument) {
        let json = serde_json::to_string_pretty(document).unwrap();
        std::fs::write(&self.snapshot_path, json).unwrap();
    }

    /// Write raw text as the snapshot, valid JSON or not
    #[allow(dead_code)]
    pub fn write_raw_snapshot(&self, contents: &str) {
        std::fs::write(&self.snapshot_path, contents).unwrap();
    }

    /// Engine reading this context's snapshot with the default root folder
    pub fn engine(&self) -> QueryEngine {
        build_engine(
            SourceChoice::File(self.snapshot_path.clone()),
            "OmniFocus".to_string(),
        )
    }

    /// Write a block file into the temp directory and return its path
    #[allow(dead_code)]
    pub fn block_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        // Auto-cleanup on drop
        let _ = std::fs::remove_dir_all(&self.temp_dir);
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// OmniFocus(root) > Work > Gematik > Billing, plus a Private subtree
pub fn sample_document() -> SnapshotDocument {
    SnapshotDocument {
        folders: vec![
            Folder::new("root", "OmniFocus"),
            Folder::new("f-work", "Work").with_parent("root"),
            Folder::new("f-gematik", "Gematik").with_parent("f-work"),
            Folder::new("f-private", "Private").with_parent("root"),
        ],
        projects: vec![
            Project::new("p-billing", "Billing").in_folder("f-gematik"),
            Project::new("p-roadmap", "Roadmap").in_folder("f-work"),
            Project::new("p-travel", "Travel").in_folder("f-private"),
        ],
        tasks: vec![
            Task::new("t-invoice", "Send invoice").in_project("p-billing"),
            Task::new("t-q3", "Draft Q3 plan").in_project("p-roadmap"),
            Task::new("t-visa", "Apply for visa").in_project("p-travel"),
            Task::new("t-dunning", "Dunning run").in_project("p-billing"),
        ],
        tags: vec![
            Tag::new("g-ongoing", "onGoing").with_tasks(["t-invoice", "t-visa"]),
            Tag::new("g-waiting", "waiting").with_tasks(["t-visa", "t-q3"]),
        ],
    }
}

// =============================================================================
// Command Builder Helpers
// =============================================================================

/// Create a RenderCommand for inline block text.
pub fn render_cmd(block: &str) -> RenderCommand {
    RenderCommand {
        block: Some(block.to_string()),
        file: None,
        json: false,
        watch: None,
    }
}

/// Create a RenderCommand reading a block file.
#[allow(dead_code)]
pub fn render_file_cmd(path: PathBuf) -> RenderCommand {
    RenderCommand {
        block: None,
        file: Some(path),
        json: false,
        watch: None,
    }
}

/// Create a TaggedCommand.
pub fn tagged_cmd(tags: &[&str], folders: &[&str]) -> TaggedCommand {
    TaggedCommand {
        tags: tags.iter().map(|t| t.to_string()).collect(),
        folders: folders.iter().map(|f| f.to_string()).collect(),
        json: false,
    }
}
