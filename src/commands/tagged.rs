//! Tagged command for folder-scoped tag queries
//!
//! Implements `fv tagged` to list tasks carrying any of the given tags,
//! optionally limited to projects under the given folders.

use clap::Args;
use focusview_core::{DisplayRow, QueryEngine, QueryMatches, present};

use crate::error::AppResult;
use crate::output::format_row_table;

/// List tasks by tag, optionally scoped to folders
#[derive(Debug, Args)]
pub struct TaggedCommand {
    /// Tag name (can be specified multiple times; order is kept)
    #[arg(short, long = "tag", required = true)]
    pub tags: Vec<String>,

    /// Only keep tasks whose project is under this folder (can be specified multiple times)
    #[arg(short, long = "folder")]
    pub folders: Vec<String>,

    /// Print rows as JSON
    #[arg(long)]
    pub json: bool,
}

impl TaggedCommand {
    /// Execute the tagged command.
    ///
    /// Without folders this is a plain tag query. Tasks carrying several of
    /// the requested tags are listed once per tag.
    pub async fn execute(&self, engine: &QueryEngine) -> Vec<DisplayRow> {
        let tasks = if self.folders.is_empty() {
            engine.resolve_tasks_for_tags(&self.tags).await
        } else {
            engine
                .resolve_tasks_for_tags_in_folders(&self.tags, &self.folders)
                .await
        };

        present(&QueryMatches::Tasks(tasks))
    }

    /// Format rows according to the output flags
    pub fn format(&self, rows: &[DisplayRow]) -> AppResult<String> {
        if self.json {
            Ok(serde_json::to_string_pretty(rows)?)
        } else {
            Ok(format_row_table(rows))
        }
    }
}
