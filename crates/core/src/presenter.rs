//! Display shaping for query results

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::QueryMatches;
use crate::selector::Selector;

/// Scheme and path prefix of OmniFocus item links
pub const DEEP_LINK_PREFIX: &str = "omnifocus:///task/";

/// One rendered row: a label and the id its link points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub label: String,
    pub deep_link_target: String,
}

impl DisplayRow {
    /// The OmniFocus URL opening this row's item.
    ///
    /// Projects are addressed through the task path as well; OmniFocus
    /// resolves both.
    pub fn url(&self) -> String {
        format!("{}{}", DEEP_LINK_PREFIX, self.deep_link_target)
    }
}

/// Shape a match set into display rows.
///
/// Order and multiplicity are kept exactly as the engine produced them.
pub fn present(matches: &QueryMatches) -> Vec<DisplayRow> {
    match matches {
        QueryMatches::Tasks(tasks) => tasks
            .iter()
            .map(|t| DisplayRow {
                label: t.name.clone(),
                deep_link_target: t.id.clone(),
            })
            .collect(),
        QueryMatches::Projects(projects) => projects
            .iter()
            .map(|p| DisplayRow {
                label: p.name.clone(),
                deep_link_target: p.id.clone(),
            })
            .collect(),
    }
}

/// Everything a renderer needs to draw one block and refresh it later
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedBlock {
    /// The block text exactly as received; reruns parse it again
    pub source_text: String,
    /// `None` when the block had no recognized selector
    pub selector: Option<Selector>,
    pub rows: Vec<DisplayRow>,
    /// Snapshot time, `None` when no snapshot was obtained
    pub fetched_at: Option<DateTime<Utc>>,
}

impl RenderedBlock {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
