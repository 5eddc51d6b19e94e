//! Output formatting module for Focusview
//!
//! Provides table formatting for rendered rows.

use focusview_core::{DisplayRow, RenderedBlock};

/// Maximum width for the name column before truncation
const MAX_NAME_WIDTH: usize = 40;

/// Message printed instead of an empty table
pub const EMPTY_MESSAGE: &str = "No rows.";

/// Truncate a string to the specified maximum width, adding ellipsis if needed.
fn truncate(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        let head: String = s.chars().take(max_width - 3).collect();
        format!("{}...", head)
    }
}

/// Format rows into an aligned table string.
///
/// Produces output in the format:
/// ```text
/// Name          Link
/// ------------  ---------------------------
/// Send invoice  omnifocus:///task/hZ3pQ8rT1
/// ```
///
/// Returns `No rows.` for an empty slice.
pub fn format_row_table(rows: &[DisplayRow]) -> String {
    if rows.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }

    let headers = ["Name", "Link"];

    let labels: Vec<String> = rows
        .iter()
        .map(|r| truncate(&r.label, MAX_NAME_WIDTH))
        .collect();
    let links: Vec<String> = rows.iter().map(DisplayRow::url).collect();

    let name_width = labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(headers[0].len());

    let link_width = links
        .iter()
        .map(|l| l.len())
        .max()
        .unwrap_or(0)
        .max(headers[1].len());

    let mut output = String::new();

    output.push_str(&format!(
        "{:<name_w$}  {}\n",
        headers[0],
        headers[1],
        name_w = name_width,
    ));

    output.push_str(&format!(
        "{:->name_w$}  {:->link_w$}\n",
        "",
        "",
        name_w = name_width,
        link_w = link_width,
    ));

    for (label, link) in labels.iter().zip(&links) {
        output.push_str(&format!(
            "{:<name_w$}  {}\n",
            label,
            link,
            name_w = name_width,
        ));
    }

    // Remove trailing newline
    output.pop();

    output
}

/// Format a rendered block: the table followed by the snapshot time
pub fn format_block(block: &RenderedBlock) -> String {
    let table = format_row_table(&block.rows);
    match block.fetched_at {
        Some(at) => format!("{}\n\nFetched {}", table, at.format("%Y-%m-%d %H:%M:%S UTC")),
        None => table,
    }
}
