//! Block selector parsing
//!
//! A block holds lines such as `project: Billing`, `list-projects: Work`
//! or `tag: onGoing, waiting`. The first line carrying a recognized
//! keyword decides the query; every later line is ignored.

use serde::Serialize;

use crate::error::{QueryError, QueryResult};

const PROJECT_KEYWORD: &str = "project:";
const FOLDER_KEYWORD: &str = "list-projects:";
const TAG_KEYWORD: &str = "tag:";

/// Separator between tag names on a `tag:` line
const TAG_SEPARATOR: char = ',';

/// The parsed intent of one block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Selector {
    /// Tasks of the named project
    Project(String),
    /// Projects under the named folder, at any depth
    Folder(String),
    /// Tasks carrying any of the named tags, in the given order
    Tags(Vec<String>),
}

impl Selector {
    /// Classify block text into a selector.
    ///
    /// Lines must start with the keyword; the value is trimmed. A keyword
    /// line whose value is empty or only whitespace (`project:   `) does
    /// not count and scanning continues with the next line, rather than
    /// ending the scan with no selector.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::NoSelector` if no line carries a usable selector.
    pub fn parse(text: &str) -> QueryResult<Self> {
        text.lines()
            .find_map(Self::parse_line)
            .ok_or(QueryError::NoSelector)
    }

    fn parse_line(line: &str) -> Option<Self> {
        if let Some(value) = keyword_value(line, PROJECT_KEYWORD) {
            return Some(Selector::Project(value.to_string()));
        }
        if let Some(value) = keyword_value(line, FOLDER_KEYWORD) {
            return Some(Selector::Folder(value.to_string()));
        }
        if let Some(value) = keyword_value(line, TAG_KEYWORD) {
            let names = split_tag_names(value);
            if !names.is_empty() {
                return Some(Selector::Tags(names));
            }
        }
        None
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selector::Project(name) => write!(f, "{} {}", PROJECT_KEYWORD, name),
            Selector::Folder(name) => write!(f, "{} {}", FOLDER_KEYWORD, name),
            Selector::Tags(names) => write!(f, "{} {}", TAG_KEYWORD, names.join(", ")),
        }
    }
}

/// Trimmed, non-empty value following `keyword` at the start of `line`
fn keyword_value<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    line.strip_prefix(keyword)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn split_tag_names(value: &str) -> Vec<String> {
    value
        .split(TAG_SEPARATOR)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
