//! Text dimension of project filtering.
//!
//! Matching is a case-insensitive substring test against the project name.
//! The query is trimmed at both ends but never split into tokens.

use crate::model::project::Project;

/// Returns the effective search needle, or `None` for a blank query.
pub fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}

/// Returns whether `project` passes the text filter for `query`.
pub fn matches_query(project: &Project, query: &str) -> bool {
    match normalize_query(query) {
        Some(needle) => matches_needle(project, needle.as_str()),
        None => true,
    }
}

/// Same as [`matches_query`] with an already normalized needle.
pub(crate) fn matches_needle(project: &Project, needle: &str) -> bool {
    project.name.to_lowercase().contains(needle)
}
