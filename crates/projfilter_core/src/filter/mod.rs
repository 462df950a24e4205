//! Pure filter predicates and the debounce primitive.
//!
//! # Responsibility
//! - Keep each filter dimension independently testable.
//! - Provide the cancellable timer used for query input.
//!
//! # Invariants
//! - A project is visible iff it passes both the tag and the text filter.

pub mod debounce;
pub mod query;
pub mod tags;

use crate::model::project::Project;
use query::{matches_needle, normalize_query};
use tags::{matches_tags, TagSelection};

/// Conjunction of the tag and text predicates.
pub fn is_visible(project: &Project, selected: &TagSelection, query: &str) -> bool {
    is_visible_with_needle(project, selected, normalize_query(query).as_deref())
}

/// Same as [`is_visible`] with the query already normalized; `None` is blank.
pub(crate) fn is_visible_with_needle(
    project: &Project,
    selected: &TagSelection,
    needle: Option<&str>,
) -> bool {
    matches_tags(project, selected)
        && needle.map_or(true, |needle| matches_needle(project, needle))
}
