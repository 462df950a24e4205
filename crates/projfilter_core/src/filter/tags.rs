//! Tag dimension of project filtering.
//!
//! # Invariants
//! - An empty selection applies no tag filtering.
//! - Multiple selected tags combine with OR: selecting more broadens.
//! - Toggling a tag twice restores the previous selection exactly.

use crate::model::project::{Project, Tag};
use std::collections::BTreeSet;

/// Returns whether `project` passes the tag filter for `selected`.
pub fn matches_tags(project: &Project, selected: &TagSelection) -> bool {
    selected.is_empty() || selected.iter().any(|tag| project.has_tag(tag))
}

/// Set of currently selected filter tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSelection {
    tags: BTreeSet<Tag>,
}

impl TagSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `tag`. Returns `true` when it is now selected.
    pub fn toggle(&mut self, tag: &str) -> bool {
        if self.tags.remove(tag) {
            false
        } else {
            self.tags.insert(tag.to_string());
            true
        }
    }

    /// Adds `tag`. Returns `false` when it was already selected.
    pub fn select(&mut self, tag: impl Into<Tag>) -> bool {
        self.tags.insert(tag.into())
    }

    /// Removes `tag`. Returns `false` when it was not selected.
    pub fn deselect(&mut self, tag: &str) -> bool {
        self.tags.remove(tag)
    }

    /// Replaces the whole selection. Returns whether anything changed.
    pub fn replace(&mut self, tags: BTreeSet<Tag>) -> bool {
        if self.tags == tags {
            return false;
        }
        self.tags = tags;
        true
    }

    /// Drops tags missing from `universe`. Returns how many were dropped.
    pub fn retain_known(&mut self, universe: &BTreeSet<Tag>) -> usize {
        let before = self.tags.len();
        self.tags.retain(|tag| universe.contains(tag));
        before - self.tags.len()
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl<T: Into<Tag>> FromIterator<T> for TagSelection {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().map(Into::into).collect(),
        }
    }
}
