//! Project domain model.
//!
//! # Responsibility
//! - Define the catalog record shown as one row on the open-project screen.
//! - Own tag membership checks used by the filter predicates.
//!
//! # Invariants
//! - `id` is stable and never reused for another project.
//! - `name` is the display identity and must not be blank.
//! - Tags are stored as given: case-sensitive, untrimmed, deduplicated.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one catalog project.
pub type ProjectId = Uuid;

/// Free-form label attached to projects.
///
/// Compared byte-for-byte; `"Draft"` and `"draft"` are different tags.
pub type Tag = String;

/// Name used when a project arrives without one.
pub const UNTITLED_PROJECT_NAME: &str = "Untitled";

/// Validation failure for project records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    /// Name is empty or whitespace-only.
    BlankName(ProjectId),
}

impl Display for ProjectValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName(id) => write!(f, "project {id} has a blank name"),
        }
    }
}

impl Error for ProjectValidationError {}

/// Catalog entry for one previously created project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Generated when a catalog file omits it.
    #[serde(default = "Uuid::new_v4")]
    pub id: ProjectId,
    #[serde(default = "untitled_name")]
    pub name: String,
    /// Unix epoch milliseconds.
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub tags: BTreeSet<Tag>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub creator: String,
}

fn untitled_name() -> String {
    UNTITLED_PROJECT_NAME.to_string()
}

impl Project {
    /// Creates an untagged project with a generated stable ID.
    pub fn new(name: impl Into<String>, created_at: i64) -> Self {
        Self::with_id(Uuid::new_v4(), name, created_at)
    }

    /// Creates an untagged project with a caller-provided stable ID.
    ///
    /// A blank `name` falls back to [`UNTITLED_PROJECT_NAME`], matching how
    /// project metadata is filled in on import.
    pub fn with_id(id: ProjectId, name: impl Into<String>, created_at: i64) -> Self {
        let name = name.into();
        let name = if name.trim().is_empty() {
            UNTITLED_PROJECT_NAME.to_string()
        } else {
            name
        };
        Self {
            id,
            name,
            created_at,
            tags: BTreeSet::new(),
            description: String::new(),
            creator: String::new(),
        }
    }

    /// Builder-style helper that attaches tags.
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Tag>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Returns whether this project carries `tag` exactly.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Checks record-level invariants.
    ///
    /// A record deserialized with an explicit blank name fails here.
    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.name.trim().is_empty() {
            return Err(ProjectValidationError::BlankName(self.id));
        }
        Ok(())
    }
}
