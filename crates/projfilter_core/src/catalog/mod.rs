//! Project catalog contracts and in-memory implementation.
//!
//! # Responsibility
//! - Supply ordered project snapshots to the filter engine.
//! - Derive the tag universe from the full catalog.
//!
//! # Invariants
//! - A tag is in the universe iff at least one project currently holds it.
//! - Project names are unique within one catalog.
//! - Filtering never removes projects from the catalog itself.

use crate::model::project::{Project, ProjectId, ProjectValidationError, Tag};
use log::debug;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for catalog mutations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog-layer error for mutations of the in-memory store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Another project already uses this display name.
    DuplicateName(String),
    /// Project record failed validation.
    InvalidProject(ProjectValidationError),
    /// No project with this id exists.
    NotFound(ProjectId),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateName(name) => write!(f, "project name already in catalog: `{name}`"),
            Self::InvalidProject(err) => write!(f, "invalid project: {err}"),
            Self::NotFound(id) => write!(f, "project not found: {id}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidProject(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ProjectValidationError> for CatalogError {
    fn from(value: ProjectValidationError) -> Self {
        Self::InvalidProject(value)
    }
}

/// Read contract the filter engine consumes from its catalog collaborator.
pub trait CatalogStore {
    /// Returns all known projects in display order.
    fn projects(&self) -> Vec<Project>;

    /// Returns the distinct tags held by at least one project.
    fn tag_universe(&self) -> BTreeSet<Tag> {
        tag_universe_of(&self.projects())
    }
}

/// Derives the tag universe from a project slice.
pub fn tag_universe_of(projects: &[Project]) -> BTreeSet<Tag> {
    projects
        .iter()
        .flat_map(|project| project.tags.iter().cloned())
        .collect()
}

/// Insertion-ordered catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    projects: Vec<Project>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog, rejecting the first invalid or duplicate project.
    pub fn from_projects(projects: impl IntoIterator<Item = Project>) -> CatalogResult<Self> {
        let mut catalog = Self::new();
        for project in projects {
            catalog.insert(project)?;
        }
        Ok(catalog)
    }

    /// Appends one project to the end of the display order.
    pub fn insert(&mut self, project: Project) -> CatalogResult<ProjectId> {
        project.validate()?;
        if self.get_by_name(project.name.as_str()).is_some() {
            return Err(CatalogError::DuplicateName(project.name));
        }

        let id = project.id;
        self.projects.push(project);
        debug!(
            "event=catalog_insert module=catalog status=ok size={}",
            self.projects.len()
        );
        Ok(id)
    }

    /// Removes one project and returns it.
    pub fn remove(&mut self, id: ProjectId) -> CatalogResult<Project> {
        let index = self
            .projects
            .iter()
            .position(|project| project.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        let removed = self.projects.remove(index);
        debug!(
            "event=catalog_remove module=catalog status=ok size={}",
            self.projects.len()
        );
        Ok(removed)
    }

    /// Replaces the tag set of one project.
    pub fn set_tags(&mut self, id: ProjectId, tags: BTreeSet<Tag>) -> CatalogResult<()> {
        let project = self
            .projects
            .iter_mut()
            .find(|project| project.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        project.tags = tags;
        Ok(())
    }

    pub fn get(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.name == name)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

impl CatalogStore for InMemoryCatalog {
    fn projects(&self) -> Vec<Project> {
        self.projects.clone()
    }
}
