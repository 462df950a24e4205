//! JSON catalog loading.

use crate::error::CliError;
use projfilter_core::{InMemoryCatalog, Project};
use std::path::Path;

/// Reads a JSON array of projects into an ordered catalog.
pub fn load_catalog(path: &Path) -> Result<InMemoryCatalog, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let projects: Vec<Project> = serde_json::from_str(&raw).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(InMemoryCatalog::from_projects(projects)?)
}
