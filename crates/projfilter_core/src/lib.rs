//! Core filtering logic for the open-project screen.
//! This crate is the single source of truth for project visibility rules.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod filter;
pub mod logging;
pub mod model;

pub use catalog::{tag_universe_of, CatalogError, CatalogResult, CatalogStore, InMemoryCatalog};
pub use config::{FilterConfig, DEFAULT_QUERY_DEBOUNCE_MS};
pub use engine::{
    FilterEngine, FilterPhase, FilterState, ProjectVisibility, SubscriptionId, VisibilityResult,
};
pub use filter::debounce::{Debouncer, TimerHandle};
pub use filter::is_visible;
pub use filter::query::{matches_query, normalize_query};
pub use filter::tags::{matches_tags, TagSelection};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::project::{Project, ProjectId, ProjectValidationError, Tag, UNTITLED_PROJECT_NAME};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
