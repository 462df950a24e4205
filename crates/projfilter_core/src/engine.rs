//! Filter engine for the open-project screen.
//!
//! # Responsibility
//! - Hold the per-session filter state (selected tags + applied query).
//! - Recompute project visibility on every effective state or catalog change.
//! - Notify subscribers once per completed recomputation.
//!
//! # Invariants
//! - Selected tags are always a subset of the current tag universe.
//! - Tag changes recompute synchronously; query changes only after the
//!   debounce quiet period, using the last value entered.
//! - Visibility is recomputed in full, never patched.
//! - The catalog collection is never filtered in place.

use crate::catalog::CatalogStore;
use crate::config::FilterConfig;
use crate::filter::debounce::{Debouncer, TimerHandle};
use crate::filter::is_visible_with_needle;
use crate::filter::query::normalize_query;
use crate::filter::tags::TagSelection;
use crate::model::project::{ProjectId, Tag};
use log::{debug, info};
use std::collections::BTreeSet;
use std::fmt::{Debug, Formatter};
use std::time::{Duration, Instant};

/// Filter inputs that currently drive visibility.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub selected_tags: TagSelection,
    /// Last query applied by a recomputation; pending input is not here.
    pub query: String,
}

/// Visibility decision for one project row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectVisibility {
    pub project_id: ProjectId,
    pub name: String,
    pub visible: bool,
}

/// Latest computed visibility, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityResult {
    entries: Vec<ProjectVisibility>,
    any_visible: bool,
}

impl VisibilityResult {
    fn from_entries(entries: Vec<ProjectVisibility>) -> Self {
        let any_visible = entries.iter().any(|entry| entry.visible);
        Self {
            entries,
            any_visible,
        }
    }

    pub fn entries(&self) -> &[ProjectVisibility] {
        &self.entries
    }

    /// Returns `None` for projects unknown to the last recomputation.
    pub fn is_visible(&self, project_id: ProjectId) -> Option<bool> {
        self.entries
            .iter()
            .find(|entry| entry.project_id == project_id)
            .map(|entry| entry.visible)
    }

    pub fn is_visible_by_name(&self, name: &str) -> Option<bool> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.visible)
    }

    pub fn visible_names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.visible)
            .map(|entry| entry.name.as_str())
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.visible).count()
    }

    pub fn any_visible(&self) -> bool {
        self.any_visible
    }

    /// Drives the "no results" indicator.
    pub fn is_empty_result(&self) -> bool {
        !self.any_visible
    }
}

/// Coarse filter-session state, derived from the engine on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPhase {
    /// No tags selected, blank applied query, nothing pending.
    Idle,
    TagsOnly,
    /// Query input waiting for the quiet period, no tags selected.
    QueryPending,
    QueryOnly,
    Combined,
    /// Tags selected while query input is waiting for the quiet period.
    TagsWithQueryPending,
}

/// What caused a recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecomputeReason {
    Initial,
    TagsChanged,
    QueryDebounced,
    QueryFlushed,
    CatalogChanged,
}

impl RecomputeReason {
    fn as_str(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::TagsChanged => "tags_changed",
            Self::QueryDebounced => "query_debounced",
            Self::QueryFlushed => "query_flushed",
            Self::CatalogChanged => "catalog_changed",
        }
    }
}

/// Handle returned by [`FilterEngine::on_visibility_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type VisibilityCallback = Box<dyn FnMut(&VisibilityResult)>;

/// Combines tag selection and debounced text search over a catalog.
pub struct FilterEngine<C: CatalogStore> {
    catalog: C,
    config: FilterConfig,
    tag_universe: BTreeSet<Tag>,
    state: FilterState,
    query_timer: Debouncer<String>,
    visibility: VisibilityResult,
    subscribers: Vec<(SubscriptionId, VisibilityCallback)>,
    next_subscription: u64,
    recompute_count: u64,
}

impl<C: CatalogStore> FilterEngine<C> {
    /// Opens a filter session with empty state; every project starts visible.
    pub fn new(catalog: C, config: FilterConfig) -> Self {
        let tag_universe = catalog.tag_universe();
        let mut engine = Self {
            catalog,
            config,
            tag_universe,
            state: FilterState::default(),
            query_timer: Debouncer::new(config.query_debounce),
            visibility: VisibilityResult::default(),
            subscribers: Vec::new(),
            next_subscription: 0,
            recompute_count: 0,
        };
        engine.recompute(RecomputeReason::Initial);
        engine
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn tag_universe(&self) -> &BTreeSet<Tag> {
        &self.tag_universe
    }

    pub fn visibility(&self) -> &VisibilityResult {
        &self.visibility
    }

    pub fn is_empty_result(&self) -> bool {
        self.visibility.is_empty_result()
    }

    /// Number of recomputations since the session opened, the initial one
    /// included.
    pub fn recompute_count(&self) -> u64 {
        self.recompute_count
    }

    /// Replaces the tag selection; unknown tags are ignored.
    ///
    /// Returns whether the selection changed (and visibility was recomputed).
    pub fn set_selected_tags<I, T>(&mut self, tags: I) -> bool
    where
        I: IntoIterator<Item = T>,
        T: Into<Tag>,
    {
        let known = tags
            .into_iter()
            .map(Into::into)
            .filter(|tag| self.tag_universe.contains(tag))
            .collect::<BTreeSet<_>>();
        if !self.state.selected_tags.replace(known) {
            return false;
        }
        self.recompute(RecomputeReason::TagsChanged);
        true
    }

    /// Flips one tag in the selection and recomputes immediately.
    ///
    /// Returns `false` without recomputing when `tag` is not in the universe.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        if !self.tag_universe.contains(tag) {
            debug!("event=tag_toggle module=engine status=ignored reason=unknown_tag");
            return false;
        }
        self.state.selected_tags.toggle(tag);
        self.recompute(RecomputeReason::TagsChanged);
        true
    }

    /// Clears the tag selection. Returns whether anything was selected.
    pub fn clear_tags(&mut self) -> bool {
        self.set_selected_tags(std::iter::empty::<Tag>())
    }

    /// Records query input and (re)starts the quiet-period timer.
    ///
    /// Returns `None` when nothing was scheduled because the text equals the
    /// applied query and no other input is pending.
    pub fn set_query(&mut self, text: &str, now: Instant) -> Option<TimerHandle> {
        if !self.query_timer.is_pending() && text == self.state.query {
            return None;
        }
        let replaced = self.query_timer.is_pending();
        let handle = self.query_timer.schedule(text.to_string(), now);
        debug!(
            "event=query_scheduled module=engine status=ok replaced_pending={} quiet_ms={}",
            replaced,
            self.config.query_debounce.as_millis()
        );
        Some(handle)
    }

    /// Query text waiting for the quiet period, if any.
    pub fn pending_query(&self) -> Option<&str> {
        self.query_timer.pending_value().map(String::as_str)
    }

    /// Applies the pending query when its quiet period has elapsed.
    ///
    /// Returns whether a recomputation happened.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.query_timer.poll(now) {
            Some(query) => {
                self.apply_query(query, RecomputeReason::QueryDebounced);
                true
            }
            None => false,
        }
    }

    /// Applies the pending query right away, skipping the rest of the wait.
    pub fn flush(&mut self) -> bool {
        match self.query_timer.flush() {
            Some(query) => {
                self.apply_query(query, RecomputeReason::QueryFlushed);
                true
            }
            None => false,
        }
    }

    /// Drops pending query input without applying it.
    pub fn cancel_pending_query(&mut self) -> bool {
        self.query_timer.cancel_pending().is_some()
    }

    /// Cancels one specific scheduled query, if it is still the pending one.
    pub fn cancel_query_timer(&mut self, handle: TimerHandle) -> bool {
        self.query_timer.cancel(handle)
    }

    /// Instant at which [`Self::poll`] will next have work, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.query_timer.deadline()
    }

    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.query_timer.time_remaining(now)
    }

    pub fn phase(&self) -> FilterPhase {
        let has_tags = !self.state.selected_tags.is_empty();
        let has_query = normalize_query(self.state.query.as_str()).is_some();
        match (has_tags, has_query, self.query_timer.is_pending()) {
            (false, _, true) => FilterPhase::QueryPending,
            (true, _, true) => FilterPhase::TagsWithQueryPending,
            (false, false, false) => FilterPhase::Idle,
            (true, false, false) => FilterPhase::TagsOnly,
            (false, true, false) => FilterPhase::QueryOnly,
            (true, true, false) => FilterPhase::Combined,
        }
    }

    /// Registers a callback fired after every completed recomputation.
    pub fn on_visibility_changed(
        &mut self,
        callback: impl FnMut(&VisibilityResult) + 'static,
    ) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    /// Mutates the catalog, then refreshes the universe and visibility.
    pub fn update_catalog<R>(&mut self, update: impl FnOnce(&mut C) -> R) -> R {
        let output = update(&mut self.catalog);
        self.catalog_changed();
        output
    }

    /// Re-reads the catalog after an external change.
    ///
    /// Tags no longer held by any project are dropped from the selection.
    pub fn catalog_changed(&mut self) {
        self.tag_universe = self.catalog.tag_universe();
        let dropped = self.state.selected_tags.retain_known(&self.tag_universe);
        if dropped > 0 {
            debug!(
                "event=selection_pruned module=engine status=ok dropped={}",
                dropped
            );
        }
        self.recompute(RecomputeReason::CatalogChanged);
    }

    /// Tears the session down, cancelling any pending query timer.
    ///
    /// Returns the final filter state; it is not persisted anywhere.
    pub fn close(mut self) -> FilterState {
        let cancelled = self.query_timer.cancel_pending().is_some();
        info!(
            "event=filter_session_close module=engine status=ok cancelled_pending={} recomputes={}",
            cancelled, self.recompute_count
        );
        std::mem::take(&mut self.state)
    }

    fn apply_query(&mut self, query: String, reason: RecomputeReason) {
        self.state.query = query;
        self.recompute(reason);
    }

    fn recompute(&mut self, reason: RecomputeReason) {
        let started = Instant::now();
        let needle = normalize_query(self.state.query.as_str());
        let entries = self
            .catalog
            .projects()
            .into_iter()
            .map(|project| {
                let visible = is_visible_with_needle(
                    &project,
                    &self.state.selected_tags,
                    needle.as_deref(),
                );
                ProjectVisibility {
                    project_id: project.id,
                    name: project.name,
                    visible,
                }
            })
            .collect();
        self.visibility = VisibilityResult::from_entries(entries);
        self.recompute_count += 1;

        debug!(
            "event=visibility_recomputed module=engine status=ok reason={} total={} visible={} tags_selected={} query_active={} elapsed_us={}",
            reason.as_str(),
            self.visibility.entries.len(),
            self.visibility.visible_count(),
            self.state.selected_tags.len(),
            needle.is_some(),
            started.elapsed().as_micros()
        );

        for (_, callback) in self.subscribers.iter_mut() {
            callback(&self.visibility);
        }
    }
}

impl<C: CatalogStore + Debug> Debug for FilterEngine<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterEngine")
            .field("catalog", &self.catalog)
            .field("config", &self.config)
            .field("state", &self.state)
            .field("pending_query", &self.pending_query())
            .field("visibility", &self.visibility)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{FilterEngine, FilterPhase, RecomputeReason};
    use crate::catalog::InMemoryCatalog;
    use crate::config::FilterConfig;
    use crate::model::project::Project;
    use std::time::{Duration, Instant};

    fn engine() -> FilterEngine<InMemoryCatalog> {
        let catalog = InMemoryCatalog::from_projects([
            Project::new("Project A", 1).with_tags(["TestTagOne"]),
            Project::new("Project B", 2).with_tags(["TestTagTwo"]),
        ])
        .expect("catalog should build");
        FilterEngine::new(catalog, FilterConfig::default())
    }

    #[test]
    fn new_session_shows_everything() {
        let engine = engine();
        assert_eq!(engine.phase(), FilterPhase::Idle);
        assert_eq!(engine.visibility().visible_count(), 2);
        assert!(!engine.is_empty_result());
        assert_eq!(engine.recompute_count(), 1);
    }

    #[test]
    fn unknown_tag_toggle_is_ignored() {
        let mut engine = engine();
        assert!(!engine.toggle_tag("Missing"));
        assert!(engine.state().selected_tags.is_empty());
        assert_eq!(engine.recompute_count(), 1);
    }

    #[test]
    fn set_selected_tags_filters_unknown_and_skips_noop() {
        let mut engine = engine();
        assert!(engine.set_selected_tags(["TestTagOne", "Missing"]));
        assert_eq!(engine.state().selected_tags.len(), 1);
        assert!(!engine.set_selected_tags(["TestTagOne"]));
        assert_eq!(engine.recompute_count(), 2);
    }

    #[test]
    fn phase_tracks_pending_and_applied_query() {
        let start = Instant::now();
        let mut engine = engine();

        engine.set_query("Project", start);
        assert_eq!(engine.phase(), FilterPhase::QueryPending);
        engine.toggle_tag("TestTagOne");
        assert_eq!(engine.phase(), FilterPhase::TagsWithQueryPending);

        assert!(engine.poll(start + Duration::from_millis(500)));
        assert_eq!(engine.phase(), FilterPhase::Combined);

        engine.toggle_tag("TestTagOne");
        assert_eq!(engine.phase(), FilterPhase::QueryOnly);

        engine.set_query("", start + Duration::from_secs(1));
        engine.flush();
        assert_eq!(engine.phase(), FilterPhase::Idle);

        engine.toggle_tag("TestTagTwo");
        assert_eq!(engine.phase(), FilterPhase::TagsOnly);
    }

    #[test]
    fn set_query_to_applied_value_schedules_nothing() {
        let mut engine = engine();
        assert!(engine.set_query("", Instant::now()).is_none());
        assert!(engine.next_deadline().is_none());
    }

    #[test]
    fn close_cancels_pending_query() {
        let start = Instant::now();
        let mut engine = engine();
        engine.toggle_tag("TestTagOne");
        engine.set_query("Z", start);

        let state = engine.close();
        assert_eq!(state.query, "");
        assert!(state.selected_tags.contains("TestTagOne"));
    }

    #[test]
    fn recompute_reasons_render_as_log_tokens() {
        assert_eq!(RecomputeReason::Initial.as_str(), "initial");
        assert_eq!(RecomputeReason::QueryDebounced.as_str(), "query_debounced");
        assert_eq!(RecomputeReason::CatalogChanged.as_str(), "catalog_changed");
    }
}
