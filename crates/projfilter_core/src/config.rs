//! Filter engine configuration.

use std::time::Duration;

/// Quiet period applied to query input before recomputing.
pub const DEFAULT_QUERY_DEBOUNCE_MS: u64 = 500;

/// Tunables for one [`crate::FilterEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterConfig {
    /// How long query input must stay unchanged before it is applied.
    pub query_debounce: Duration,
}

impl FilterConfig {
    pub fn with_debounce_ms(ms: u64) -> Self {
        Self {
            query_debounce: Duration::from_millis(ms),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::with_debounce_ms(DEFAULT_QUERY_DEBOUNCE_MS)
    }
}
