//! Single-pending-timer debouncer.
//!
//! # Responsibility
//! - Defer a value until input has been quiet for a fixed period.
//! - Hand out cancel handles for the scheduled timer.
//!
//! # Invariants
//! - At most one timer is pending at any time.
//! - Scheduling cancels the previous timer; only the latest value can fire.
//! - A handle cancels only the timer it was issued for.
//! - No threads or sleeps: the owner drives time through [`Debouncer::poll`].

use std::time::{Duration, Instant};

/// Cancel handle for one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct PendingTimer<T> {
    handle: TimerHandle,
    deadline: Instant,
    value: T,
}

/// Cooperative debouncer holding at most one pending value.
#[derive(Debug)]
pub struct Debouncer<T> {
    quiet_period: Duration,
    next_ticket: u64,
    pending: Option<PendingTimer<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            next_ticket: 0,
            pending: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Schedules `value` to fire one quiet period after `now`.
    ///
    /// Any previously pending timer is cancelled and its value dropped.
    pub fn schedule(&mut self, value: T, now: Instant) -> TimerHandle {
        self.next_ticket += 1;
        let handle = TimerHandle(self.next_ticket);
        self.pending = Some(PendingTimer {
            handle,
            deadline: now + self.quiet_period,
            value,
        });
        handle
    }

    /// Cancels the timer identified by `handle`.
    ///
    /// Returns `false` when that timer already fired or was superseded.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match &self.pending {
            Some(pending) if pending.handle == handle => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Cancels whatever is pending and returns its value.
    pub fn cancel_pending(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }

    /// Fires the pending timer when its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|pending| now >= pending.deadline);
        if due {
            self.cancel_pending()
        } else {
            None
        }
    }

    /// Fires the pending timer immediately, ignoring its deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.cancel_pending()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_value(&self) -> Option<&T> {
        self.pending.as_ref().map(|pending| &pending.value)
    }

    pub fn pending_handle(&self) -> Option<TimerHandle> {
        self.pending.as_ref().map(|pending| pending.handle)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    /// Time left until the pending timer is due; zero when overdue.
    pub fn time_remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}
