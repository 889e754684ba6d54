//! Last-started-wins bookkeeping for queries that may be superseded.

use std::sync::atomic::{AtomicU64, Ordering};

/// Sequence number handed out when a dispatch starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn seq(self) -> u64 {
        self.0
    }
}

/// Tracks the most recently started query so stale results can be dropped.
#[derive(Debug, Default)]
pub struct QuerySession {
    latest: AtomicU64,
}

impl QuerySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new query, superseding every earlier ticket.
    pub fn begin(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Hand back `results` only if no newer query has started since `ticket`.
    pub fn accept<T>(&self, ticket: Ticket, results: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(results)
        } else {
            tracing::debug!(seq = ticket.0, "dropping stale results");
            None
        }
    }
}
