use std::sync::Arc;

use super::store::{VisitorRecord, VisitorStore};

/// Atomic per-site increment over a [`VisitorStore`].
///
/// `increment` never fails: an empty site or any store error yields `0`,
/// which callers render like any other count. `increment_outcome` keeps
/// the distinction for logging and metrics.
#[derive(Clone)]
pub struct CounterStore {
    store: Arc<dyn VisitorStore>,
}

impl CounterStore {
    pub fn new(store: Arc<dyn VisitorStore>) -> Self {
        Self { store }
    }

    /// Increment `site_id` and return the committed count, `0` when skipped
    /// or failed.
    pub async fn increment(&self, site_id: &str) -> u64 {
        self.increment_outcome(site_id).await.count()
    }

    /// Same as [`increment`](Self::increment), keeping the reason for a `0`.
    pub async fn increment_outcome(&self, site_id: &str) -> Increment {
        if site_id.is_empty() {
            return Increment::Skipped;
        }

        match self.store.run_transaction(site_id, next_visits).await {
            Ok(record) => Increment::Counted(record.visits.unwrap_or(0)),
            Err(e) => {
                tracing::error!(
                    site = %site_id,
                    code = e.code().as_str(),
                    error = %e,
                    "visit increment failed"
                );
                Increment::Failed
            }
        }
    }
}

/// Result of one increment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Increment {
    /// Committed; carries the new count.
    Counted(u64),
    /// Empty site id, store untouched.
    Skipped,
    /// Store error, already logged.
    Failed,
}

impl Increment {
    pub fn count(self) -> u64 {
        match self {
            Increment::Counted(n) => n,
            Increment::Skipped | Increment::Failed => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Increment::Counted(_) => "ok",
            Increment::Skipped => "skipped",
            Increment::Failed => "failed",
        }
    }
}

/// New record starts at 1; an existing one without a count counts from 0.
pub fn next_visits(current: Option<&VisitorRecord>) -> u64 {
    match current {
        None => 1,
        Some(record) => record.visits.unwrap_or(0).saturating_add(1),
    }
}
