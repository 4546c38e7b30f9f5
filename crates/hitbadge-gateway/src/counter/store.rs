use async_trait::async_trait;
use chrono::{DateTime, Utc};

use hitbadge_core::error::Result;

/// One stored counter document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorRecord {
    pub site_id: String,
    /// `None` when the stored document carries no count.
    pub visits: Option<u64>,
    /// Assigned by the store on every write. Advisory only.
    pub updated_at: DateTime<Utc>,
}

/// Computes the next count from the current record (`None` if absent).
pub type Mutation = fn(Option<&VisitorRecord>) -> u64;

/// Keyed store offering per-key serializable read-modify-write.
#[async_trait]
pub trait VisitorStore: Send + Sync {
    /// Atomically read `site_id`, apply `mutation`, and write back
    /// `{visits, updated_at: now}`. Returns the committed record.
    ///
    /// Transactions on the same key never observe the same pre-image;
    /// transactions on different keys do not wait on each other.
    async fn run_transaction(&self, site_id: &str, mutation: Mutation) -> Result<VisitorRecord>;

    /// Read without modifying.
    async fn get(&self, site_id: &str) -> Result<Option<VisitorRecord>>;
}
