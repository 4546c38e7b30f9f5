use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::Mutex;

use hitbadge_core::error::Result;

use super::store::{Mutation, VisitorRecord, VisitorStore};

type Slot = Arc<Mutex<Option<VisitorRecord>>>;

/// In-memory store.
///
/// Each site owns an async mutex held across the whole read-modify-write;
/// the map itself is only locked (per shard) long enough to fetch the slot.
#[derive(Default)]
pub struct MemoryStore {
    slots: DashMap<String, Slot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self { slots: DashMap::new() }
    }

    fn slot(&self, site_id: &str) -> Slot {
        if let Some(slot) = self.slots.get(site_id) {
            return Arc::clone(slot.value());
        }
        let entry = self
            .slots
            .entry(site_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(None)));
        Arc::clone(entry.value())
    }

    /// Seed a raw record, bypassing the increment path.
    pub async fn put(&self, record: VisitorRecord) {
        let slot = self.slot(&record.site_id);
        *slot.lock().await = Some(record);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[async_trait]
impl VisitorStore for MemoryStore {
    async fn run_transaction(&self, site_id: &str, mutation: Mutation) -> Result<VisitorRecord> {
        let slot = self.slot(site_id);
        let mut current = slot.lock().await;

        let visits = mutation(current.as_ref());
        let record = VisitorRecord {
            site_id: site_id.to_string(),
            visits: Some(visits),
            updated_at: Utc::now(),
        };
        *current = Some(record.clone());
        Ok(record)
    }

    async fn get(&self, site_id: &str) -> Result<Option<VisitorRecord>> {
        let Some(slot) = self.slots.get(site_id).map(|s| Arc::clone(s.value())) else {
            return Ok(None);
        };
        let current = slot.lock().await;
        Ok(current.clone())
    }
}
