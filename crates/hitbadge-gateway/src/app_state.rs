//! Shared application state for the badge service.
//!
//! Startup errors are explicit (Result instead of panic).

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use hitbadge_core::error::Result;

use crate::config::{BadgeServiceConfig, StoreKind};
use crate::counter::{CounterStore, MemoryStore, SqliteStore, VisitorStore};
use crate::obs::BadgeMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    counter: CounterStore,
    metrics: Arc<BadgeMetrics>,
}

struct AppStateInner {
    cfg: BadgeServiceConfig,
}

impl AppState {
    /// Build application state, opening the configured store.
    pub fn new(cfg: BadgeServiceConfig) -> Result<Self> {
        let store: Arc<dyn VisitorStore> = match cfg.store.kind {
            StoreKind::Memory => Arc::new(MemoryStore::new()),
            StoreKind::Sqlite => Arc::new(SqliteStore::open(
                Path::new(&cfg.store.path),
                Duration::from_millis(cfg.store.busy_timeout_ms),
            )?),
        };
        tracing::info!(kind = ?cfg.store.kind, "visitor store ready");
        Ok(Self::with_store(cfg, store))
    }

    /// Build application state around an existing store.
    pub fn with_store(cfg: BadgeServiceConfig, store: Arc<dyn VisitorStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { cfg }),
            counter: CounterStore::new(store),
            metrics: Arc::new(BadgeMetrics::default()),
        }
    }

    pub fn cfg(&self) -> &BadgeServiceConfig {
        &self.inner.cfg
    }

    pub fn counter(&self) -> &CounterStore {
        &self.counter
    }

    pub fn metrics(&self) -> Arc<BadgeMetrics> {
        Arc::clone(&self.metrics)
    }
}
