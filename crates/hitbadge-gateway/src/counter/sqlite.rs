use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rusqlite::{params, Connection, OptionalExtension};

use hitbadge_core::error::{BadgeError, Result};

use super::store::{Mutation, VisitorRecord, VisitorStore};

/// Attempts per increment before a write conflict is reported.
const MAX_ATTEMPTS: u32 = 8;

/// Durable SQLite-backed store.
///
/// Increments on one site are serialized by a per-site async lock. The
/// connection itself is only held for the single-statement read and the
/// single-statement write, never while the mutation runs, so sites do not
/// wait on each other. The write is a compare-and-set against the row that
/// was read; a writer outside this process makes it miss and the increment
/// is retried from a fresh read.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    site_locks: DashMap<String, Arc<tokio::sync::Mutex<()>>>,
}

/// Row as read, with the raw timestamp text used for the compare-and-set.
struct Snapshot {
    record: VisitorRecord,
    raw_updated_at: String,
    raw_visits: Option<i64>,
}

impl SqliteStore {
    pub fn open(db_path: &Path, busy_timeout: Duration) -> Result<Self> {
        let conn = Connection::open(db_path).map_err(|e| {
            BadgeError::Store(format!("open {} failed: {e}", db_path.display()))
        })?;
        conn.busy_timeout(busy_timeout).map_err(store_err)?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(store_err)?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS visitors (
                site_id TEXT PRIMARY KEY,
                visits INTEGER,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .map_err(store_err)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            site_locks: DashMap::new(),
        })
    }

    fn site_lock(&self, site_id: &str) -> Arc<tokio::sync::Mutex<()>> {
        if let Some(lock) = self.site_locks.get(site_id) {
            return Arc::clone(lock.value());
        }
        let entry = self
            .site_locks
            .entry(site_id.to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())));
        Arc::clone(entry.value())
    }

    async fn blocking<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Mutex<Connection>) -> Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || f(conn.as_ref()))
            .await
            .map_err(|e| BadgeError::Store(format!("sqlite task failed: {e}")))?
    }
}

#[async_trait]
impl VisitorStore for SqliteStore {
    async fn run_transaction(&self, site_id: &str, mutation: Mutation) -> Result<VisitorRecord> {
        let lock = self.site_lock(site_id);
        let _held = lock.lock().await;

        let site_id = site_id.to_string();
        self.blocking(move |conn| {
            for attempt in 1..=MAX_ATTEMPTS {
                let current = with_conn(conn, |c| read_snapshot(c, &site_id))?;
                let visits = mutation(current.as_ref().map(|s| &s.record));
                let updated_at = Utc::now();

                let written = with_conn(conn, |c| {
                    compare_and_set(c, &site_id, current.as_ref(), visits, updated_at)
                })?;
                if written {
                    return Ok(VisitorRecord { site_id, visits: Some(visits), updated_at });
                }
                tracing::debug!(site = %site_id, attempt, "visitor row changed underneath, retrying");
            }
            Err(BadgeError::Store(format!(
                "write conflict on {site_id} after {MAX_ATTEMPTS} attempts"
            )))
        })
        .await
    }

    async fn get(&self, site_id: &str) -> Result<Option<VisitorRecord>> {
        let site_id = site_id.to_string();
        self.blocking(move |conn| {
            Ok(with_conn(conn, |c| read_snapshot(c, &site_id))?.map(|s| s.record))
        })
        .await
    }
}

/// Run one statement with the connection locked.
fn with_conn<T>(conn: &Mutex<Connection>, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
    let guard = conn
        .lock()
        .map_err(|_| BadgeError::Store("sqlite connection poisoned".into()))?;
    f(&*guard)
}

fn read_snapshot(conn: &Connection, site_id: &str) -> Result<Option<Snapshot>> {
    let row = conn
        .query_row(
            "SELECT visits, updated_at FROM visitors WHERE site_id = ?1",
            params![site_id],
            |row| Ok((row.get::<_, Option<i64>>(0)?, row.get::<_, String>(1)?)),
        )
        .optional()
        .map_err(store_err)?;

    let Some((raw_visits, raw_updated_at)) = row else {
        return Ok(None);
    };

    let visits = raw_visits
        .map(|v| {
            u64::try_from(v).map_err(|_| BadgeError::Store(format!("negative visit count: {v}")))
        })
        .transpose()?;
    let updated_at = DateTime::parse_from_rfc3339(&raw_updated_at)
        .map_err(|e| BadgeError::Store(format!("bad updated_at {raw_updated_at:?}: {e}")))?
        .with_timezone(&Utc);

    Ok(Some(Snapshot {
        record: VisitorRecord { site_id: site_id.to_string(), visits, updated_at },
        raw_updated_at,
        raw_visits,
    }))
}

/// Write `visits` only if the row still matches `seen`. Returns whether the
/// row was written.
fn compare_and_set(
    conn: &Connection,
    site_id: &str,
    seen: Option<&Snapshot>,
    visits: u64,
    updated_at: DateTime<Utc>,
) -> Result<bool> {
    let stored = i64::try_from(visits)
        .map_err(|_| BadgeError::Store(format!("visit count out of range: {visits}")))?;
    let stamp = updated_at.to_rfc3339();

    let changed = match seen {
        None => conn.execute(
            r#"
            INSERT INTO visitors (site_id, visits, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(site_id) DO NOTHING
            "#,
            params![site_id, stored, stamp],
        ),
        Some(snap) => conn.execute(
            r#"
            UPDATE visitors
            SET visits = ?2, updated_at = ?3
            WHERE site_id = ?1 AND visits IS ?4 AND updated_at = ?5
            "#,
            params![site_id, stored, stamp, snap.raw_visits, snap.raw_updated_at],
        ),
    }
    .map_err(store_err)?;

    Ok(changed == 1)
}

fn store_err(e: rusqlite::Error) -> BadgeError {
    BadgeError::Store(e.to_string())
}
