//! SqliteStore durability and atomicity.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use hitbadge_gateway::counter::{next_visits, CounterStore, SqliteStore, VisitorRecord, VisitorStore};

const BUSY: Duration = Duration::from_secs(5);

#[tokio::test]
async fn unknown_site_reads_none() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert!(store.get("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn increments_persist_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("visits.db");

    {
        let counter = CounterStore::new(Arc::new(SqliteStore::open(&path, BUSY).unwrap()));
        assert_eq!(counter.increment("docs").await, 1);
        assert_eq!(counter.increment("docs").await, 2);
    }

    let store = Arc::new(SqliteStore::open(&path, BUSY).unwrap());
    let counter = CounterStore::new(store.clone());
    assert_eq!(counter.increment("docs").await, 3);

    let rec = store.get("docs").await.unwrap().unwrap();
    assert_eq!(rec.site_id, "docs");
    assert_eq!(rec.visits, Some(3));
}

#[tokio::test]
async fn empty_site_writes_nothing() {
    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    let counter = CounterStore::new(store.clone());
    assert_eq!(counter.increment("").await, 0);
    assert!(store.get("").await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_increments_lose_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SqliteStore::open(&dir.path().join("race.db"), BUSY).unwrap());
    let counter = CounterStore::new(store.clone());
    let k = 64;

    let mut handles = Vec::with_capacity(k);
    for _ in 0..k {
        let counter = counter.clone();
        handles.push(tokio::spawn(async move { counter.increment("race").await }));
    }
    let mut seen = Vec::with_capacity(k);
    for h in handles {
        seen.push(h.await.unwrap());
    }
    seen.sort_unstable();

    assert_eq!(seen, (1..=k as u64).collect::<Vec<_>>());
    assert_eq!(store.get("race").await.unwrap().unwrap().visits, Some(k as u64));
}

#[tokio::test]
async fn timestamp_advances_on_update() {
    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    let counter = CounterStore::new(store.clone());

    counter.increment("t").await;
    let first = store.get("t").await.unwrap().unwrap().updated_at;
    tokio::time::sleep(Duration::from_millis(5)).await;
    counter.increment("t").await;
    let second = store.get("t").await.unwrap().unwrap().updated_at;
    assert!(second > first);
}

fn slow_visits(current: Option<&VisitorRecord>) -> u64 {
    std::thread::sleep(Duration::from_millis(400));
    next_visits(current)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn open_site_does_not_block_other_sites() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SqliteStore::open(&dir.path().join("sites.db"), BUSY).unwrap());

    let held = {
        let store = store.clone();
        tokio::spawn(async move { store.run_transaction("a", slow_visits).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    let started = Instant::now();
    let other = store.run_transaction("b", next_visits).await.unwrap();
    let waited = started.elapsed();

    assert_eq!(other.visits, Some(1));
    assert!(waited < Duration::from_millis(200), "site b waited {waited:?}");
    assert_eq!(held.await.unwrap().unwrap().visits, Some(1));
}

#[tokio::test]
async fn second_handle_sees_first_handles_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shared.db");
    let first = CounterStore::new(Arc::new(SqliteStore::open(&path, BUSY).unwrap()));
    let second = CounterStore::new(Arc::new(SqliteStore::open(&path, BUSY).unwrap()));

    assert_eq!(first.increment("shared").await, 1);
    assert_eq!(second.increment("shared").await, 2);
    assert_eq!(first.increment("shared").await, 3);
}

#[tokio::test]
async fn row_without_visits_counts_from_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");
    let store = Arc::new(SqliteStore::open(&path, BUSY).unwrap());
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute(
            "INSERT INTO visitors (site_id, visits, updated_at) VALUES ('old', NULL, '2024-01-01T00:00:00+00:00')",
            [],
        )
        .unwrap();
    }

    let counter = CounterStore::new(store.clone());
    assert_eq!(counter.increment("old").await, 1);
    assert_eq!(counter.increment("old").await, 2);
}
