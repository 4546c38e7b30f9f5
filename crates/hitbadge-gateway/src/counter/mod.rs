//! Per-site visit counter.
//!
//! - `store`: backing store contract (`VisitorStore`) and `VisitorRecord`
//! - `memory`: in-process store with one lock per site
//! - `sqlite`: durable store, one `BEGIN IMMEDIATE` transaction per increment
//! - `increment`: the increment algorithm (`CounterStore`)

pub mod increment;
pub mod memory;
pub mod sqlite;
pub mod store;

pub use increment::{next_visits, CounterStore, Increment};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use store::{Mutation, VisitorRecord, VisitorStore};
