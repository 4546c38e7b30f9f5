//! hitbadge gateway library entry.
//!
//! Wires config, the visitor counter store, metrics, and the badge endpoint
//! into an axum service. Consumed by the binary (`main.rs`) and by
//! integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod app_state;
pub mod config;
pub mod counter;
pub mod obs;
pub mod ops;
pub mod router;
pub mod transport;
