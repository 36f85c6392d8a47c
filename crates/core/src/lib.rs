//! Step In Core - domain entities, services, and traits.
//!
//! This crate holds the watcher's business logic: change detection between
//! two subscription listings, the daily notification quota, the best-effort
//! document storage abstraction and the notify/persist policy of a run.
//! It performs no HTTP itself; the `catalog`, `gist-storage` and `mailer`
//! crates implement its traits.

pub mod changes;
pub mod constants;
pub mod errors;
pub mod monitor;
pub mod notifications;
pub mod quota;
pub mod storage;
pub mod subscriptions;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
