//! evplan Store - SQLite-backed generic record store
//!
//! Provides:
//! - Scoped units of work over SQLite (`SessionProvider`, `Session`)
//! - Embedded, checksummed schema migrations
//! - `RecordStore`: kind-agnostic find/add/update/delete primitives
//! - Composed read projections and the checklist completion upsert
//! - An async facade for tokio callers
//! - Demo contractor seeding

pub mod async_store;
pub mod db;
pub mod errors;
pub mod migrations;
pub mod queries;
pub mod repo;
pub mod seed;

// Re-export key types
pub use async_store::AsyncRecordStore;
pub use db::{Session, SessionProvider};
pub use errors::Result;
pub use repo::{Entity, FromRow, RecordStore};
