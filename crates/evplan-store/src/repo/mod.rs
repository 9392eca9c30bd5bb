//! Repository layer
//!
//! Kind-agnostic persistence: row hydration, statement building, the
//! transaction-scoped primitives and the `RecordStore` handle over them.

pub mod hydration;
pub mod record_store;
mod sql;
pub mod tx;

pub use hydration::FromRow;
pub use record_store::RecordStore;

use evplan_core::model::Kind;

/// A kind the store can read back from a row
pub trait Entity: Kind + FromRow {}

impl<T: Kind + FromRow> Entity for T {}
