//! Generic record store
//!
//! Every operation is one unit of work: a fresh session, one transaction,
//! released before returning. Absence is a normal outcome (`None`/`false`),
//! never an error.

use std::time::Instant;

use evplan_core::config::DatabaseConfig;
use evplan_core::model::{Fields, Filter, Identified, Kind};
use evplan_core::{log_op_end, log_op_error, log_op_start};
use rusqlite::Transaction;

use crate::db::SessionProvider;
use crate::errors::Result;
use crate::repo::tx::{
    add_tx, count_tx, delete_tx, delete_where_tx, find_all_tx, find_by_id_tx, find_one_tx,
    update_tx,
};
use crate::repo::Entity;

/// Handle to the record store
///
/// Cheap to share by reference across threads; each call opens its own
/// session from the provider.
pub struct RecordStore {
    provider: SessionProvider,
}

pub(crate) enum Outcome {
    Found(bool),
    Rows(u64),
}

impl RecordStore {
    pub fn new(provider: SessionProvider) -> Self {
        Self { provider }
    }

    /// Open the configured database file and bring its schema up to date
    pub fn open(config: &DatabaseConfig) -> Result<Self> {
        let provider = SessionProvider::open(&config.path, config.busy_timeout())?;
        let store = Self::new(provider);
        store.migrate()?;
        Ok(store)
    }

    /// Private, migrated in-memory store
    pub fn in_memory() -> Result<Self> {
        let store = Self::new(SessionProvider::in_memory()?);
        store.migrate()?;
        Ok(store)
    }

    /// Apply pending schema migrations
    pub fn migrate(&self) -> Result<()> {
        self.provider.session()?.migrate()
    }

    /// Run `f` in its own read transaction
    pub fn read<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        self.provider.session()?.read(f)
    }

    /// Run `f` in its own write transaction (committed on `Ok`)
    pub fn write<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        self.provider.session()?.write(f)
    }

    pub fn find_by_id<K: Entity + Identified>(&self, id: i64) -> Result<Option<K>> {
        let started = Instant::now();
        log_op_start!("find_by_id", kind = K::NAME, record_id = id);
        let result = self.read(|tx| find_by_id_tx::<K>(tx, id));
        finish("find_by_id", K::NAME, started, result, |r| {
            Outcome::Found(r.is_some())
        })
    }

    /// First record matching `filter`
    pub fn find_one<K: Entity>(&self, filter: &Filter) -> Result<Option<K>> {
        let started = Instant::now();
        log_op_start!("find_one", kind = K::NAME);
        let result = self.read(|tx| find_one_tx::<K>(tx, filter));
        finish("find_one", K::NAME, started, result, |r| {
            Outcome::Found(r.is_some())
        })
    }

    /// All records matching `filter`, loaded eagerly
    pub fn find_all<K: Entity>(&self, filter: &Filter) -> Result<Vec<K>> {
        let started = Instant::now();
        log_op_start!("find_all", kind = K::NAME);
        let result = self.read(|tx| find_all_tx::<K>(tx, filter));
        finish("find_all", K::NAME, started, result, |r| {
            Outcome::Rows(r.len() as u64)
        })
    }

    /// Insert a record; returns it as stored, with its assigned id
    pub fn add<K: Entity>(&self, fields: &Fields) -> Result<K> {
        let started = Instant::now();
        log_op_start!("add", kind = K::NAME);
        let result = self.write(|tx| add_tx::<K>(tx, fields));
        finish("add", K::NAME, started, result, |_| Outcome::Rows(1))
    }

    /// Remove a record; `false` when it did not exist
    pub fn delete<K: Identified>(&self, id: i64) -> Result<bool> {
        let started = Instant::now();
        log_op_start!("delete", kind = K::NAME, record_id = id);
        let result = self.write(|tx| delete_tx::<K>(tx, id));
        finish("delete", K::NAME, started, result, |removed| {
            Outcome::Found(*removed)
        })
    }

    /// Partially update a record
    ///
    /// The existence check, the update and the refresh share one write
    /// transaction. `None` means no record has `id`; nothing was written.
    pub fn update<K: Entity + Identified>(&self, id: i64, fields: &Fields) -> Result<Option<K>> {
        let started = Instant::now();
        log_op_start!("update", kind = K::NAME, record_id = id);
        let result = self.write(|tx| update_tx::<K>(tx, id, fields));
        finish("update", K::NAME, started, result, |r| {
            Outcome::Found(r.is_some())
        })
    }

    /// Remove every record matching `filter`; returns the rows removed
    pub fn delete_where<K: Kind>(&self, filter: &Filter) -> Result<usize> {
        let started = Instant::now();
        log_op_start!("delete_where", kind = K::NAME);
        let result = self.write(|tx| delete_where_tx::<K>(tx, filter));
        finish("delete_where", K::NAME, started, result, |n| {
            Outcome::Rows(*n as u64)
        })
    }

    pub fn count<K: Kind>(&self, filter: &Filter) -> Result<u64> {
        let started = Instant::now();
        log_op_start!("count", kind = K::NAME);
        let result = self.read(|tx| count_tx::<K>(tx, filter));
        finish("count", K::NAME, started, result, |n| Outcome::Rows(*n))
    }
}

/// Log the end of an operation and attach its context to any error
pub(crate) fn finish<T>(
    op: &'static str,
    kind: &'static str,
    started: Instant,
    result: Result<T>,
    outcome: impl FnOnce(&T) -> Outcome,
) -> Result<T> {
    let duration_ms = started.elapsed().as_millis() as u64;
    match result {
        Ok(value) => {
            match outcome(&value) {
                Outcome::Found(found) => {
                    log_op_end!(op, duration_ms = duration_ms, kind = kind, found = found);
                }
                Outcome::Rows(rows) => {
                    log_op_end!(op, duration_ms = duration_ms, kind = kind, rows = rows);
                }
            }
            Ok(value)
        }
        Err(err) => {
            let err = err.with_op(op).with_record_kind(kind);
            log_op_error!(op, err.clone(), duration_ms = duration_ms, kind = kind);
            Err(err)
        }
    }
}
