//! Database connection management
//!
//! A `SessionProvider` hands out one `Session` per logical operation. A
//! session owns its connection exclusively for its lifetime and runs work
//! inside a transaction that is committed or rolled back on every exit path.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::errors::{from_rusqlite, io_error, Result};
use crate::migrations;

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

enum Target {
    /// Fresh connection per session
    File(PathBuf),
    /// One private in-memory database; sessions take turns owning it
    Memory(Mutex<Connection>),
}

/// Source of scoped units of work
pub struct SessionProvider {
    target: Target,
    busy_timeout: Duration,
}

impl SessionProvider {
    /// File-backed provider; parent directories are created as needed
    pub fn open<P: AsRef<Path>>(path: P, busy_timeout: Duration) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| io_error("open_database", e))?;
        }

        let provider = Self {
            target: Target::File(path),
            busy_timeout,
        };
        // Surface an unusable path now rather than on the first operation
        provider.session()?;
        Ok(provider)
    }

    /// Private in-memory database (for tests and throwaway runs)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(from_rusqlite)?;
        configure(&conn, DEFAULT_BUSY_TIMEOUT, false)?;
        Ok(Self {
            target: Target::Memory(Mutex::new(conn)),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        })
    }

    /// Open a new unit of work
    pub fn session(&self) -> Result<Session<'_>> {
        let conn = match &self.target {
            Target::File(path) => {
                let conn = Connection::open(path).map_err(from_rusqlite)?;
                configure(&conn, self.busy_timeout, true)?;
                SessionConn::Owned(conn)
            }
            Target::Memory(shared) => {
                // A panicking holder leaves no open transaction behind: the
                // transaction guard rolled back while unwinding.
                let guard = shared.lock().unwrap_or_else(PoisonError::into_inner);
                SessionConn::Shared(guard)
            }
        };
        Ok(Session { conn })
    }
}

/// Configure a connection: foreign keys, busy timeout, WAL for files
fn configure(conn: &Connection, busy_timeout: Duration, wal: bool) -> Result<()> {
    conn.busy_timeout(busy_timeout).map_err(from_rusqlite)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(from_rusqlite)?;

    if wal {
        // journal_mode reports the resulting mode as a row
        let _mode: String = conn
            .query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))
            .map_err(from_rusqlite)?;
    }

    Ok(())
}

enum SessionConn<'a> {
    Owned(Connection),
    Shared(MutexGuard<'a, Connection>),
}

/// One scoped unit of work
pub struct Session<'a> {
    conn: SessionConn<'a>,
}

impl Session<'_> {
    fn conn_mut(&mut self) -> &mut Connection {
        match &mut self.conn {
            SessionConn::Owned(conn) => conn,
            SessionConn::Shared(guard) => &mut **guard,
        }
    }

    /// Run `f` in a deferred (read) transaction
    pub fn read<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        let tx = self.conn_mut().transaction().map_err(from_rusqlite)?;
        // On error the guard rolls back when dropped
        let value = f(&tx)?;
        tx.commit().map_err(from_rusqlite)?;
        Ok(value)
    }

    /// Run `f` in an immediate (write) transaction
    ///
    /// The write lock is taken before the first statement, so everything
    /// `f` reads stays valid until commit. `Ok` commits, `Err` rolls back and
    /// is returned unchanged; a failed commit rolls back as the transaction
    /// guard drops.
    pub fn write<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        let tx = self
            .conn_mut()
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(from_rusqlite)?;

        match f(&tx) {
            Ok(value) => {
                tx.commit().map_err(from_rusqlite)?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback() {
                    tracing::warn!(error = %rollback_err, "Rollback failed");
                }
                Err(err)
            }
        }
    }

    /// Apply pending schema migrations on this session's connection
    pub fn migrate(&mut self) -> Result<()> {
        migrations::apply_migrations(self.conn_mut())
    }
}
