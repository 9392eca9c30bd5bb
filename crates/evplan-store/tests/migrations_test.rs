// Integration tests for the migration framework

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use evplan_core::config::DatabaseConfig;
use evplan_core::errors::ExErrorKind;
use evplan_store::migrations::{apply_migrations, get_migrations};
use evplan_store::RecordStore;
use rusqlite::Connection;
use tempfile::TempDir;

fn get_table_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}

#[test]
fn test_apply_migrations_on_empty_db() {
    // Given: An empty SQLite database
    let mut conn = Connection::open_in_memory().unwrap();

    // When: Migrations are applied
    apply_migrations(&mut conn).unwrap();

    // Then: Every table exists (sqlite_sequence comes from AUTOINCREMENT)
    let tables = get_table_names(&conn);
    let expected_tables = [
        "checklist_items",
        "checklists",
        "completed_checklist_items",
        "contractor_categories",
        "contractors",
        "event_checklists",
        "event_contractors",
        "events",
        "schema_version",
        "sqlite_sequence",
        "tasks",
        "users",
    ];
    assert_eq!(tables, expected_tables);
}

#[test]
fn test_reopening_file_database_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let config = DatabaseConfig {
        path: temp_dir.path().join("evplan.db"),
        busy_timeout_ms: 1000,
    };

    // When: The same file is opened (and migrated) twice
    RecordStore::open(&config).unwrap();
    RecordStore::open(&config).unwrap();

    // Then: Each migration is recorded exactly once
    let conn = Connection::open(&config.path).unwrap();
    let applied: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(applied, get_migrations().len() as i64);
}

#[test]
fn test_concurrent_first_open_applies_each_migration_once() {
    // Given: Several handles racing to open the same fresh file
    let temp_dir = TempDir::new().unwrap();
    let config = DatabaseConfig {
        path: temp_dir.path().join("evplan.db"),
        busy_timeout_ms: 10_000,
    };
    let barrier = Arc::new(Barrier::new(4));

    // When: Each opens (and migrates) at the same moment
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let config = config.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                RecordStore::open(&config).map(|_| ())
            })
        })
        .collect();

    // Then: Every open succeeds and no migration is recorded twice
    for handle in handles {
        handle.join().unwrap().unwrap();
    }
    let conn = Connection::open(&config.path).unwrap();
    let applied: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(applied, get_migrations().len() as i64);
}

#[test]
fn test_changed_migration_fails_open() {
    // Given: A migrated database whose recorded checksum no longer matches
    let temp_dir = TempDir::new().unwrap();
    let config = DatabaseConfig {
        path: temp_dir.path().join("evplan.db"),
        busy_timeout_ms: 1000,
    };
    RecordStore::open(&config).unwrap();
    Connection::open(&config.path)
        .unwrap()
        .execute(
            "UPDATE schema_version SET checksum = 'edited' WHERE migration_id = '002_lookup_indexes'",
            [],
        )
        .unwrap();

    // When: The store is opened again
    let err = match RecordStore::open(&config) {
        Ok(_) => panic!("open should fail on a checksum mismatch"),
        Err(err) => err,
    };

    // Then: The mismatch is a constraint violation on the checksum
    assert_eq!(err.kind(), ExErrorKind::ConstraintViolation);
    assert_eq!(err.code(), "ERR_CONSTRAINT_VIOLATION");
    assert_eq!(err.op(), Some("migration_checksum"));
    assert!(err.message().contains("002_lookup_indexes"));
}

#[test]
fn test_sessions_enforce_foreign_keys() {
    let temp_dir = TempDir::new().unwrap();
    let provider =
        evplan_store::SessionProvider::open(temp_dir.path().join("fk.db"), Duration::from_secs(1))
            .unwrap();

    let enabled: i64 = provider
        .session()
        .unwrap()
        .read(|tx| {
            tx.query_row("PRAGMA foreign_keys", [], |row| row.get(0))
                .map_err(evplan_store::errors::from_rusqlite)
        })
        .unwrap();
    assert_eq!(enabled, 1);
}
