//! Schema command
//!
//! Usage: evplan migrate

use evplan_store::migrations::get_migrations;
use evplan_store::RecordStore;

use super::CommandResult;

/// Opening the store already applies pending migrations; this re-checks
/// the recorded checksums and reports the schema state.
pub fn migrate(store: &RecordStore) -> CommandResult {
    store.migrate()?;
    for migration in get_migrations() {
        println!("✓ {}", migration.id);
    }
    println!("Schema is up to date");
    Ok(())
}
