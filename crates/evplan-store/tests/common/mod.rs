#![allow(dead_code)]

use std::time::Duration;

use chrono::NaiveDate;
use evplan_core::model::{
    Checklist, ChecklistItem, Contractor, ContractorCategory, Event, Fields, User,
};
use evplan_store::{RecordStore, SessionProvider};
use tempfile::TempDir;

/// Migrated store over a private in-memory database
pub fn memory_store() -> RecordStore {
    RecordStore::in_memory().expect("Failed to create in-memory store")
}

/// Migrated store over a database file in a fresh temp dir
///
/// Keep the `TempDir` alive for as long as the store is used.
pub fn file_store() -> (TempDir, RecordStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let provider = SessionProvider::open(temp_dir.path().join("evplan.db"), Duration::from_secs(10))
        .expect("Failed to open database file");
    let store = RecordStore::new(provider);
    store.migrate().expect("Failed to migrate");
    (temp_dir, store)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn add_user(store: &RecordStore, telegram_id: i64, name: &str) -> User {
    store
        .add::<User>(
            &Fields::new()
                .with("telegram_id", telegram_id)
                .with("name", name),
        )
        .expect("Failed to add user")
}

pub fn add_event(store: &RecordStore, owner_id: i64, title: &str, on: NaiveDate) -> Event {
    store
        .add::<Event>(
            &Fields::new()
                .with("owner_id", owner_id)
                .with("title", title)
                .with("date", on),
        )
        .expect("Failed to add event")
}

pub fn add_category(store: &RecordStore, owner_id: i64, title: &str) -> ContractorCategory {
    store
        .add::<ContractorCategory>(
            &Fields::new()
                .with("owner_id", owner_id)
                .with("title", title),
        )
        .expect("Failed to add category")
}

pub fn add_contractor(
    store: &RecordStore,
    owner_id: i64,
    category_id: i64,
    name: &str,
    contact: &str,
) -> Contractor {
    store
        .add::<Contractor>(
            &Fields::new()
                .with("owner_id", owner_id)
                .with("category_id", category_id)
                .with("name", name)
                .with("contact", contact),
        )
        .expect("Failed to add contractor")
}

/// Checklist with one item per title
pub fn add_checklist(
    store: &RecordStore,
    owner_id: i64,
    title: &str,
    items: &[&str],
) -> (Checklist, Vec<ChecklistItem>) {
    let checklist = store
        .add::<Checklist>(
            &Fields::new()
                .with("owner_id", owner_id)
                .with("title", title),
        )
        .expect("Failed to add checklist");
    let items = items
        .iter()
        .map(|item| {
            store
                .add::<ChecklistItem>(
                    &Fields::new()
                        .with("checklist_id", checklist.id)
                        .with("title", *item),
                )
                .expect("Failed to add checklist item")
        })
        .collect();
    (checklist, items)
}
