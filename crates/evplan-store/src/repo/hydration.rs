//! Hydration layer - builds records from SQLite rows
//!
//! Columns are read by name, so the select list only has to contain the
//! kind's declared fields, in any order.

use evplan_core::model::{
    Checklist, ChecklistItem, CompletedChecklistItem, Contractor, ContractorCategory, Event,
    EventChecklist, EventContractor, Task, User,
};
use rusqlite::Row;

/// Construct a record from one result row
pub trait FromRow: Sized {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

impl FromRow for User {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            telegram_id: row.get("telegram_id")?,
            name: row.get("name")?,
            username: row.get("username")?,
        })
    }
}

impl FromRow for Event {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            owner_id: row.get("owner_id")?,
            title: row.get("title")?,
            location: row.get("location")?,
            date: row.get("date")?,
        })
    }
}

impl FromRow for ContractorCategory {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            owner_id: row.get("owner_id")?,
            title: row.get("title")?,
        })
    }
}

impl FromRow for Contractor {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            owner_id: row.get("owner_id")?,
            category_id: row.get("category_id")?,
            name: row.get("name")?,
            contact: row.get("contact")?,
        })
    }
}

impl FromRow for Task {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            event_id: row.get("event_id")?,
            title: row.get("title")?,
            date: row.get("date")?,
            status: row.get("status")?,
        })
    }
}

impl FromRow for Checklist {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            owner_id: row.get("owner_id")?,
            title: row.get("title")?,
        })
    }
}

impl FromRow for ChecklistItem {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            checklist_id: row.get("checklist_id")?,
            title: row.get("title")?,
        })
    }
}

impl FromRow for EventContractor {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            event_id: row.get("event_id")?,
            contractor_id: row.get("contractor_id")?,
            cost: row.get("cost")?,
        })
    }
}

impl FromRow for EventChecklist {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            event_id: row.get("event_id")?,
            checklist_id: row.get("checklist_id")?,
            is_completed: row.get("is_completed")?,
            completed_at: row.get("completed_at")?,
        })
    }
}

impl FromRow for CompletedChecklistItem {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            event_id: row.get("event_id")?,
            item_id: row.get("item_id")?,
            is_completed: row.get("is_completed")?,
            completed_at: row.get("completed_at")?,
            completed_by: row.get("completed_by")?,
        })
    }
}
