//! Read-only projections
//!
//! Flat combinations of fields from a primary record and its related
//! records, assembled by the store's composed queries.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::errors::EvplanError;
use crate::model::{Event, Task, User};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventSummary {
    pub id: i64,
    pub title: String,
    pub date: NaiveDate,
    pub location: Option<String>,
    pub owner_id: i64,
}

impl From<Event> for EventSummary {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            title: event.title,
            date: event.date,
            location: event.location,
            owner_id: event.owner_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskSummary {
    pub id: i64,
    pub title: String,
    pub date: NaiveDate,
    pub status: bool,
}

impl From<Task> for TaskSummary {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            date: task.date,
            status: task.status,
        }
    }
}

/// Contractor joined with its category title
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractorView {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub contact: String,
    pub owner_id: i64,
}

/// Contractor joined with its assignment to one event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractorAssignment {
    pub id: i64,
    pub name: String,
    pub contact: String,
    pub cost: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub id: i64,
    pub title: String,
}

/// Checklist joined with its completion state for one event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventChecklistStatus {
    pub id: i64,
    pub title: String,
    pub is_completed: bool,
    pub completed_at: Option<NaiveDate>,
}

/// Checklist item joined with its completion mark for one event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletedItemView {
    pub id: i64,
    pub title: String,
    pub is_completed: bool,
    pub completed_at: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserWithEvents {
    #[serde(flatten)]
    pub user: User,
    pub events: Vec<EventSummary>,
}

/// Related collections an event projection can materialize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventRelation {
    Tasks,
    Contractors,
    Checklists,
    CompletedItems,
}

impl EventRelation {
    pub const ALL: [EventRelation; 4] = [
        EventRelation::Tasks,
        EventRelation::Contractors,
        EventRelation::Checklists,
        EventRelation::CompletedItems,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EventRelation::Tasks => "tasks",
            EventRelation::Contractors => "contractors",
            EventRelation::Checklists => "checklists",
            EventRelation::CompletedItems => "completed_items",
        }
    }
}

impl FromStr for EventRelation {
    type Err = EvplanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventRelation::ALL
            .into_iter()
            .find(|r| r.name() == s)
            .ok_or_else(|| EvplanError::UnknownRelation {
                name: s.to_string(),
            })
    }
}

/// Explicit choice of which related collections to load with an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventProjection {
    pub tasks: bool,
    pub contractors: bool,
    pub checklists: bool,
    pub completed_items: bool,
}

impl EventProjection {
    /// Event row only
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        EventRelation::ALL.into_iter().collect()
    }

    pub fn with(mut self, relation: EventRelation) -> Self {
        match relation {
            EventRelation::Tasks => self.tasks = true,
            EventRelation::Contractors => self.contractors = true,
            EventRelation::Checklists => self.checklists = true,
            EventRelation::CompletedItems => self.completed_items = true,
        }
        self
    }

    pub fn includes(&self, relation: EventRelation) -> bool {
        match relation {
            EventRelation::Tasks => self.tasks,
            EventRelation::Contractors => self.contractors,
            EventRelation::Checklists => self.checklists,
            EventRelation::CompletedItems => self.completed_items,
        }
    }
}

impl FromIterator<EventRelation> for EventProjection {
    fn from_iter<I: IntoIterator<Item = EventRelation>>(iter: I) -> Self {
        iter.into_iter()
            .fold(EventProjection::none(), |p, r| p.with(r))
    }
}

/// An event with the related collections its projection asked for
///
/// Collections that were not requested are `None`; requested collections
/// with no rows are empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventDetails {
    #[serde(flatten)]
    pub event: Event,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<TaskSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contractors: Option<Vec<ContractorAssignment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checklists: Option<Vec<EventChecklistStatus>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_items: Option<Vec<CompletedItemView>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_round_trips_through_name() {
        for relation in EventRelation::ALL {
            assert_eq!(relation.name().parse::<EventRelation>().unwrap(), relation);
        }
        assert!("guests".parse::<EventRelation>().is_err());
    }

    #[test]
    fn test_projection_from_relations() {
        let projection: EventProjection = [EventRelation::Tasks, EventRelation::Checklists]
            .into_iter()
            .collect();
        assert!(projection.includes(EventRelation::Tasks));
        assert!(projection.includes(EventRelation::Checklists));
        assert!(!projection.includes(EventRelation::Contractors));
        assert!(EventProjection::all().completed_items);
    }

    #[test]
    fn test_details_skip_unrequested_collections() {
        let details = EventDetails {
            event: Event {
                id: 1,
                owner_id: 2,
                title: "Юбилей".to_string(),
                location: None,
                date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            },
            tasks: Some(Vec::new()),
            contractors: None,
            checklists: None,
            completed_items: None,
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["title"], "Юбилей");
        assert_eq!(json["tasks"], serde_json::json!([]));
        assert!(json.get("contractors").is_none());
    }
}
