//! Event model and its admin list wiring.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::listing::{ControlValue, ListSpec};
use crate::models::localized::LocalizedText;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Workshop,
    Social,
    Conference,
    Trip,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Workshop => "workshop",
            EventCategory::Social => "social",
            EventCategory::Conference => "conference",
            EventCategory::Trip => "trip",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub location: Option<String>,
    pub category: EventCategory,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub starts_at: DateTime<Utc>,
    pub published: bool,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn new(
        title: LocalizedText,
        description: LocalizedText,
        location: Option<String>,
        category: EventCategory,
        starts_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            description,
            location,
            category,
            starts_at,
            published: false,
            created_at: Utc::now(),
        }
    }
}

// ==================== Admin list controls ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventCategoryFilter {
    #[default]
    All,
    Workshop,
    Social,
    Conference,
    Trip,
}

impl ControlValue for EventCategoryFilter {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "all" => Some(EventCategoryFilter::All),
            "workshop" => Some(EventCategoryFilter::Workshop),
            "social" => Some(EventCategoryFilter::Social),
            "conference" => Some(EventCategoryFilter::Conference),
            "trip" => Some(EventCategoryFilter::Trip),
            _ => None,
        }
    }

    fn as_param(&self) -> &'static str {
        match self {
            EventCategoryFilter::All => "all",
            EventCategoryFilter::Workshop => "workshop",
            EventCategoryFilter::Social => "social",
            EventCategoryFilter::Conference => "conference",
            EventCategoryFilter::Trip => "trip",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventSort {
    #[default]
    Newest,
    Oldest,
    Title,
}

impl ControlValue for EventSort {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "newest" => Some(EventSort::Newest),
            "oldest" => Some(EventSort::Oldest),
            "title" => Some(EventSort::Title),
            _ => None,
        }
    }

    fn as_param(&self) -> &'static str {
        match self {
            EventSort::Newest => "newest",
            EventSort::Oldest => "oldest",
            EventSort::Title => "title",
        }
    }
}

fn search_fields(event: &Event) -> Vec<Option<&str>> {
    vec![
        Some(event.title.en.as_str()),
        event.title.fr.as_deref(),
        event.title.nl.as_deref(),
        Some(event.description.en.as_str()),
        event.description.fr.as_deref(),
        event.description.nl.as_deref(),
        event.location.as_deref(),
    ]
}

fn category_key(event: &Event) -> Option<&str> {
    Some(event.category.as_str())
}

fn comparator(sort: EventSort, a: &Event, b: &Event) -> Ordering {
    match sort {
        EventSort::Newest => b.starts_at.cmp(&a.starts_at),
        EventSort::Oldest => a.starts_at.cmp(&b.starts_at),
        EventSort::Title => a.title.en.to_lowercase().cmp(&b.title.en.to_lowercase()),
    }
}

pub fn list_spec() -> ListSpec<Event, EventSort> {
    ListSpec {
        search_fields,
        category_key,
        comparator,
    }
}
