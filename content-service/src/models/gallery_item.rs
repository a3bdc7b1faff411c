//! Gallery item model and its admin list wiring.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::listing::{ControlValue, ListSpec};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub event_tag: Option<String>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub taken_at: DateTime<Utc>,
    pub published: bool,
}

impl GalleryItem {
    pub fn new(
        title: String,
        image_url: String,
        event_tag: Option<String>,
        taken_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            image_url,
            event_tag,
            taken_at,
            published: false,
        }
    }

    fn visibility_key(&self) -> &'static str {
        if self.published {
            "published"
        } else {
            "hidden"
        }
    }
}

// ==================== Admin list controls ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GalleryVisibilityFilter {
    #[default]
    All,
    Published,
    Hidden,
}

impl ControlValue for GalleryVisibilityFilter {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "all" => Some(GalleryVisibilityFilter::All),
            "published" => Some(GalleryVisibilityFilter::Published),
            "hidden" => Some(GalleryVisibilityFilter::Hidden),
            _ => None,
        }
    }

    fn as_param(&self) -> &'static str {
        match self {
            GalleryVisibilityFilter::All => "all",
            GalleryVisibilityFilter::Published => "published",
            GalleryVisibilityFilter::Hidden => "hidden",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GallerySort {
    #[default]
    Newest,
    Oldest,
    Title,
}

impl ControlValue for GallerySort {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "newest" => Some(GallerySort::Newest),
            "oldest" => Some(GallerySort::Oldest),
            "title" => Some(GallerySort::Title),
            _ => None,
        }
    }

    fn as_param(&self) -> &'static str {
        match self {
            GallerySort::Newest => "newest",
            GallerySort::Oldest => "oldest",
            GallerySort::Title => "title",
        }
    }
}

fn search_fields(item: &GalleryItem) -> Vec<Option<&str>> {
    vec![Some(item.title.as_str()), item.event_tag.as_deref()]
}

fn category_key(item: &GalleryItem) -> Option<&str> {
    Some(item.visibility_key())
}

fn comparator(sort: GallerySort, a: &GalleryItem, b: &GalleryItem) -> Ordering {
    match sort {
        GallerySort::Newest => b.taken_at.cmp(&a.taken_at),
        GallerySort::Oldest => a.taken_at.cmp(&b.taken_at),
        GallerySort::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
    }
}

pub fn list_spec() -> ListSpec<GalleryItem, GallerySort> {
    ListSpec {
        search_fields,
        category_key,
        comparator,
    }
}
