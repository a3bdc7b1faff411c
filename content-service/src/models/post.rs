//! Newsletter post model and its admin list wiring.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::listing::{ControlValue, ListSpec};
use crate::models::localized::LocalizedText;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: LocalizedText,
    pub body_markdown: String,
    pub status: PostStatus,
    pub published_at: Option<mongodb::bson::DateTime>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn new(title: LocalizedText, body_markdown: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            body_markdown,
            status: PostStatus::Draft,
            published_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }
}

// ==================== Admin list controls ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostStatusFilter {
    #[default]
    All,
    Draft,
    Published,
}

impl ControlValue for PostStatusFilter {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "all" => Some(PostStatusFilter::All),
            "draft" => Some(PostStatusFilter::Draft),
            "published" => Some(PostStatusFilter::Published),
            _ => None,
        }
    }

    fn as_param(&self) -> &'static str {
        match self {
            PostStatusFilter::All => "all",
            PostStatusFilter::Draft => "draft",
            PostStatusFilter::Published => "published",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostSort {
    #[default]
    Newest,
    Oldest,
    Title,
}

impl ControlValue for PostSort {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "newest" => Some(PostSort::Newest),
            "oldest" => Some(PostSort::Oldest),
            "title" => Some(PostSort::Title),
            _ => None,
        }
    }

    fn as_param(&self) -> &'static str {
        match self {
            PostSort::Newest => "newest",
            PostSort::Oldest => "oldest",
            PostSort::Title => "title",
        }
    }
}

fn search_fields(post: &Post) -> Vec<Option<&str>> {
    vec![
        Some(post.title.en.as_str()),
        post.title.fr.as_deref(),
        post.title.nl.as_deref(),
        Some(post.body_markdown.as_str()),
    ]
}

fn category_key(post: &Post) -> Option<&str> {
    Some(post.status.as_str())
}

fn comparator(sort: PostSort, a: &Post, b: &Post) -> Ordering {
    match sort {
        PostSort::Newest => b.created_at.cmp(&a.created_at),
        PostSort::Oldest => a.created_at.cmp(&b.created_at),
        PostSort::Title => a.title.en.to_lowercase().cmp(&b.title.en.to_lowercase()),
    }
}

pub fn list_spec() -> ListSpec<Post, PostSort> {
    ListSpec {
        search_fields,
        category_key,
        comparator,
    }
}
