//! Student project model and its admin list wiring.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::listing::{ControlValue, ListSpec};
use crate::models::localized::LocalizedText;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Completed,
    Archived,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Archived => "archived",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub summary: LocalizedText,
    pub status: ProjectStatus,
    pub repo_url: Option<String>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn new(name: String, summary: LocalizedText, repo_url: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            summary,
            status: ProjectStatus::Active,
            repo_url,
            created_at: Utc::now(),
        }
    }
}

// ==================== Admin list controls ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectStatusFilter {
    #[default]
    All,
    Active,
    Completed,
    Archived,
}

impl ControlValue for ProjectStatusFilter {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "all" => Some(ProjectStatusFilter::All),
            "active" => Some(ProjectStatusFilter::Active),
            "completed" => Some(ProjectStatusFilter::Completed),
            "archived" => Some(ProjectStatusFilter::Archived),
            _ => None,
        }
    }

    fn as_param(&self) -> &'static str {
        match self {
            ProjectStatusFilter::All => "all",
            ProjectStatusFilter::Active => "active",
            ProjectStatusFilter::Completed => "completed",
            ProjectStatusFilter::Archived => "archived",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectSort {
    #[default]
    Newest,
    Name,
}

impl ControlValue for ProjectSort {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "newest" => Some(ProjectSort::Newest),
            "name" => Some(ProjectSort::Name),
            _ => None,
        }
    }

    fn as_param(&self) -> &'static str {
        match self {
            ProjectSort::Newest => "newest",
            ProjectSort::Name => "name",
        }
    }
}

fn search_fields(project: &Project) -> Vec<Option<&str>> {
    vec![
        Some(project.name.as_str()),
        Some(project.summary.en.as_str()),
        project.summary.fr.as_deref(),
        project.summary.nl.as_deref(),
    ]
}

fn category_key(project: &Project) -> Option<&str> {
    Some(project.status.as_str())
}

fn comparator(sort: ProjectSort, a: &Project, b: &Project) -> Ordering {
    match sort {
        ProjectSort::Newest => b.created_at.cmp(&a.created_at),
        ProjectSort::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    }
}

pub fn list_spec() -> ListSpec<Project, ProjectSort> {
    ListSpec {
        search_fields,
        category_key,
        comparator,
    }
}
