//! Team member model and its admin list wiring.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::listing::{ControlValue, ListSpec};
use crate::models::localized::LocalizedText;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Committee {
    Board,
    Events,
    Communication,
    Partnerships,
}

impl Committee {
    pub fn as_str(&self) -> &'static str {
        match self {
            Committee::Board => "board",
            Committee::Events => "events",
            Committee::Communication => "communication",
            Committee::Partnerships => "partnerships",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub role: LocalizedText,
    pub committee: Committee,
    pub photo_url: Option<String>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub joined_at: DateTime<Utc>,
}

impl TeamMember {
    pub fn new(
        name: String,
        role: LocalizedText,
        committee: Committee,
        photo_url: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            role,
            committee,
            photo_url,
            joined_at: Utc::now(),
        }
    }
}

// ==================== Admin list controls ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitteeFilter {
    #[default]
    All,
    Board,
    Events,
    Communication,
    Partnerships,
}

impl ControlValue for CommitteeFilter {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "all" => Some(CommitteeFilter::All),
            "board" => Some(CommitteeFilter::Board),
            "events" => Some(CommitteeFilter::Events),
            "communication" => Some(CommitteeFilter::Communication),
            "partnerships" => Some(CommitteeFilter::Partnerships),
            _ => None,
        }
    }

    fn as_param(&self) -> &'static str {
        match self {
            CommitteeFilter::All => "all",
            CommitteeFilter::Board => "board",
            CommitteeFilter::Events => "events",
            CommitteeFilter::Communication => "communication",
            CommitteeFilter::Partnerships => "partnerships",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TeamSort {
    #[default]
    Name,
    Newest,
}

impl ControlValue for TeamSort {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "name" => Some(TeamSort::Name),
            "newest" => Some(TeamSort::Newest),
            _ => None,
        }
    }

    fn as_param(&self) -> &'static str {
        match self {
            TeamSort::Name => "name",
            TeamSort::Newest => "newest",
        }
    }
}

fn search_fields(member: &TeamMember) -> Vec<Option<&str>> {
    vec![
        Some(member.name.as_str()),
        Some(member.role.en.as_str()),
        member.role.fr.as_deref(),
        member.role.nl.as_deref(),
    ]
}

fn category_key(member: &TeamMember) -> Option<&str> {
    Some(member.committee.as_str())
}

pub fn comparator(sort: TeamSort, a: &TeamMember, b: &TeamMember) -> Ordering {
    match sort {
        TeamSort::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        TeamSort::Newest => b.joined_at.cmp(&a.joined_at),
    }
}

pub fn list_spec() -> ListSpec<TeamMember, TeamSort> {
    ListSpec {
        search_fields,
        category_key,
        comparator,
    }
}
