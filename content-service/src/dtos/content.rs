//! Request bodies for the admin CRUD endpoints.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::models::{
    Committee, EventCategory, LocalizedText, PartnerTier, PostStatus, ProjectStatus,
};

/// Localized text as submitted by the admin dashboard. English is required;
/// translations are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LocalizedTextInput {
    #[validate(length(min = 1, max = 500))]
    pub en: String,
    #[validate(length(max = 500))]
    pub fr: Option<String>,
    #[validate(length(max = 500))]
    pub nl: Option<String>,
}

impl From<LocalizedTextInput> for LocalizedText {
    fn from(input: LocalizedTextInput) -> Self {
        LocalizedText {
            en: input.en,
            fr: input.fr.filter(|s| !s.is_empty()),
            nl: input.nl.filter(|s| !s.is_empty()),
        }
    }
}

// ==================== Events ====================

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(nested)]
    pub title: LocalizedTextInput,
    #[validate(nested)]
    pub description: LocalizedTextInput,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    pub category: EventCategory,
    pub starts_at: DateTime<Utc>,
    #[serde(default)]
    pub published: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEventRequest {
    #[validate(nested)]
    pub title: Option<LocalizedTextInput>,
    #[validate(nested)]
    pub description: Option<LocalizedTextInput>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    pub category: Option<EventCategory>,
    pub starts_at: Option<DateTime<Utc>>,
    pub published: Option<bool>,
}

// ==================== Posts ====================

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(nested)]
    pub title: LocalizedTextInput,
    #[validate(length(min = 1))]
    pub body_markdown: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(nested)]
    pub title: Option<LocalizedTextInput>,
    #[validate(length(min = 1))]
    pub body_markdown: Option<String>,
    pub status: Option<PostStatus>,
}

// ==================== Projects ====================

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(nested)]
    pub summary: LocalizedTextInput,
    #[validate(url)]
    pub repo_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(nested)]
    pub summary: Option<LocalizedTextInput>,
    pub status: Option<ProjectStatus>,
    #[validate(url)]
    pub repo_url: Option<String>,
}

// ==================== Partners ====================

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePartnerRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub tier: PartnerTier,
    #[validate(url)]
    pub website: Option<String>,
    #[validate(url)]
    pub logo_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePartnerRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub tier: Option<PartnerTier>,
    #[validate(url)]
    pub website: Option<String>,
    #[validate(url)]
    pub logo_url: Option<String>,
}

// ==================== Team members ====================

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeamMemberRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(nested)]
    pub role: LocalizedTextInput,
    pub committee: Committee,
    #[validate(url)]
    pub photo_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTeamMemberRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(nested)]
    pub role: Option<LocalizedTextInput>,
    pub committee: Option<Committee>,
    #[validate(url)]
    pub photo_url: Option<String>,
}

// ==================== Gallery ====================

#[derive(Debug, Deserialize, Validate)]
pub struct CreateGalleryItemRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(url)]
    pub image_url: String,
    #[validate(length(max = 100))]
    pub event_tag: Option<String>,
    pub taken_at: DateTime<Utc>,
    #[serde(default)]
    pub published: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateGalleryItemRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
    #[validate(length(max = 100))]
    pub event_tag: Option<String>,
    pub taken_at: Option<DateTime<Utc>>,
    pub published: Option<bool>,
}
