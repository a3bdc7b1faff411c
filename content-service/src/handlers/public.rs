//! Public read endpoints for the website.
//!
//! These serve published content only and resolve localized fields to the
//! requested locale, falling back to English. No authentication.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use futures::stream::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::FindOptions;
use serde::{Deserialize, Serialize};
use service_core::error::AppError;

use crate::listing::apply_sort;
use crate::models::{partner, team_member, Locale, PartnerSort, PartnerTier, TeamSort};
use crate::startup::AppState;

#[derive(Debug, Deserialize)]
pub struct PublicQuery {
    pub locale: Option<String>,
}

impl PublicQuery {
    fn locale(&self) -> Locale {
        self.locale.as_deref().map(Locale::parse).unwrap_or_default()
    }
}

// ============================================================================
// Response types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct PublicEvent {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub category: &'static str,
    pub starts_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct PublicPost {
    pub id: String,
    pub title: String,
    pub body_markdown: String,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct PublicProject {
    pub id: String,
    pub name: String,
    pub summary: String,
    pub status: &'static str,
    pub repo_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PublicPartner {
    pub id: String,
    pub name: String,
    pub tier: PartnerTier,
    pub website: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PublicTeamMember {
    pub id: String,
    pub name: String,
    pub role: String,
    pub committee: &'static str,
    pub photo_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PublicGalleryItem {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub event_tag: Option<String>,
    pub taken_at: DateTime<Utc>,
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<PublicQuery>,
) -> Result<Json<Vec<PublicEvent>>, AppError> {
    let locale = query.locale();
    let options = FindOptions::builder()
        .sort(doc! { "starts_at": -1 })
        .build();

    let mut cursor = state
        .db
        .events()
        .find(doc! { "published": true }, options)
        .await
        .map_err(AppError::from)?;

    let mut events = Vec::new();
    while let Some(ev) = cursor.try_next().await.map_err(AppError::from)? {
        events.push(PublicEvent {
            id: ev.id.clone(),
            title: ev.title.resolve(locale).to_string(),
            description: ev.description.resolve(locale).to_string(),
            location: ev.location.clone(),
            category: ev.category.as_str(),
            starts_at: ev.starts_at,
        });
    }
    Ok(Json(events))
}

pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PublicQuery>,
) -> Result<Json<Vec<PublicPost>>, AppError> {
    let locale = query.locale();
    let options = FindOptions::builder()
        .sort(doc! { "published_at": -1 })
        .build();

    let mut cursor = state
        .db
        .posts()
        .find(doc! { "status": "published" }, options)
        .await
        .map_err(AppError::from)?;

    let mut posts = Vec::new();
    while let Some(post) = cursor.try_next().await.map_err(AppError::from)? {
        posts.push(PublicPost {
            id: post.id.clone(),
            title: post.title.resolve(locale).to_string(),
            body_markdown: post.body_markdown.clone(),
            published_at: post.published_at.map(|ts| ts.to_chrono()),
        });
    }
    Ok(Json(posts))
}

pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<PublicQuery>,
) -> Result<Json<Vec<PublicProject>>, AppError> {
    let locale = query.locale();
    let options = FindOptions::builder()
        .sort(doc! { "created_at": -1 })
        .build();

    let mut cursor = state
        .db
        .projects()
        .find(None, options)
        .await
        .map_err(AppError::from)?;

    let mut projects = Vec::new();
    while let Some(project) = cursor.try_next().await.map_err(AppError::from)? {
        projects.push(PublicProject {
            id: project.id.clone(),
            name: project.name.clone(),
            summary: project.summary.resolve(locale).to_string(),
            status: project.status.as_str(),
            repo_url: project.repo_url.clone(),
        });
    }
    Ok(Json(projects))
}

pub async fn list_partners(
    State(state): State<AppState>,
) -> Result<Json<Vec<PublicPartner>>, AppError> {
    let mut cursor = state
        .db
        .partners()
        .find(None, None)
        .await
        .map_err(AppError::from)?;

    let mut partners = Vec::new();
    while let Some(p) = cursor.try_next().await.map_err(AppError::from)? {
        partners.push(p);
    }

    // Tier rank with alphabetical tie-break, same ordering the admin default
    // uses.
    let partners = apply_sort(partners, PartnerSort::Tier, partner::comparator);

    Ok(Json(
        partners
            .into_iter()
            .map(|p| PublicPartner {
                id: p.id,
                name: p.name,
                tier: p.tier,
                website: p.website,
                logo_url: p.logo_url,
            })
            .collect(),
    ))
}

pub async fn list_team(
    State(state): State<AppState>,
    Query(query): Query<PublicQuery>,
) -> Result<Json<Vec<PublicTeamMember>>, AppError> {
    let locale = query.locale();

    let mut cursor = state
        .db
        .team_members()
        .find(None, None)
        .await
        .map_err(AppError::from)?;

    let mut members = Vec::new();
    while let Some(m) = cursor.try_next().await.map_err(AppError::from)? {
        members.push(m);
    }

    let members = apply_sort(members, TeamSort::Name, team_member::comparator);

    Ok(Json(
        members
            .into_iter()
            .map(|m| PublicTeamMember {
                id: m.id,
                name: m.name,
                role: m.role.resolve(locale).to_string(),
                committee: m.committee.as_str(),
                photo_url: m.photo_url,
            })
            .collect(),
    ))
}

pub async fn list_gallery(
    State(state): State<AppState>,
) -> Result<Json<Vec<PublicGalleryItem>>, AppError> {
    let options = FindOptions::builder().sort(doc! { "taken_at": -1 }).build();

    let mut cursor = state
        .db
        .gallery_items()
        .find(doc! { "published": true }, options)
        .await
        .map_err(AppError::from)?;

    let mut items = Vec::new();
    while let Some(item) = cursor.try_next().await.map_err(AppError::from)? {
        items.push(PublicGalleryItem {
            id: item.id.clone(),
            title: item.title.clone(),
            image_url: item.image_url.clone(),
            event_tag: item.event_tag.clone(),
            taken_at: item.taken_at,
        });
    }
    Ok(Json(items))
}
