//! Event administration handlers.
//!
//! Every mutating handler re-checks the allowlist via `require_access` as
//! its first statement, in addition to the gate middleware in front of the
//! whole admin surface.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use futures::stream::TryStreamExt;
use mongodb::bson::doc;
use service_core::error::AppError;

use crate::{
    access::require_access,
    dtos::{
        content::{CreateEventRequest, UpdateEventRequest},
        ListResponse,
    },
    listing::{run_query, ListControls},
    middleware::CurrentIdentity,
    models::{event, Event, EventCategoryFilter, EventSort},
    startup::AppState,
    utils::ValidatedJson,
};

#[tracing::instrument(skip(state, params))]
pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let controls: ListControls<EventCategoryFilter, EventSort> = ListControls::parse(&params);

    let mut cursor = state
        .db
        .events()
        .find(None, None)
        .await
        .map_err(AppError::from)?;
    let mut events = Vec::new();
    while let Some(ev) = cursor.try_next().await.map_err(AppError::from)? {
        events.push(ev);
    }

    let page = run_query(
        events,
        &controls,
        &event::list_spec(),
        state.config.listing.page_size,
    );
    Ok(Json(ListResponse::new(page, controls.serialize())))
}

pub async fn create_event(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    ValidatedJson(req): ValidatedJson<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let admin = require_access(state.config.admin.allowed_emails.as_deref(), Some(&identity))?;

    let mut event = Event::new(
        req.title.into(),
        req.description.into(),
        req.location,
        req.category,
        req.starts_at,
    );
    event.published = req.published;

    state
        .db
        .events()
        .insert_one(&event, None)
        .await
        .map_err(AppError::from)?;

    tracing::info!(event_id = %event.id, admin = %admin, "Event created");
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn update_event(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let admin = require_access(state.config.admin.allowed_emails.as_deref(), Some(&identity))?;

    let mut event = state
        .db
        .events()
        .find_one(doc! { "_id": &id }, None)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Event {} not found", id)))?;

    if let Some(title) = req.title {
        event.title = title.into();
    }
    if let Some(description) = req.description {
        event.description = description.into();
    }
    if let Some(location) = req.location {
        event.location = Some(location);
    }
    if let Some(category) = req.category {
        event.category = category;
    }
    if let Some(starts_at) = req.starts_at {
        event.starts_at = starts_at;
    }
    if let Some(published) = req.published {
        event.published = published;
    }

    state
        .db
        .events()
        .replace_one(doc! { "_id": &id }, &event, None)
        .await
        .map_err(AppError::from)?;

    tracing::info!(event_id = %id, admin = %admin, "Event updated");
    Ok(Json(event))
}

pub async fn delete_event(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let admin = require_access(state.config.admin.allowed_emails.as_deref(), Some(&identity))?;

    let result = state
        .db
        .events()
        .delete_one(doc! { "_id": &id }, None)
        .await
        .map_err(AppError::from)?;

    if result.deleted_count == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!("Event {} not found", id)));
    }

    tracing::info!(event_id = %id, admin = %admin, "Event deleted");
    Ok(StatusCode::NO_CONTENT)
}
