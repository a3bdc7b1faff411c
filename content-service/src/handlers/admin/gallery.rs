//! Gallery administration handlers.

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
        content::{CreateGalleryItemRequest, UpdateGalleryItemRequest},
        ListResponse,
    },
    listing::{run_query, ListControls},
    middleware::CurrentIdentity,
    models::{gallery_item, GalleryItem, GallerySort, GalleryVisibilityFilter},
    startup::AppState,
    utils::ValidatedJson,
};

#[tracing::instrument(skip(state, params))]
pub async fn list_gallery_items(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let controls: ListControls<GalleryVisibilityFilter, GallerySort> =
        ListControls::parse(&params);

    let mut cursor = state
        .db
        .gallery_items()
        .find(None, None)
        .await
        .map_err(AppError::from)?;
    let mut items = Vec::new();
    while let Some(item) = cursor.try_next().await.map_err(AppError::from)? {
        items.push(item);
    }

    let page = run_query(
        items,
        &controls,
        &gallery_item::list_spec(),
        state.config.listing.page_size,
    );
    Ok(Json(ListResponse::new(page, controls.serialize())))
}

pub async fn create_gallery_item(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    ValidatedJson(req): ValidatedJson<CreateGalleryItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    let admin = require_access(state.config.admin.allowed_emails.as_deref(), Some(&identity))?;

    let mut item = GalleryItem::new(req.title, req.image_url, req.event_tag, req.taken_at);
    item.published = req.published;

    state
        .db
        .gallery_items()
        .insert_one(&item, None)
        .await
        .map_err(AppError::from)?;

    tracing::info!(item_id = %item.id, admin = %admin, "Gallery item created");
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_gallery_item(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateGalleryItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    let admin = require_access(state.config.admin.allowed_emails.as_deref(), Some(&identity))?;

    let mut item = state
        .db
        .gallery_items()
        .find_one(doc! { "_id": &id }, None)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Gallery item {} not found", id)))?;

    if let Some(title) = req.title {
        item.title = title;
    }
    if let Some(image_url) = req.image_url {
        item.image_url = image_url;
    }
    if let Some(event_tag) = req.event_tag {
        item.event_tag = Some(event_tag);
    }
    if let Some(taken_at) = req.taken_at {
        item.taken_at = taken_at;
    }
    if let Some(published) = req.published {
        item.published = published;
    }

    state
        .db
        .gallery_items()
        .replace_one(doc! { "_id": &id }, &item, None)
        .await
        .map_err(AppError::from)?;

    tracing::info!(item_id = %id, admin = %admin, "Gallery item updated");
    Ok(Json(item))
}

pub async fn delete_gallery_item(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let admin = require_access(state.config.admin.allowed_emails.as_deref(), Some(&identity))?;

    let result = state
        .db
        .gallery_items()
        .delete_one(doc! { "_id": &id }, None)
        .await
        .map_err(AppError::from)?;

    if result.deleted_count == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!(
            "Gallery item {} not found",
            id
        )));
    }

    tracing::info!(item_id = %id, admin = %admin, "Gallery item deleted");
    Ok(StatusCode::NO_CONTENT)
}
