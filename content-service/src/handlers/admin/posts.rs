//! Newsletter post administration handlers.

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
        content::{CreatePostRequest, UpdatePostRequest},
        ListResponse,
    },
    listing::{run_query, ListControls},
    middleware::CurrentIdentity,
    models::{post, Post, PostSort, PostStatus, PostStatusFilter},
    startup::AppState,
    utils::ValidatedJson,
};

#[tracing::instrument(skip(state, params))]
pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let controls: ListControls<PostStatusFilter, PostSort> = ListControls::parse(&params);

    let mut cursor = state
        .db
        .posts()
        .find(None, None)
        .await
        .map_err(AppError::from)?;
    let mut posts = Vec::new();
    while let Some(post) = cursor.try_next().await.map_err(AppError::from)? {
        posts.push(post);
    }

    let page = run_query(
        posts,
        &controls,
        &post::list_spec(),
        state.config.listing.page_size,
    );
    Ok(Json(ListResponse::new(page, controls.serialize())))
}

pub async fn create_post(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    ValidatedJson(req): ValidatedJson<CreatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let admin = require_access(state.config.admin.allowed_emails.as_deref(), Some(&identity))?;

    let post = Post::new(req.title.into(), req.body_markdown);

    state
        .db
        .posts()
        .insert_one(&post, None)
        .await
        .map_err(AppError::from)?;

    tracing::info!(post_id = %post.id, admin = %admin, "Post created");
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn update_post(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let admin = require_access(state.config.admin.allowed_emails.as_deref(), Some(&identity))?;

    let mut post = state
        .db
        .posts()
        .find_one(doc! { "_id": &id }, None)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Post {} not found", id)))?;

    if let Some(title) = req.title {
        post.title = title.into();
    }
    if let Some(body_markdown) = req.body_markdown {
        post.body_markdown = body_markdown;
    }
    if let Some(status) = req.status {
        // First transition to published stamps the publication date.
        if status == PostStatus::Published && post.published_at.is_none() {
            post.published_at = Some(mongodb::bson::DateTime::now());
        }
        post.status = status;
    }

    state
        .db
        .posts()
        .replace_one(doc! { "_id": &id }, &post, None)
        .await
        .map_err(AppError::from)?;

    tracing::info!(post_id = %id, admin = %admin, "Post updated");
    Ok(Json(post))
}

pub async fn delete_post(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let admin = require_access(state.config.admin.allowed_emails.as_deref(), Some(&identity))?;

    let result = state
        .db
        .posts()
        .delete_one(doc! { "_id": &id }, None)
        .await
        .map_err(AppError::from)?;

    if result.deleted_count == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!("Post {} not found", id)));
    }

    tracing::info!(post_id = %id, admin = %admin, "Post deleted");
    Ok(StatusCode::NO_CONTENT)
}
