//! Project administration handlers.

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
        content::{CreateProjectRequest, UpdateProjectRequest},
        ListResponse,
    },
    listing::{run_query, ListControls},
    middleware::CurrentIdentity,
    models::{project, Project, ProjectSort, ProjectStatusFilter},
    startup::AppState,
    utils::ValidatedJson,
};

#[tracing::instrument(skip(state, params))]
pub async fn list_projects(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let controls: ListControls<ProjectStatusFilter, ProjectSort> = ListControls::parse(&params);

    let mut cursor = state
        .db
        .projects()
        .find(None, None)
        .await
        .map_err(AppError::from)?;
    let mut projects = Vec::new();
    while let Some(project) = cursor.try_next().await.map_err(AppError::from)? {
        projects.push(project);
    }

    let page = run_query(
        projects,
        &controls,
        &project::list_spec(),
        state.config.listing.page_size,
    );
    Ok(Json(ListResponse::new(page, controls.serialize())))
}

pub async fn create_project(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    ValidatedJson(req): ValidatedJson<CreateProjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    let admin = require_access(state.config.admin.allowed_emails.as_deref(), Some(&identity))?;

    let project = Project::new(req.name, req.summary.into(), req.repo_url);

    state
        .db
        .projects()
        .insert_one(&project, None)
        .await
        .map_err(AppError::from)?;

    tracing::info!(project_id = %project.id, admin = %admin, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn update_project(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateProjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    let admin = require_access(state.config.admin.allowed_emails.as_deref(), Some(&identity))?;

    let mut project = state
        .db
        .projects()
        .find_one(doc! { "_id": &id }, None)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Project {} not found", id)))?;

    if let Some(name) = req.name {
        project.name = name;
    }
    if let Some(summary) = req.summary {
        project.summary = summary.into();
    }
    if let Some(status) = req.status {
        project.status = status;
    }
    if let Some(repo_url) = req.repo_url {
        project.repo_url = Some(repo_url);
    }

    state
        .db
        .projects()
        .replace_one(doc! { "_id": &id }, &project, None)
        .await
        .map_err(AppError::from)?;

    tracing::info!(project_id = %id, admin = %admin, "Project updated");
    Ok(Json(project))
}

pub async fn delete_project(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let admin = require_access(state.config.admin.allowed_emails.as_deref(), Some(&identity))?;

    let result = state
        .db
        .projects()
        .delete_one(doc! { "_id": &id }, None)
        .await
        .map_err(AppError::from)?;

    if result.deleted_count == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!(
            "Project {} not found",
            id
        )));
    }

    tracing::info!(project_id = %id, admin = %admin, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}
