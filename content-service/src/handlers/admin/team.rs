//! Team member administration handlers.

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
        content::{CreateTeamMemberRequest, UpdateTeamMemberRequest},
        ListResponse,
    },
    listing::{run_query, ListControls},
    middleware::CurrentIdentity,
    models::{team_member, CommitteeFilter, TeamMember, TeamSort},
    startup::AppState,
    utils::ValidatedJson,
};

#[tracing::instrument(skip(state, params))]
pub async fn list_team_members(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let controls: ListControls<CommitteeFilter, TeamSort> = ListControls::parse(&params);

    let mut cursor = state
        .db
        .team_members()
        .find(None, None)
        .await
        .map_err(AppError::from)?;
    let mut members = Vec::new();
    while let Some(member) = cursor.try_next().await.map_err(AppError::from)? {
        members.push(member);
    }

    let page = run_query(
        members,
        &controls,
        &team_member::list_spec(),
        state.config.listing.page_size,
    );
    Ok(Json(ListResponse::new(page, controls.serialize())))
}

pub async fn create_team_member(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    ValidatedJson(req): ValidatedJson<CreateTeamMemberRequest>,
) -> Result<impl IntoResponse, AppError> {
    let admin = require_access(state.config.admin.allowed_emails.as_deref(), Some(&identity))?;

    let member = TeamMember::new(req.name, req.role.into(), req.committee, req.photo_url);

    state
        .db
        .team_members()
        .insert_one(&member, None)
        .await
        .map_err(AppError::from)?;

    tracing::info!(member_id = %member.id, admin = %admin, "Team member created");
    Ok((StatusCode::CREATED, Json(member)))
}

pub async fn update_team_member(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateTeamMemberRequest>,
) -> Result<impl IntoResponse, AppError> {
    let admin = require_access(state.config.admin.allowed_emails.as_deref(), Some(&identity))?;

    let mut member = state
        .db
        .team_members()
        .find_one(doc! { "_id": &id }, None)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Team member {} not found", id)))?;

    if let Some(name) = req.name {
        member.name = name;
    }
    if let Some(role) = req.role {
        member.role = role.into();
    }
    if let Some(committee) = req.committee {
        member.committee = committee;
    }
    if let Some(photo_url) = req.photo_url {
        member.photo_url = Some(photo_url);
    }

    state
        .db
        .team_members()
        .replace_one(doc! { "_id": &id }, &member, None)
        .await
        .map_err(AppError::from)?;

    tracing::info!(member_id = %id, admin = %admin, "Team member updated");
    Ok(Json(member))
}

pub async fn delete_team_member(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let admin = require_access(state.config.admin.allowed_emails.as_deref(), Some(&identity))?;

    let result = state
        .db
        .team_members()
        .delete_one(doc! { "_id": &id }, None)
        .await
        .map_err(AppError::from)?;

    if result.deleted_count == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!(
            "Team member {} not found",
            id
        )));
    }

    tracing::info!(member_id = %id, admin = %admin, "Team member deleted");
    Ok(StatusCode::NO_CONTENT)
}
