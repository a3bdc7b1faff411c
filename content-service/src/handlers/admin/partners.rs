//! Partner administration handlers.

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
        content::{CreatePartnerRequest, UpdatePartnerRequest},
        ListResponse,
    },
    listing::{run_query, ListControls},
    middleware::CurrentIdentity,
    models::{partner, Partner, PartnerSort, PartnerTierFilter},
    startup::AppState,
    utils::ValidatedJson,
};

#[tracing::instrument(skip(state, params))]
pub async fn list_partners(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let controls: ListControls<PartnerTierFilter, PartnerSort> = ListControls::parse(&params);

    let mut cursor = state
        .db
        .partners()
        .find(None, None)
        .await
        .map_err(AppError::from)?;
    let mut partners = Vec::new();
    while let Some(partner) = cursor.try_next().await.map_err(AppError::from)? {
        partners.push(partner);
    }

    let page = run_query(
        partners,
        &controls,
        &partner::list_spec(),
        state.config.listing.page_size,
    );
    Ok(Json(ListResponse::new(page, controls.serialize())))
}

pub async fn create_partner(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    ValidatedJson(req): ValidatedJson<CreatePartnerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let admin = require_access(state.config.admin.allowed_emails.as_deref(), Some(&identity))?;

    // Partner names are the public anchor; keep them unique.
    let existing = state
        .db
        .partners()
        .find_one(doc! { "name": &req.name }, None)
        .await
        .map_err(AppError::from)?;
    if existing.is_some() {
        return Err(AppError::Conflict(anyhow::anyhow!(
            "Partner '{}' already exists",
            req.name
        )));
    }

    let partner = Partner::new(req.name, req.tier, req.website, req.logo_url);

    state
        .db
        .partners()
        .insert_one(&partner, None)
        .await
        .map_err(AppError::from)?;

    tracing::info!(partner_id = %partner.id, admin = %admin, "Partner created");
    Ok((StatusCode::CREATED, Json(partner)))
}

pub async fn update_partner(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdatePartnerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let admin = require_access(state.config.admin.allowed_emails.as_deref(), Some(&identity))?;

    let mut partner = state
        .db
        .partners()
        .find_one(doc! { "_id": &id }, None)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Partner {} not found", id)))?;

    if let Some(name) = req.name {
        partner.name = name;
    }
    if let Some(tier) = req.tier {
        partner.tier = tier;
    }
    if let Some(website) = req.website {
        partner.website = Some(website);
    }
    if let Some(logo_url) = req.logo_url {
        partner.logo_url = Some(logo_url);
    }

    state
        .db
        .partners()
        .replace_one(doc! { "_id": &id }, &partner, None)
        .await
        .map_err(AppError::from)?;

    tracing::info!(partner_id = %id, admin = %admin, "Partner updated");
    Ok(Json(partner))
}

pub async fn delete_partner(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let admin = require_access(state.config.admin.allowed_emails.as_deref(), Some(&identity))?;

    let result = state
        .db
        .partners()
        .delete_one(doc! { "_id": &id }, None)
        .await
        .map_err(AppError::from)?;

    if result.deleted_count == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!(
            "Partner {} not found",
            id
        )));
    }

    tracing::info!(partner_id = %id, admin = %admin, "Partner deleted");
    Ok(StatusCode::NO_CONTENT)
}
