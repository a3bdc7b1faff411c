pub mod events;
pub mod gallery;
pub mod partners;
pub mod posts;
pub mod projects;
pub mod team;

use axum::{extract::State, http::header::AUTHORIZATION, http::HeaderMap, Json};

use crate::access::{self, AccessDecision, Identity};
use crate::startup::AppState;

pub use events::{create_event, delete_event, list_events, update_event};
pub use gallery::{
    create_gallery_item, delete_gallery_item, list_gallery_items, update_gallery_item,
};
pub use partners::{create_partner, delete_partner, list_partners, update_partner};
pub use posts::{create_post, delete_post, list_posts, update_post};
pub use projects::{create_project, delete_project, list_projects, update_project};
pub use team::{create_team_member, delete_team_member, list_team_members, update_team_member};

/// Non-throwing access query for the current caller.
///
/// Mounted outside the admin gate so the dashboard can decide what to render
/// for any visitor: signed out, signed in but not admin, or admin. Never an
/// error response; the decision itself is the payload.
pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> Json<AccessDecision> {
    let identity = resolve_identity(&state, &headers).await;
    let decision = access::evaluate_access(
        state.config.admin.allowed_emails.as_deref(),
        identity.as_ref(),
    );
    Json(decision)
}

async fn resolve_identity(state: &AppState, headers: &HeaderMap) -> Option<Identity> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))?;

    let claims = state.verifier.verify(token).ok()?;

    // A revoked session reads as signed out.
    match state.sessions.is_revoked(&claims.jti).await {
        Ok(false) => Some(claims.into_identity()),
        Ok(true) => None,
        Err(e) => {
            tracing::error!(error = %e, "Redis error checking session revocation");
            None
        }
    }
}
