//! Admin gate middleware.
//!
//! Runs in front of every `/admin` route: extracts the bearer token, verifies
//! it, checks the session has not been revoked, then evaluates the allowlist.
//! The configuration check has precedence: an unconfigured allowlist surfaces
//! as `not_configured` for every caller, signed in or not, so an operator
//! mistake is never dressed up as a sign-in prompt. An authenticated identity
//! denied with `no_email` or `not_allowlisted` has its session revoked on the
//! spot, so a non-admin login is a failed login end to end, not merely a
//! forbidden page. `not_configured` and `not_authenticated` never revoke.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::access::{self, AccessDecision, DenyReason, Identity};
use crate::services::{SessionRevocation, TokenClaims};
use crate::startup::AppState;
use service_core::error::AppError;

#[derive(Debug)]
enum GateOutcome {
    Allow(Identity),
    Deny(StatusCode, DenyReason),
}

pub async fn admin_gate_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let claims = bearer_token(req.headers()).and_then(|token| state.verifier.verify(token).ok());

    let outcome = authorize(
        state.config.admin.allowed_emails.as_deref(),
        state.sessions.as_ref(),
        claims,
    )
    .await;

    match outcome {
        Ok(GateOutcome::Allow(identity)) => {
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        Ok(GateOutcome::Deny(status, reason)) => deny(status, reason),
        Err(e) => {
            tracing::error!(error = %e, "Redis error checking session revocation");
            // Fail closed when the revocation store cannot be consulted.
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error" })),
            )
                .into_response()
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Decide the fate of one admin request given its verified claims, if any.
///
/// The allowlist is evaluated even when no claims are present, so
/// `not_configured` outranks `not_authenticated` exactly as it does in the
/// pure core. `Err` means the revocation store could not be consulted.
async fn authorize(
    allowlist: Option<&str>,
    sessions: &dyn SessionRevocation,
    claims: Option<TokenClaims>,
) -> Result<GateOutcome, anyhow::Error> {
    // A revoked session is indistinguishable from no session.
    let claims = match claims {
        Some(claims) => {
            if sessions.is_revoked(&claims.jti).await? {
                None
            } else {
                Some(claims)
            }
        }
        None => None,
    };

    let Some(claims) = claims else {
        let reason = match access::evaluate_access(allowlist, None) {
            AccessDecision::Unauthorized { reason } => reason,
            // No identity never authorizes; keep the mapping total.
            AccessDecision::Authorized { .. } => DenyReason::NotAuthenticated,
        };
        return Ok(deny_outcome(reason));
    };

    let jti = claims.jti.clone();
    let revocation_ttl = claims.seconds_until_expiry();
    let identity = claims.into_identity();

    match access::evaluate_access(allowlist, Some(&identity)) {
        AccessDecision::Authorized { email } => {
            tracing::debug!(admin = %email, "Admin gate passed");
            Ok(GateOutcome::Allow(identity))
        }
        AccessDecision::Unauthorized { reason } => {
            if matches!(reason, DenyReason::NoEmail | DenyReason::NotAllowlisted) {
                // Authenticated but not an admin: terminate the session and
                // re-prompt for sign-in.
                if let Err(e) = sessions.revoke(&jti, revocation_ttl).await {
                    tracing::error!(error = %e, jti = %jti, "Failed to revoke non-admin session");
                }
                tracing::warn!(
                    subject = %identity.subject,
                    reason = reason.as_str(),
                    "Rejected non-admin identity on admin surface"
                );
            }
            Ok(deny_outcome(reason))
        }
    }
}

fn deny_outcome(reason: DenyReason) -> GateOutcome {
    let status = match reason {
        DenyReason::NotConfigured => {
            tracing::error!("Admin allowlist is not configured (set ADMIN_EMAILS)");
            StatusCode::INTERNAL_SERVER_ERROR
        }
        DenyReason::NotAuthenticated => StatusCode::UNAUTHORIZED,
        DenyReason::NoEmail | DenyReason::NotAllowlisted => StatusCode::FORBIDDEN,
    };
    GateOutcome::Deny(status, reason)
}

fn deny(status: StatusCode, reason: DenyReason) -> Response {
    let error = match reason {
        DenyReason::NotConfigured => "Admin allowlist is not configured",
        DenyReason::NotAuthenticated => "Authentication required",
        DenyReason::NoEmail => "Identity has no email claim",
        DenyReason::NotAllowlisted => "Not an administrator",
    };
    (
        status,
        Json(json!({ "error": error, "reason": reason.as_str() })),
    )
        .into_response()
}

/// Extractor for the verified identity the gate middleware stored.
///
/// Mutating handlers take this and re-run `require_access` as their first
/// statement, so every write re-checks the allowlist fresh.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(CurrentIdentity)
            .ok_or_else(|| AppError::Unauthorized(anyhow::anyhow!("Authentication required")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MockSessionStore;
    use chrono::Utc;

    fn claims(jti: &str, email: Option<&str>) -> TokenClaims {
        TokenClaims {
            sub: "user-1".to_string(),
            jti: jti.to_string(),
            exp: Utc::now().timestamp() + 3600,
            email: email.map(str::to_string),
            extra: serde_json::Map::new(),
        }
    }

    fn assert_denied(outcome: GateOutcome, status: StatusCode, reason: DenyReason) {
        match outcome {
            GateOutcome::Deny(got_status, got_reason) => {
                assert_eq!(got_status, status);
                assert_eq!(got_reason, reason);
            }
            other => panic!("expected deny, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unconfigured_allowlist_outranks_missing_token() {
        let sessions = MockSessionStore::default();
        let outcome = authorize(None, &sessions, None).await.unwrap();
        assert_denied(
            outcome,
            StatusCode::INTERNAL_SERVER_ERROR,
            DenyReason::NotConfigured,
        );
    }

    #[tokio::test]
    async fn test_unconfigured_allowlist_outranks_valid_identity_and_does_not_revoke() {
        let sessions = MockSessionStore::default();
        let outcome = authorize(
            None,
            &sessions,
            Some(claims("jti-1", Some("admin@example.com"))),
        )
        .await
        .unwrap();
        assert_denied(
            outcome,
            StatusCode::INTERNAL_SERVER_ERROR,
            DenyReason::NotConfigured,
        );
        assert!(!sessions.is_revoked("jti-1").await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_token_is_not_authenticated_and_does_not_revoke() {
        let sessions = MockSessionStore::default();
        let outcome = authorize(Some("admin@example.com"), &sessions, None)
            .await
            .unwrap();
        assert_denied(
            outcome,
            StatusCode::UNAUTHORIZED,
            DenyReason::NotAuthenticated,
        );
    }

    #[tokio::test]
    async fn test_non_allowlisted_identity_is_rejected_and_revoked() {
        let sessions = MockSessionStore::default();
        let outcome = authorize(
            Some("admin@example.com"),
            &sessions,
            Some(claims("jti-2", Some("stranger@example.com"))),
        )
        .await
        .unwrap();
        assert_denied(outcome, StatusCode::FORBIDDEN, DenyReason::NotAllowlisted);
        assert!(sessions.is_revoked("jti-2").await.unwrap());
    }

    #[tokio::test]
    async fn test_identity_without_email_is_rejected_and_revoked() {
        let sessions = MockSessionStore::default();
        let outcome = authorize(
            Some("admin@example.com"),
            &sessions,
            Some(claims("jti-3", None)),
        )
        .await
        .unwrap();
        assert_denied(outcome, StatusCode::FORBIDDEN, DenyReason::NoEmail);
        assert!(sessions.is_revoked("jti-3").await.unwrap());
    }

    #[tokio::test]
    async fn test_revoked_session_reads_as_signed_out() {
        let sessions = MockSessionStore::default();
        sessions.revoke("jti-4", 3600).await.unwrap();

        let outcome = authorize(
            Some("admin@example.com"),
            &sessions,
            Some(claims("jti-4", Some("admin@example.com"))),
        )
        .await
        .unwrap();
        assert_denied(
            outcome,
            StatusCode::UNAUTHORIZED,
            DenyReason::NotAuthenticated,
        );
    }

    #[tokio::test]
    async fn test_allowlisted_identity_passes_the_gate() {
        let sessions = MockSessionStore::default();
        let outcome = authorize(
            Some("a@x.com, B@X.com"),
            &sessions,
            Some(claims("jti-5", Some("b@x.com"))),
        )
        .await
        .unwrap();
        match outcome {
            GateOutcome::Allow(identity) => {
                assert_eq!(identity.subject, "user-1");
                assert_eq!(identity.resolve_email(), Some("b@x.com"));
            }
            other => panic!("expected allow, got {:?}", other),
        }
        assert!(!sessions.is_revoked("jti-5").await.unwrap());
    }
}
