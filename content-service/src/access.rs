//! Admin access control.
//!
//! Decides whether an identity may perform administrative actions based on a
//! configured email allowlist. The decision is recomputed on every call, so a
//! revoked admin loses write access on the very next request.

use std::collections::BTreeSet;

use serde::Serialize;
use service_core::error::AppError;
use thiserror::Error;

/// The reason an identity was denied admin access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// The admin allowlist has not been configured by the operator.
    NotConfigured,
    /// No identity was presented.
    NotAuthenticated,
    /// The identity carries no resolvable email claim.
    NoEmail,
    /// The identity's email is not on the allowlist.
    NotAllowlisted,
}

impl DenyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DenyReason::NotConfigured => "not_configured",
            DenyReason::NotAuthenticated => "not_authenticated",
            DenyReason::NoEmail => "no_email",
            DenyReason::NotAllowlisted => "not_allowlisted",
        }
    }
}

/// The outcome of an access evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AccessDecision {
    /// The identity may administer content. Carries the lower-cased email
    /// that matched the allowlist.
    Authorized { email: String },
    Unauthorized { reason: DenyReason },
}

impl AccessDecision {
    pub fn is_authorized(&self) -> bool {
        matches!(self, AccessDecision::Authorized { .. })
    }
}

/// A verified principal supplied by the external identity provider.
///
/// The provider's claim layout is not under our control, so everything beyond
/// the subject and the well-known top-level email lands in `claims` verbatim.
#[derive(Debug, Clone)]
pub struct Identity {
    pub subject: String,
    pub email: Option<String>,
    pub claims: serde_json::Value,
}

impl Identity {
    /// Resolve the email for this identity.
    ///
    /// Prefers the top-level `email`, then probes the claims bag for
    /// `email`, `primary_email` and `primaryEmail`, first match wins.
    pub fn resolve_email(&self) -> Option<&str> {
        if let Some(email) = self.email.as_deref() {
            return Some(email);
        }
        for key in ["email", "primary_email", "primaryEmail"] {
            if let Some(value) = self.claims.get(key).and_then(|v| v.as_str()) {
                return Some(value);
            }
        }
        None
    }
}

/// Guard error raised by [`require_access`].
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("admin allowlist is not configured (set ADMIN_EMAILS)")]
    NotConfigured,
    #[error("authentication required")]
    NotAuthenticated,
    #[error("identity has no email claim")]
    NoEmail,
    #[error("not an administrator")]
    NotAllowlisted,
}

impl AccessError {
    pub fn reason(&self) -> DenyReason {
        match self {
            AccessError::NotConfigured => DenyReason::NotConfigured,
            AccessError::NotAuthenticated => DenyReason::NotAuthenticated,
            AccessError::NoEmail => DenyReason::NoEmail,
            AccessError::NotAllowlisted => DenyReason::NotAllowlisted,
        }
    }
}

impl From<DenyReason> for AccessError {
    fn from(reason: DenyReason) -> Self {
        match reason {
            DenyReason::NotConfigured => AccessError::NotConfigured,
            DenyReason::NotAuthenticated => AccessError::NotAuthenticated,
            DenyReason::NoEmail => AccessError::NoEmail,
            DenyReason::NotAllowlisted => AccessError::NotAllowlisted,
        }
    }
}

impl From<AccessError> for AppError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::NotConfigured => AppError::ConfigError(anyhow::anyhow!("{}", err)),
            AccessError::NotAuthenticated => AppError::Unauthorized(anyhow::anyhow!("{}", err)),
            AccessError::NoEmail | AccessError::NotAllowlisted => {
                AppError::Forbidden(anyhow::anyhow!("{}", err))
            }
        }
    }
}

/// Parse a comma-separated allowlist string into a normalized email set.
///
/// Entries are trimmed and lower-cased; empties are discarded. A string that
/// parses to zero entries means the allowlist is not configured.
fn parse_allowlist(configured: Option<&str>) -> BTreeSet<String> {
    configured
        .unwrap_or_default()
        .split(',')
        .map(|entry| entry.trim().to_lowercase())
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Evaluate admin access for an identity against the configured allowlist.
///
/// Pure and infallible: safe to call speculatively for conditional rendering.
pub fn evaluate_access(configured: Option<&str>, identity: Option<&Identity>) -> AccessDecision {
    let allowlist = parse_allowlist(configured);
    if allowlist.is_empty() {
        return AccessDecision::Unauthorized {
            reason: DenyReason::NotConfigured,
        };
    }

    let identity = match identity {
        Some(identity) => identity,
        None => {
            return AccessDecision::Unauthorized {
                reason: DenyReason::NotAuthenticated,
            }
        }
    };

    let email = match identity.resolve_email() {
        Some(email) => email.to_lowercase(),
        None => {
            return AccessDecision::Unauthorized {
                reason: DenyReason::NoEmail,
            }
        }
    };

    if allowlist.contains(&email) {
        AccessDecision::Authorized { email }
    } else {
        AccessDecision::Unauthorized {
            reason: DenyReason::NotAllowlisted,
        }
    }
}

/// Guarding form of [`evaluate_access`].
///
/// Returns the authorized email, or fails with the deny reason attached.
/// Invoked as the first statement of every mutating handler so unauthorized
/// writes fail before touching stored data.
pub fn require_access(
    configured: Option<&str>,
    identity: Option<&Identity>,
) -> Result<String, AccessError> {
    match evaluate_access(configured, identity) {
        AccessDecision::Authorized { email } => Ok(email),
        AccessDecision::Unauthorized { reason } => Err(reason.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn identity_with_email(email: &str) -> Identity {
        Identity {
            subject: "user-1".to_string(),
            email: Some(email.to_string()),
            claims: json!({}),
        }
    }

    fn identity_with_claims(claims: serde_json::Value) -> Identity {
        Identity {
            subject: "user-1".to_string(),
            email: None,
            claims,
        }
    }

    #[test]
    fn test_unset_allowlist_is_not_configured() {
        let identity = identity_with_email("admin@example.com");
        let decision = evaluate_access(None, Some(&identity));
        assert_eq!(
            decision,
            AccessDecision::Unauthorized {
                reason: DenyReason::NotConfigured
            }
        );
    }

    #[test]
    fn test_degenerate_allowlist_strings_are_not_configured() {
        let identity = identity_with_email("admin@example.com");
        for configured in ["", ",,,", "  ", " , , "] {
            let decision = evaluate_access(Some(configured), Some(&identity));
            assert_eq!(
                decision,
                AccessDecision::Unauthorized {
                    reason: DenyReason::NotConfigured
                },
                "allowlist {:?} should read as unconfigured",
                configured
            );
        }
    }

    #[test]
    fn test_missing_identity_is_not_authenticated() {
        let decision = evaluate_access(Some("admin@example.com"), None);
        assert_eq!(
            decision,
            AccessDecision::Unauthorized {
                reason: DenyReason::NotAuthenticated
            }
        );
    }

    #[test]
    fn test_identity_without_email_is_denied_even_when_allowlisted_emails_exist() {
        let identity = identity_with_claims(json!({ "name": "No Mail" }));
        let decision = evaluate_access(Some("admin@example.com"), Some(&identity));
        assert_eq!(
            decision,
            AccessDecision::Unauthorized {
                reason: DenyReason::NoEmail
            }
        );
    }

    #[test]
    fn test_allowlisted_email_is_authorized() {
        let identity = identity_with_email("admin@example.com");
        let decision = evaluate_access(Some("admin@example.com"), Some(&identity));
        assert_eq!(
            decision,
            AccessDecision::Authorized {
                email: "admin@example.com".to_string()
            }
        );
    }

    #[test]
    fn test_matching_is_case_insensitive_both_ways() {
        let identity = identity_with_email("admin@example.com");
        let decision = evaluate_access(Some("Admin@Example.com"), Some(&identity));
        assert_eq!(
            decision,
            AccessDecision::Authorized {
                email: "admin@example.com".to_string()
            }
        );

        let identity = identity_with_email("ADMIN@EXAMPLE.COM");
        let decision = evaluate_access(Some("admin@example.com"), Some(&identity));
        assert_eq!(
            decision,
            AccessDecision::Authorized {
                email: "admin@example.com".to_string()
            }
        );
    }

    #[test]
    fn test_second_entry_of_allowlist_matches() {
        // End-to-end scenario: "a@x.com, B@X.com" with identity b@x.com.
        let identity = identity_with_email("b@x.com");
        let decision = evaluate_access(Some("a@x.com, B@X.com"), Some(&identity));
        assert_eq!(
            decision,
            AccessDecision::Authorized {
                email: "b@x.com".to_string()
            }
        );
    }

    #[test]
    fn test_unlisted_email_is_not_allowlisted() {
        let identity = identity_with_email("stranger@example.com");
        let decision = evaluate_access(Some("admin@example.com"), Some(&identity));
        assert_eq!(
            decision,
            AccessDecision::Unauthorized {
                reason: DenyReason::NotAllowlisted
            }
        );
    }

    #[test]
    fn test_email_resolution_prefers_top_level_then_probes_claims() {
        let identity = Identity {
            subject: "user-1".to_string(),
            email: Some("top@example.com".to_string()),
            claims: json!({ "email": "nested@example.com" }),
        };
        assert_eq!(identity.resolve_email(), Some("top@example.com"));

        let identity = identity_with_claims(json!({ "email": "nested@example.com" }));
        assert_eq!(identity.resolve_email(), Some("nested@example.com"));

        let identity = identity_with_claims(json!({ "primary_email": "snake@example.com" }));
        assert_eq!(identity.resolve_email(), Some("snake@example.com"));

        let identity = identity_with_claims(json!({ "primaryEmail": "camel@example.com" }));
        assert_eq!(identity.resolve_email(), Some("camel@example.com"));

        let identity = identity_with_claims(json!({
            "primary_email": "snake@example.com",
            "primaryEmail": "camel@example.com"
        }));
        assert_eq!(identity.resolve_email(), Some("snake@example.com"));
    }

    #[test]
    fn test_non_string_claim_values_are_skipped() {
        let identity = identity_with_claims(json!({ "email": 42 }));
        let decision = evaluate_access(Some("admin@example.com"), Some(&identity));
        assert_eq!(
            decision,
            AccessDecision::Unauthorized {
                reason: DenyReason::NoEmail
            }
        );
    }

    #[test]
    fn test_require_access_returns_email_on_success() {
        let identity = identity_with_email("Admin@Example.com");
        let email = require_access(Some("admin@example.com"), Some(&identity)).unwrap();
        assert_eq!(email, "admin@example.com");
    }

    #[test]
    fn test_require_access_carries_the_deny_reason() {
        let err = require_access(None, None).unwrap_err();
        assert_eq!(err.reason(), DenyReason::NotConfigured);

        let err = require_access(Some("admin@example.com"), None).unwrap_err();
        assert_eq!(err.reason(), DenyReason::NotAuthenticated);

        let identity = identity_with_claims(serde_json::json!({}));
        let err = require_access(Some("admin@example.com"), Some(&identity)).unwrap_err();
        assert_eq!(err.reason(), DenyReason::NoEmail);

        let identity = identity_with_email("stranger@example.com");
        let err = require_access(Some("admin@example.com"), Some(&identity)).unwrap_err();
        assert_eq!(err.reason(), DenyReason::NotAllowlisted);
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let identity = identity_with_email("admin@example.com");
        let first = evaluate_access(Some("admin@example.com"), Some(&identity));
        let second = evaluate_access(Some("admin@example.com"), Some(&identity));
        assert_eq!(first, second);
    }
}
