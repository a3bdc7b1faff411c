//! End-to-end access-control scenarios, exercised through the public crate
//! API the way the admin surface uses it: `evaluate_access` for rendering
//! decisions, `require_access` as the mutation guard.

use content_service::access::{
    evaluate_access, require_access, AccessDecision, DenyReason, Identity,
};
use serde_json::json;

fn identity(email: Option<&str>, claims: serde_json::Value) -> Identity {
    Identity {
        subject: "user-123".to_string(),
        email: email.map(str::to_string),
        claims,
    }
}

#[test]
fn mixed_case_allowlist_authorizes_lowercase_identity() {
    // Allowlist "a@x.com, B@X.com", identity email "b@x.com".
    let id = identity(Some("b@x.com"), json!({}));
    let decision = evaluate_access(Some("a@x.com, B@X.com"), Some(&id));
    assert_eq!(
        decision,
        AccessDecision::Authorized {
            email: "b@x.com".to_string()
        }
    );
}

#[test]
fn unset_allowlist_denies_everyone_as_not_configured() {
    let id = identity(Some("admin@example.com"), json!({}));
    for configured in [None, Some(""), Some(",,,"), Some("   ")] {
        assert_eq!(
            evaluate_access(configured, Some(&id)),
            AccessDecision::Unauthorized {
                reason: DenyReason::NotConfigured
            }
        );
        assert_eq!(
            evaluate_access(configured, None),
            AccessDecision::Unauthorized {
                reason: DenyReason::NotConfigured
            }
        );
    }
}

#[test]
fn guard_blocks_every_unauthorized_shape_before_any_write() {
    // No identity at all.
    let err = require_access(Some("admin@example.com"), None).unwrap_err();
    assert_eq!(err.reason(), DenyReason::NotAuthenticated);

    // Authenticated identity without any email claim.
    let id = identity(None, json!({ "name": "Anon" }));
    let err = require_access(Some("admin@example.com"), Some(&id)).unwrap_err();
    assert_eq!(err.reason(), DenyReason::NoEmail);

    // Authenticated identity with a non-admin email.
    let id = identity(Some("student@example.com"), json!({}));
    let err = require_access(Some("admin@example.com"), Some(&id)).unwrap_err();
    assert_eq!(err.reason(), DenyReason::NotAllowlisted);
}

#[test]
fn guard_accepts_email_from_nested_claims() {
    let id = identity(None, json!({ "primaryEmail": "Board@Assoc.org" }));
    let email = require_access(Some("board@assoc.org"), Some(&id)).unwrap();
    assert_eq!(email, "board@assoc.org");
}

#[test]
fn decision_serializes_with_snake_case_reason() {
    let decision = evaluate_access(None, None);
    let body = serde_json::to_value(&decision).unwrap();
    assert_eq!(
        body,
        json!({ "status": "unauthorized", "reason": "not_configured" })
    );

    let id = identity(Some("b@x.com"), json!({}));
    let decision = evaluate_access(Some("b@x.com"), Some(&id));
    let body = serde_json::to_value(&decision).unwrap();
    assert_eq!(body, json!({ "status": "authorized", "email": "b@x.com" }));
}
