//! End-to-end guard scenarios over the public API
//!
//! These exercise the token store, codec, session guard, and route
//! authorizer together, with real HS256-signed tokens and a pinned clock.
//! Storage mutations performed by the guards (purging undecodable or
//! expired tokens) are asserted explicitly: they are documented cleanup
//! side effects, not incidental behavior.

use murmur::{
    AccessDecision, Clock, MemoryTokenStore, Route, RouteAuthorizer, SessionGuard, SessionState,
    TokenStore,
};
use std::sync::Arc;

// ============= Helper Functions =============

struct FixedClock(i64);

impl Clock for FixedClock {
    fn now_unix(&self) -> i64 {
        self.0
    }
}

const NOW: i64 = 1_770_000_000;

/// Mint a real HS256-signed token with the given role and expiry.
fn signed_token(role: &str, exp: i64) -> String {
    let claims = serde_json::json!({
        "sub": "7a4fbdfa-3e07-4f2a-9d6e-0c55aa7b3c11",
        "role": role,
        "exp": exp,
    });
    jsonwebtoken::encode(
        &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(b"guard-test-secret-32-characters!!"),
    )
    .expect("should mint token")
}

fn fixture() -> (RouteAuthorizer, SessionGuard, Arc<MemoryTokenStore>) {
    let store = Arc::new(MemoryTokenStore::new());
    let guard = SessionGuard::with_clock(store.clone(), Arc::new(FixedClock(NOW)));
    (RouteAuthorizer::new(guard.clone()), guard, store)
}

// ============= Contract Scenarios =============

#[test]
fn scenario_malformed_token_on_auth_view() {
    // set("a.b.c") then NoAuthRoute: renders auth content AND the bad
    // token is gone from storage
    let (authorizer, _, store) = fixture();
    store.set("a.b.c");

    assert_eq!(authorizer.authorize_no_auth(), AccessDecision::Allow);
    assert_eq!(store.get(), None);
}

#[test]
fn scenario_role_mismatch_redirects_keeping_token() {
    // Valid user-role token against an admin-only view: redirect to the
    // dashboard, token untouched
    let (authorizer, _, store) = fixture();
    let token = signed_token("user", NOW + 3600);
    store.set(&token);

    assert_eq!(
        authorizer.authorize_protected(Some(&["admin"])),
        AccessDecision::Redirect(Route::Dashboard)
    );
    assert_eq!(store.get(), Some(token));
}

#[test]
fn scenario_expired_token_on_auth_view() {
    // Expired token then NoAuthRoute: auth content renders, token removed
    let (authorizer, _, store) = fixture();
    store.set(&signed_token("user", NOW - 10));

    assert_eq!(authorizer.authorize_no_auth(), AccessDecision::Allow);
    assert_eq!(store.get(), None);
}

#[test]
fn scenario_no_token_on_protected_view() {
    let (authorizer, _, _) = fixture();
    assert_eq!(
        authorizer.authorize_protected(None),
        AccessDecision::Redirect(Route::Home)
    );
}

// ============= Expiry Semantics =============

#[test]
fn test_expiry_boundary_is_strict() {
    let (_, guard, store) = fixture();

    store.set(&signed_token("user", NOW + 1));
    assert!(matches!(guard.evaluate(), SessionState::Valid { .. }));

    store.set(&signed_token("user", NOW));
    assert!(matches!(guard.evaluate(), SessionState::Expired { .. }));

    store.set(&signed_token("user", NOW - 1));
    assert!(matches!(guard.evaluate(), SessionState::Expired { .. }));
}

#[test]
fn test_token_without_exp_never_authorizes() {
    let (authorizer, guard, store) = fixture();
    let claims = serde_json::json!({"sub": "u", "role": "admin"});
    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(b"guard-test-secret-32-characters!!"),
    )
    .expect("should mint token");
    store.set(&token);

    assert!(matches!(guard.evaluate(), SessionState::Expired { .. }));
    assert_eq!(
        authorizer.authorize_protected(Some(&["admin"])),
        AccessDecision::Redirect(Route::Home)
    );
}

#[test]
fn test_valid_admin_session_reaches_admin_view() {
    let (authorizer, guard, store) = fixture();
    store.set(&signed_token("admin", NOW + 600));

    assert_eq!(guard.role(), Some("admin".to_string()));
    assert_eq!(
        authorizer.authorize_protected(Some(&["admin"])),
        AccessDecision::Allow
    );
    assert_eq!(
        authorizer.authorize_no_auth(),
        AccessDecision::Redirect(Route::Dashboard)
    );
}

// ============= Session Lifecycle =============

#[test]
fn test_login_replaces_previous_session() {
    let (_, guard, store) = fixture();
    store.set(&signed_token("user", NOW - 100));
    store.set(&signed_token("admin", NOW + 100));

    // Only the newest token counts; there is no multi-session
    assert_eq!(guard.role(), Some("admin".to_string()));
}

#[test]
fn test_logout_is_idempotent_and_total() {
    let (authorizer, guard, store) = fixture();
    store.set(&signed_token("user", NOW + 100));

    guard.purge();
    guard.purge();

    assert_eq!(store.get(), None);
    assert_eq!(guard.evaluate(), SessionState::NoSession);
    assert_eq!(
        authorizer.authorize_protected(None),
        AccessDecision::Redirect(Route::Home)
    );
}

#[test]
fn test_decision_recomputed_after_external_store_change() {
    // No caching: a store mutation between evaluations is observed, the
    // way a 401-triggered purge must be
    let (authorizer, _, store) = fixture();
    store.set(&signed_token("user", NOW + 100));
    assert_eq!(authorizer.authorize_protected(None), AccessDecision::Allow);

    store.remove();
    assert_eq!(
        authorizer.authorize_protected(None),
        AccessDecision::Redirect(Route::Home)
    );
}
