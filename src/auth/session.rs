//! Session state derived from the stored token and the wall clock.

use crate::auth::codec;
use crate::auth::store::TokenStore;
use crate::types::Claims;
use chrono::Utc;
use std::sync::Arc;

/// Source of "now" for expiry checks. Production uses [`SystemClock`];
/// tests pin a fixed instant to exercise the boundary cases.
pub trait Clock: Send + Sync {
    /// Current time in seconds since the Unix epoch.
    fn now_unix(&self) -> i64;
}

/// Wall clock backed by `chrono::Utc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Outcome of one guard evaluation. Never cached; the clock advances, so
/// every evaluation re-reads the store and recomputes.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// No token stored (or the stored token was undecodable and has been
    /// purged).
    NoSession,
    /// Token present, decodable, and not yet expired.
    Valid { claims: Claims },
    /// Token present and decodable, but its `exp` is missing, non-numeric,
    /// or in the past. Absence of an expiry never means "valid forever".
    Expired { claims: Claims },
}

/// Evaluates the stored token into a [`SessionState`].
///
/// The guard owns the one mutation it is allowed: an undecodable token is
/// removed on sight so it cannot sit in storage poisoning every later
/// evaluation. Expired tokens are left in place here; purging on observed
/// expiry is the route layer's call.
#[derive(Clone)]
pub struct SessionGuard {
    store: Arc<dyn TokenStore>,
    clock: Arc<dyn Clock>,
}

impl SessionGuard {
    /// Creates a guard over `store` using the system clock.
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    /// Creates a guard with an explicit clock.
    pub fn with_clock(store: Arc<dyn TokenStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Derives the current session state from the stored token and `now`.
    pub fn evaluate(&self) -> SessionState {
        let Some(token) = self.store.get() else {
            return SessionState::NoSession;
        };

        let claims = match codec::decode(&token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::warn!("Removing undecodable session token: {}", e);
                self.store.remove();
                return SessionState::NoSession;
            }
        };

        match claims.expires_at() {
            // Strictly greater: a token expiring exactly now is expired.
            Some(exp) if exp > self.clock.now_unix() => SessionState::Valid { claims },
            _ => SessionState::Expired { claims },
        }
    }

    /// The `role` claim of a valid session, else `None`.
    pub fn role(&self) -> Option<String> {
        match self.evaluate() {
            SessionState::Valid { claims } => claims.role,
            _ => None,
        }
    }

    /// Whether a decodable token is stored.
    ///
    /// Deliberately weaker than [`SessionState::Valid`]: expiry is not
    /// checked. This matches the navbar-style "is someone logged in at
    /// all" check; use [`SessionGuard::evaluate`] for access decisions.
    pub fn is_authenticated(&self) -> bool {
        !matches!(self.evaluate(), SessionState::NoSession)
    }

    /// Removes the stored token, ending the session.
    pub fn purge(&self) {
        self.store.remove();
    }

    /// The store this guard evaluates against.
    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::store::{MemoryTokenStore, TokenStore};
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine as _;

    struct FixedClock(i64);

    impl Clock for FixedClock {
        fn now_unix(&self) -> i64 {
            self.0
        }
    }

    const NOW: i64 = 1_800_000_000;

    fn guard_with_token(payload: Option<&serde_json::Value>) -> (SessionGuard, Arc<MemoryTokenStore>) {
        let store = Arc::new(MemoryTokenStore::new());
        if let Some(payload) = payload {
            let body = URL_SAFE_NO_PAD.encode(serde_json::to_vec(payload).expect("serialize"));
            store.set(&format!("h.{}.s", body));
        }
        let guard = SessionGuard::with_clock(store.clone(), Arc::new(FixedClock(NOW)));
        (guard, store)
    }

    #[test]
    fn test_no_token_is_no_session() {
        let (guard, _) = guard_with_token(None);
        assert_eq!(guard.evaluate(), SessionState::NoSession);
        assert!(!guard.is_authenticated());
        assert_eq!(guard.role(), None);
    }

    #[test]
    fn test_future_exp_is_valid() {
        let (guard, _) =
            guard_with_token(Some(&serde_json::json!({"role": "user", "exp": NOW + 3600})));

        match guard.evaluate() {
            SessionState::Valid { claims } => assert_eq!(claims.role.as_deref(), Some("user")),
            other => panic!("expected Valid, got {:?}", other),
        }
        assert_eq!(guard.role(), Some("user".to_string()));
    }

    #[test]
    fn test_exp_equal_to_now_is_expired() {
        let (guard, _) = guard_with_token(Some(&serde_json::json!({"exp": NOW})));
        assert!(matches!(guard.evaluate(), SessionState::Expired { .. }));
    }

    #[test]
    fn test_past_exp_is_expired() {
        let (guard, store) = guard_with_token(Some(&serde_json::json!({"exp": NOW - 10})));
        assert!(matches!(guard.evaluate(), SessionState::Expired { .. }));
        // Expiry alone does not purge; that is the route layer's job
        assert!(store.get().is_some());
    }

    #[test]
    fn test_missing_exp_fails_closed() {
        let (guard, _) = guard_with_token(Some(&serde_json::json!({"role": "admin"})));
        assert!(matches!(guard.evaluate(), SessionState::Expired { .. }));
        assert_eq!(guard.role(), None);
    }

    #[test]
    fn test_non_numeric_exp_fails_closed() {
        let (guard, _) = guard_with_token(Some(&serde_json::json!({"exp": "never"})));
        assert!(matches!(guard.evaluate(), SessionState::Expired { .. }));
    }

    #[test]
    fn test_undecodable_token_is_purged() {
        let store = Arc::new(MemoryTokenStore::new());
        store.set("a.b.c");
        let guard = SessionGuard::with_clock(store.clone(), Arc::new(FixedClock(NOW)));

        assert_eq!(guard.evaluate(), SessionState::NoSession);
        // Self-healing: the bad token must not remain in storage
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_is_authenticated_ignores_expiry() {
        let (guard, _) = guard_with_token(Some(&serde_json::json!({"exp": NOW - 100})));
        // Weaker existence check: decodable but expired still counts
        assert!(guard.is_authenticated());
    }

    #[test]
    fn test_purge_ends_session() {
        let (guard, store) =
            guard_with_token(Some(&serde_json::json!({"role": "user", "exp": NOW + 60})));
        guard.purge();

        assert_eq!(store.get(), None);
        assert_eq!(guard.evaluate(), SessionState::NoSession);
    }
}
