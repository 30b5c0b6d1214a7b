//! Route-level authorization decisions.
//!
//! The guards are pure decision functions: they inspect session state and
//! return [`AccessDecision`], leaving it to the view layer to interpret a
//! redirect. No network round-trip is ever involved, so a navigation
//! decision is independent of backend availability.

use crate::auth::session::{SessionGuard, SessionState};

/// The application's navigable views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Dashboard,
    Profile,
    Admin,
}

impl Route {
    /// The path the view layer navigates to for this route.
    pub fn as_path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::Profile => "/profile",
            Route::Admin => "/admin",
        }
    }
}

/// What the view layer should do with the current navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Render the requested content.
    Allow,
    /// Navigate to `Route` instead of rendering.
    Redirect(Route),
}

/// Gate for navigation, combining the two guard variants over one
/// [`SessionGuard`].
///
/// Both variants check expiry. The original frontend only enforced `exp`
/// on the auth-only views and admitted any decodable token to protected
/// ones; that divergence was unintentional and is unified here to the
/// strict policy.
#[derive(Clone)]
pub struct RouteAuthorizer {
    guard: SessionGuard,
}

impl RouteAuthorizer {
    pub fn new(guard: SessionGuard) -> Self {
        Self { guard }
    }

    /// Guard for protected views.
    ///
    /// Unauthenticated (or expired, after purging the stale token) users
    /// are sent to the landing page. When `allowed_roles` is given, a
    /// valid session whose role is not in the set is silently sent to the
    /// dashboard: a UX downgrade, not an error, and the token stays put.
    pub fn authorize_protected(&self, allowed_roles: Option<&[&str]>) -> AccessDecision {
        match self.guard.evaluate() {
            SessionState::NoSession => AccessDecision::Redirect(Route::Home),
            SessionState::Expired { .. } => {
                self.guard.purge();
                AccessDecision::Redirect(Route::Home)
            }
            SessionState::Valid { claims } => match allowed_roles {
                None => AccessDecision::Allow,
                Some(roles) => match claims.role.as_deref() {
                    Some(role) if roles.contains(&role) => AccessDecision::Allow,
                    _ => {
                        tracing::debug!("Role not permitted here, redirecting to dashboard");
                        AccessDecision::Redirect(Route::Dashboard)
                    }
                },
            },
        }
    }

    /// Guard for auth-only views (login, registration).
    ///
    /// A live session has no business on these pages and is redirected to
    /// the dashboard. An expired token is purged and the view renders.
    pub fn authorize_no_auth(&self) -> AccessDecision {
        match self.guard.evaluate() {
            SessionState::Valid { .. } => AccessDecision::Redirect(Route::Dashboard),
            SessionState::Expired { .. } => {
                self.guard.purge();
                AccessDecision::Allow
            }
            SessionState::NoSession => AccessDecision::Allow,
        }
    }
}
