//! Session and Authorization Guard
//!
//! This module provides the client-side session infrastructure for Murmur:
//! token storage, unverified claim decoding, session-state derivation, and
//! route-level authorization decisions.
//!
//! # Module Structure
//!
//! - [`auth::store`](crate::auth::store) - single-slot bearer token storage
//! - [`auth::codec`](crate::auth::codec) - JWT payload decoding (no signature check)
//! - [`auth::session`](crate::auth::session) - session state from token + clock
//! - [`auth::routes`](crate::auth::routes) - navigation gating decisions
//!
//! # Design
//!
//! - **Injected storage**: the token slot is a service instance handed to
//!   the guard and the API client, never a process global. Tests reset by
//!   constructing a fresh store.
//! - **Fail closed**: a token without a usable numeric `exp` claim is
//!   treated as expired, never as "valid forever". `exp == now` is expired.
//! - **Self-healing**: an undecodable token is removed from storage the
//!   moment a guard evaluation sees it.
//! - **Local decisions**: guards never await the network; a navigation
//!   decision is a pure function of the stored token and the clock.
//!
//! # Usage
//!
//! ```ignore
//! use murmur::auth::routes::{AccessDecision, RouteAuthorizer};
//! use murmur::auth::session::SessionGuard;
//! use murmur::auth::store::MemoryTokenStore;
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemoryTokenStore::new());
//! let authorizer = RouteAuthorizer::new(SessionGuard::new(store));
//!
//! match authorizer.authorize_protected(Some(&["admin"])) {
//!     AccessDecision::Allow => { /* render */ }
//!     AccessDecision::Redirect(route) => { /* navigate to route.as_path() */ }
//! }
//! ```

/// JWT payload decoding without signature verification.
pub mod codec;
/// Navigation gating decisions for protected and auth-only views.
pub mod routes;
/// Session state derivation from the stored token and the clock.
pub mod session;
/// Single-slot bearer token storage backends.
pub mod store;
