//! # Murmur Client Core
//!
//! The client-side core of the Murmur messaging application: session and
//! token handling, route authorization decisions, and a typed HTTP client
//! for the Murmur user service.
//!
//! ## Overview
//!
//! The view layer (pages, components, navigation) lives outside this crate.
//! What lives here is everything with a contract:
//!
//! - a single-slot bearer **token store**, injected rather than global
//! - a **token codec** that decodes JWT claims without verifying signatures
//!   (authenticity is the issuing server's job)
//! - a **session guard** deriving `NoSession` / `Valid` / `Expired` from
//!   the stored token and the clock, failing closed on missing expiry
//! - a **route authorizer** returning pure allow/redirect decisions for
//!   protected and auth-only views
//! - an **API client** that attaches the bearer token to every request and
//!   clears the store when the backend answers 401
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use murmur::{ApiClient, Config, MemoryTokenStore, RouteAuthorizer, SessionGuard, UserApi};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> murmur::Result<()> {
//!     let config = Config::from_env();
//!     let store = Arc::new(MemoryTokenStore::new());
//!
//!     let users = UserApi::new(ApiClient::from_config(&config, store.clone()));
//!     let tokens = users.login("alice", "correct horse").await?;
//!     store.set(&tokens.access_token);
//!
//!     let authorizer = RouteAuthorizer::new(SessionGuard::new(store));
//!     match authorizer.authorize_protected(Some(&["admin"])) {
//!         murmur::AccessDecision::Allow => { /* render the admin view */ }
//!         murmur::AccessDecision::Redirect(route) => {
//!             println!("go to {}", route.as_path());
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`auth`] - token storage, claim decoding, session guard, route guards
//! - [`api`] - authenticated HTTP client and typed user-service endpoints
//! - [`types`] - claims, DTOs, and error handling
//! - [`utils`] - environment configuration

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// Authenticated HTTP client and typed user-service endpoints.
pub mod api;
/// Session, token, and route authorization infrastructure.
pub mod auth;
/// Core types (claims, DTOs, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use api::{ApiClient, UserApi};
pub use auth::codec::DecodeError;
pub use auth::routes::{AccessDecision, Route, RouteAuthorizer};
pub use auth::session::{Clock, SessionGuard, SessionState, SystemClock};
pub use auth::store::{FileTokenStore, MemoryTokenStore, TokenStore, TOKEN_STORAGE_KEY};
pub use types::{AppError, Claims, Result, UserRole};
pub use utils::config::Config;
