//! HTTP API Client
//!
//! This module is the network boundary of the client: a generic request
//! wrapper that injects the bearer token and reacts to authentication
//! failures, plus typed wrappers for the user-service endpoints.
//!
//! # Module Structure
//!
//! - [`api::client`](crate::api::client) - authenticated request wrapper
//! - [`api::users`](crate::api::users) - typed `/user` endpoints
//!
//! # Contract
//!
//! - A stored token is attached as `Authorization: Bearer <token>` to every
//!   request; with no token stored, requests go out unauthenticated.
//! - A 401 response clears the token store before the error propagates, so
//!   the next session-guard evaluation sees the logout. The client never
//!   redirects; the calling page owns user-visible feedback.
//! - Network failures and non-2xx responses surface as [`AppError`]
//!   (crate::types::AppError) values. One attempt per call, no retries.

/// Generic authenticated request wrapper.
pub mod client;
/// Typed user-service endpoints.
pub mod users;

pub use client::ApiClient;
pub use users::UserApi;
