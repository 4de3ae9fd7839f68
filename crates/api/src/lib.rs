//! Lattice - API guard
//!
//! Axum middleware that gates back-office routes behind identity resolution
//! and permission evaluation. Route bodies (article/case/form CRUD, config
//! screens) live elsewhere; they receive the resolved [`Principal`] and are
//! otherwise ordinary handlers.
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use axum::{Router, routing::post};
//! use lattice_api::{AppState, Guard, require_permission};
//!
//! async fn create_article(Guard(principal): Guard) -> impl IntoResponse {
//!     // principal is available for audit stamping
//! }
//!
//! let state = AppState::from_config(&config, store)?;
//! let resolver = state.resolver();
//!
//! let app = Router::new()
//!     .route("/api/admin/articles", post(create_article))
//!     .route_layer(require_permission(resolver, "content.create"))
//!     .with_state(state);
//! ```
//!
//! # Short-circuit responses
//!
//! - `401 {"error": "Access token required"}` - no bearer token presented
//! - `401 {"error": "Invalid or expired token"}` - verification failed or
//!   the identity no longer exists
//! - `403 {"error": "Insufficient permission: <perm>"}` - principal
//!   resolved but the evaluator denied

pub mod error;
pub mod guard;
pub mod state;

pub use error::{ApiError, Result};
pub use guard::{
    Guard, GuardError, RequirePermissionLayer, RouterExt, require_permission,
};
pub use state::{AppState, HasResolver};

// Re-export the auth types handlers work with
pub use lattice_auth::{OriginTable, Permission, Principal, Role};
