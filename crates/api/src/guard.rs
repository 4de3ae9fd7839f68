//! Route guard: authentication extractor and permission layer
//!
//! The guard composes identity resolution and permission evaluation in
//! front of a protected handler. It holds no state of its own; everything
//! is rebuilt per request from the injected resolver.
//!
//! # Usage
//!
//! ```ignore
//! use lattice_api::{Guard, RouterExt, require_permission};
//!
//! // Handler receives the resolved principal
//! async fn create_article(Guard(principal): Guard) -> impl IntoResponse { }
//!
//! Router::new()
//!     .route("/articles", post(create_article))
//!     .route_layer(require_permission(resolver.clone(), "content.create"))
//! ```

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    Json, Router,
    extract::{FromRequestParts, Request},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use futures_util::future::BoxFuture;
use tower::{Layer, Service};
use tracing::debug;

use lattice_auth::{AuthError, IdentityResolver, Permission, Principal};

use crate::state::HasResolver;

/// Maximum accepted token size (8KB) - oversized headers are treated as
/// missing rather than parsed
const MAX_TOKEN_SIZE: usize = 8 * 1024;

/// Error returned when the guard rejects a request
#[derive(Debug)]
pub enum GuardError {
    /// No `Authorization: Bearer <token>` header
    MissingToken,
    /// Token failed verification, or the identity it names is gone
    InvalidToken,
    /// Principal resolved but lacks the required permission
    PermissionDenied(String),
}

impl GuardError {
    fn status(&self) -> StatusCode {
        match self {
            Self::MissingToken | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::PermissionDenied(_) => StatusCode::FORBIDDEN,
        }
    }
}

impl From<AuthError> for GuardError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingToken => Self::MissingToken,
            // PrincipalNotFound deliberately collapses into the generic
            // invalid-token answer: a 403 here would reveal that the token
            // was once valid.
            _ => Self::InvalidToken,
        }
    }
}

impl IntoResponse for GuardError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::MissingToken => "Access token required".to_string(),
            Self::InvalidToken => "Invalid or expired token".to_string(),
            Self::PermissionDenied(permission) => {
                format!("Insufficient permission: {permission}")
            }
        };

        debug!(status = %status, %message, "request rejected by guard");

        let body = serde_json::json!({ "error": message });
        (status, Json(body)).into_response()
    }
}

/// Extract the bearer token from the `Authorization` header
///
/// The back-office client sends tokens only here; there is no query or
/// cookie fallback. Oversized or malformed headers read as missing.
fn bearer_token(headers: &axum::http::HeaderMap) -> Option<&str> {
    let header = headers.get(AUTHORIZATION)?;
    if header.len() > MAX_TOKEN_SIZE + "Bearer ".len() {
        return None;
    }
    let token = header.to_str().ok()?.strip_prefix("Bearer ")?;
    if token.is_empty() { None } else { Some(token) }
}

/// Authenticated principal extractor
///
/// Resolves the bearer token to a [`Principal`], or short-circuits with
/// 401. When a [`require_permission`] layer already ran for this request,
/// the principal it resolved is reused instead of resolving twice.
#[derive(Debug, Clone)]
pub struct Guard(pub Principal);

impl std::ops::Deref for Guard {
    type Target = Principal;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for Guard
where
    S: HasResolver,
{
    type Rejection = GuardError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(principal) = parts.extensions.get::<Principal>() {
            return Ok(Guard(principal.clone()));
        }

        let token = bearer_token(&parts.headers).ok_or(GuardError::MissingToken)?;
        let principal = state.resolver().resolve(token).await?;
        Ok(Guard(principal))
    }
}

/// Layer that gates routes behind a required permission
#[derive(Clone)]
pub struct RequirePermissionLayer {
    resolver: Arc<IdentityResolver>,
    permission: Permission,
}

impl RequirePermissionLayer {
    /// Create a layer for one required permission
    pub fn new(resolver: Arc<IdentityResolver>, permission: impl Into<Permission>) -> Self {
        Self {
            resolver,
            permission: permission.into(),
        }
    }
}

impl<S> Layer<S> for RequirePermissionLayer {
    type Service = RequirePermissionService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequirePermissionService {
            inner,
            resolver: self.resolver.clone(),
            permission: self.permission.clone(),
        }
    }
}

/// Service that resolves and evaluates the principal before forwarding
///
/// On allow, the principal is stored in the request extensions so the
/// handler (via [`Guard`]) and any audit logging can read the acting
/// identity. On deny, the inner service is never called.
#[derive(Clone)]
pub struct RequirePermissionService<S> {
    inner: S,
    resolver: Arc<IdentityResolver>,
    permission: Permission,
}

impl<S> Service<Request> for RequirePermissionService<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let resolver = self.resolver.clone();
        let permission = self.permission.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let token = match bearer_token(req.headers()) {
                Some(t) => t.to_string(),
                None => return Ok(GuardError::MissingToken.into_response()),
            };

            let principal = match resolver.resolve(&token).await {
                Ok(principal) => principal,
                Err(e) => return Ok(GuardError::from(e).into_response()),
            };

            if !principal.can(&permission) {
                debug!(
                    subject = %principal.subject_id(),
                    origin = %principal.origin(),
                    permission = %permission,
                    "permission denied"
                );
                return Ok(
                    GuardError::PermissionDenied(permission.as_str().to_string()).into_response(),
                );
            }

            req.extensions_mut().insert(principal);
            inner.call(req).await
        })
    }
}

/// Create a permission layer
///
/// # Example
///
/// ```ignore
/// Router::new()
///     .route("/articles", post(create_article))
///     .route_layer(require_permission(resolver, "content.create"))
/// ```
pub fn require_permission(
    resolver: Arc<IdentityResolver>,
    permission: impl Into<Permission>,
) -> RequirePermissionLayer {
    RequirePermissionLayer::new(resolver, permission)
}

/// Extension trait for Router with permission helpers
pub trait RouterExt<S> {
    /// Require a permission for all routes in this router
    ///
    /// # Example
    ///
    /// ```ignore
    /// Router::new()
    ///     .route("/users", get(list_users).post(create_user))
    ///     .with_permission(resolver, "user.manage")
    /// ```
    fn with_permission(
        self,
        resolver: Arc<IdentityResolver>,
        permission: impl Into<Permission>,
    ) -> Self;
}

impl<S> RouterExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_permission(
        self,
        resolver: Arc<IdentityResolver>,
        permission: impl Into<Permission>,
    ) -> Self {
        self.route_layer(RequirePermissionLayer::new(resolver, permission))
    }
}
