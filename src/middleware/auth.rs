use axum::{
    extract::{FromRequestParts, MatchedPath, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use onlearn_auth::{Identity, extract_bearer_token};
use onlearn_core::AppError;
use onlearn_models::{Profile, Role};
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::metrics::track_auth_failure;
use crate::middleware::role::{Access, check_role, policy_for};
use crate::state::AppState;

/// Result of the authentication pipeline for the current request.
///
/// `profile` is `None` when the caller has no profile row yet or it could
/// not be loaded.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub identity: Identity,
    pub profile: Option<Profile>,
}

impl AuthContext {
    pub fn user_id(&self) -> Uuid {
        self.identity.id
    }

    pub fn role(&self) -> Option<Role> {
        self.profile.as_ref().and_then(|p| p.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }

    pub fn is_instructor(&self) -> bool {
        self.role() == Some(Role::Instructor)
    }
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("missing token"))
    }
}

/// Verify the bearer token in `headers` with the identity provider.
pub async fn verify_credentials(state: &AppState, headers: &HeaderMap) -> Result<Identity, AppError> {
    let header_value = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let token = extract_bearer_token(header_value).map_err(|e| {
        track_auth_failure("missing_token");
        AppError::unauthorized(e.to_string())
    })?;

    state.identity.verify(token).await.map_err(|e| {
        warn!(error = %e, "Token verification failed");
        track_auth_failure("invalid_token");
        AppError::unauthorized("invalid or expired token")
    })
}

/// Load the profile of an authenticated identity.
///
/// Lookup failures are logged and yield `None`; the role gate turns that
/// into a 403 on routes that need a role.
pub async fn resolve_profile(db: &PgPool, identity: &Identity) -> Option<Profile> {
    let result = sqlx::query_as::<_, Profile>(
        "SELECT id, full_name, email, role, created_at FROM profiles WHERE id = $1",
    )
    .bind(identity.id)
    .fetch_optional(db)
    .await;

    match result {
        Ok(Some(profile)) => Some(profile),
        Ok(None) => {
            warn!(user_id = %identity.id, "No profile for authenticated user");
            None
        }
        Err(e) => {
            warn!(user_id = %identity.id, error = %e, "Failed to load profile");
            None
        }
    }
}

/// Run the route's policy once, before the handler.
///
/// Installed with `route_layer` so the matched route pattern is available.
pub async fn authorize(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned());

    let access = policy_for(req.method(), path.as_deref());
    if access == Access::Public {
        return next.run(req).await;
    }

    let identity = match verify_credentials(&state, req.headers()).await {
        Ok(identity) => identity,
        Err(e) => return e.into_response(),
    };

    let profile = resolve_profile(&state.db, &identity).await;

    if let Access::Roles(allowed) = access
        && let Err(e) = check_role(profile.as_ref(), allowed)
    {
        track_auth_failure("forbidden");
        return e.into_response();
    }

    req.extensions_mut()
        .insert(AuthContext { identity, profile });

    next.run(req).await
}
