use axum::{Json, extract::State};
use onlearn_core::AppError;
use onlearn_models::{MessageResponse, Profile, ProfileResponse, Role};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::middleware::auth::AuthContext;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::ValidatedPath;

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All profiles, newest first", body = Vec<Profile>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires admin")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<Profile>>, AppError> {
    let users = UserService::list_users(&state.db).await?;
    Ok(Json(users))
}

#[utoipa::path(
    get,
    path = "/api/users/pending-teachers",
    responses(
        (status = 200, description = "Profiles waiting for instructor approval", body = Vec<Profile>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires admin")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_pending_teachers(
    State(state): State<AppState>,
) -> Result<Json<Vec<Profile>>, AppError> {
    let users = UserService::list_by_role(&state.db, Role::PendingInstructor).await?;
    Ok(Json(users))
}

#[utoipa::path(
    patch,
    path = "/api/users/approve-teacher/{id}",
    params(
        ("id" = Uuid, Path, description = "Profile ID")
    ),
    responses(
        (status = 200, description = "Role set to instructor", body = ProfileResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires admin"),
        (status = 404, description = "User not found")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn approve_teacher(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = UserService::set_role(&state.db, id, Role::Instructor).await?;

    Ok(Json(ProfileResponse {
        message: "Teacher approved".to_string(),
        data: profile,
    }))
}

#[utoipa::path(
    patch,
    path = "/api/users/reject-teacher/{id}",
    params(
        ("id" = Uuid, Path, description = "Profile ID")
    ),
    responses(
        (status = 200, description = "Role set back to client", body = ProfileResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires admin"),
        (status = 404, description = "User not found")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn reject_teacher(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = UserService::set_role(&state.db, id, Role::Client).await?;

    Ok(Json(ProfileResponse {
        message: "Teacher request rejected".to_string(),
        data: profile,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(
        ("id" = Uuid, Path, description = "Profile ID")
    ),
    responses(
        (status = 200, description = "User, their courses and enrollments deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires admin, or deleting yourself"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Identity provider failed after the data was removed", body = onlearn_core::ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    if id == auth.user_id() {
        return Err(AppError::forbidden("Admins cannot delete their own account"));
    }

    if !UserService::delete_user_data(&state.db, id).await? {
        return Err(AppError::not_found("User not found"));
    }

    state
        .identity
        .delete_identity(id)
        .await
        .map_err(AppError::upstream)?;

    info!(user_id = %id, deleted_by = %auth.user_id(), "User deleted");

    Ok(Json(MessageResponse::new("User deleted")))
}
