use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use onlearn_core::AppError;
use onlearn_models::{
    EnrollDto, EnrollmentResponse, EnrollmentWithCourse, ProgressResponse, UpdateProgressDto,
};
use tracing::instrument;
use uuid::Uuid;

use crate::metrics::track_enrollment_created;
use crate::middleware::auth::AuthContext;
use crate::modules::enrollments::service::{EnrollOutcome, EnrollmentService};
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

#[utoipa::path(
    get,
    path = "/api/enrollments/me",
    responses(
        (status = 200, description = "The caller's enrollments with course summaries", body = Vec<EnrollmentWithCourse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_my_enrollments(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<Vec<EnrollmentWithCourse>>, AppError> {
    let enrollments = EnrollmentService::list_for_user(&state.db, auth.user_id()).await?;
    Ok(Json(enrollments))
}

#[utoipa::path(
    post,
    path = "/api/enrollments",
    request_body = EnrollDto,
    responses(
        (status = 201, description = "Enrolled", body = EnrollmentResponse),
        (status = 200, description = "Already enrolled; existing enrollment returned", body = EnrollmentResponse),
        (status = 400, description = "Missing course_id", body = onlearn_core::ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Course not found")
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn enroll(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedJson(dto): ValidatedJson<EnrollDto>,
) -> Result<(StatusCode, Json<EnrollmentResponse>), AppError> {
    let course_id = dto
        .course_id
        .ok_or_else(|| AppError::bad_request("course_id is required"))?;

    let outcome = EnrollmentService::enroll(&state.db, auth.user_id(), course_id).await?;

    let response = match outcome {
        EnrollOutcome::Created(enrollment) => {
            track_enrollment_created();
            (
                StatusCode::CREATED,
                Json(EnrollmentResponse {
                    message: "Enrollment created".to_string(),
                    data: enrollment,
                }),
            )
        }
        EnrollOutcome::AlreadyEnrolled(enrollment) => (
            StatusCode::OK,
            Json(EnrollmentResponse {
                message: "Already enrolled in this course".to_string(),
                data: enrollment,
            }),
        ),
    };

    Ok(response)
}

#[utoipa::path(
    patch,
    path = "/api/enrollments/{course_id}/progress",
    params(
        ("course_id" = Uuid, Path, description = "Course ID")
    ),
    request_body = UpdateProgressDto,
    responses(
        (status = 200, description = "Progress updated", body = ProgressResponse),
        (status = 400, description = "Missing or out-of-range progress", body = onlearn_core::ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not enrolled in this course")
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_progress(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedPath(course_id): ValidatedPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateProgressDto>,
) -> Result<Json<ProgressResponse>, AppError> {
    let progress = dto
        .progress
        .ok_or_else(|| AppError::bad_request("progress is required"))?;

    let progress =
        EnrollmentService::update_progress(&state.db, auth.user_id(), course_id, progress).await?;

    Ok(Json(ProgressResponse {
        message: "Progress updated".to_string(),
        progress,
    }))
}
