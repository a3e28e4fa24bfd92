use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use onlearn_core::AppError;
use onlearn_models::{CreateLessonDto, Lesson, LessonResponse, MessageResponse, UpdateLessonDto};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthContext;
use crate::modules::lessons::service::LessonService;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

#[utoipa::path(
    get,
    path = "/api/courses/{id}/lessons",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Lessons ordered by order_index", body = Vec<Lesson>)
    ),
    tag = "Lessons"
)]
#[instrument(skip(state))]
pub async fn list_lessons(
    State(state): State<AppState>,
    ValidatedPath(course_id): ValidatedPath<Uuid>,
) -> Result<Json<Vec<Lesson>>, AppError> {
    let lessons = LessonService::list_lessons(&state.db, course_id).await?;
    Ok(Json(lessons))
}

#[utoipa::path(
    post,
    path = "/api/courses/{id}/lessons",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    request_body = CreateLessonDto,
    responses(
        (status = 201, description = "Lesson created", body = LessonResponse),
        (status = 400, description = "Missing title", body = onlearn_core::ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the course owner"),
        (status = 404, description = "Course not found")
    ),
    tag = "Lessons",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_lesson(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedPath(course_id): ValidatedPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreateLessonDto>,
) -> Result<(StatusCode, Json<LessonResponse>), AppError> {
    let lesson = LessonService::create_lesson(&state.db, &auth, course_id, dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(LessonResponse {
            message: "Lesson created".to_string(),
            data: lesson,
        }),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/courses/{id}/lessons/{lesson_id}",
    params(
        ("id" = Uuid, Path, description = "Course ID"),
        ("lesson_id" = Uuid, Path, description = "Lesson ID")
    ),
    request_body = UpdateLessonDto,
    responses(
        (status = 200, description = "Lesson updated", body = LessonResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the course owner"),
        (status = 404, description = "Course or lesson not found")
    ),
    tag = "Lessons",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_lesson(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedPath((course_id, lesson_id)): ValidatedPath<(Uuid, Uuid)>,
    ValidatedJson(dto): ValidatedJson<UpdateLessonDto>,
) -> Result<Json<LessonResponse>, AppError> {
    let lesson =
        LessonService::update_lesson(&state.db, &auth, course_id, lesson_id, dto).await?;

    Ok(Json(LessonResponse {
        message: "Lesson updated".to_string(),
        data: lesson,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/courses/{id}/lessons/{lesson_id}",
    params(
        ("id" = Uuid, Path, description = "Course ID"),
        ("lesson_id" = Uuid, Path, description = "Lesson ID")
    ),
    responses(
        (status = 200, description = "Lesson deleted (or already absent)", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the course owner"),
        (status = 404, description = "Course not found")
    ),
    tag = "Lessons",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_lesson(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedPath((course_id, lesson_id)): ValidatedPath<(Uuid, Uuid)>,
) -> Result<Json<MessageResponse>, AppError> {
    LessonService::delete_lesson(&state.db, &auth, course_id, lesson_id).await?;
    Ok(Json(MessageResponse::new("Lesson deleted")))
}
