use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use onlearn_core::AppError;
use onlearn_models::{
    Category, CourseFilterParams, CourseResponse, CourseStatus, CourseStatusResponse,
    CourseWithCategory, CreateCourseDto, MessageResponse, UpdateCourseDto,
};
use tracing::instrument;
use uuid::Uuid;

use crate::metrics::track_course_created;
use crate::middleware::auth::AuthContext;
use crate::modules::courses::service::CourseService;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath, ValidatedQuery};

#[utoipa::path(
    get,
    path = "/api/courses",
    params(CourseFilterParams),
    responses(
        (status = 200, description = "All courses, newest first", body = Vec<CourseWithCategory>)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn list_courses(
    State(state): State<AppState>,
    ValidatedQuery(filters): ValidatedQuery<CourseFilterParams>,
) -> Result<Json<Vec<CourseWithCategory>>, AppError> {
    let courses = CourseService::list_courses(&state.db, filters).await?;
    Ok(Json(courses))
}

#[utoipa::path(
    get,
    path = "/api/courses/published",
    responses(
        (status = 200, description = "Published courses, newest first", body = Vec<CourseWithCategory>)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn list_published_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseWithCategory>>, AppError> {
    let courses = CourseService::list_published(&state.db).await?;
    Ok(Json(courses))
}

#[utoipa::path(
    get,
    path = "/api/courses/popular",
    responses(
        (status = 200, description = "Published courses flagged as popular", body = Vec<CourseWithCategory>)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn list_popular_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseWithCategory>>, AppError> {
    let courses = CourseService::list_popular(&state.db).await?;
    Ok(Json(courses))
}

#[utoipa::path(
    get,
    path = "/api/courses/categories",
    responses(
        (status = 200, description = "Categories ordered by name", body = Vec<Category>)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, AppError> {
    let categories = CourseService::list_categories(&state.db).await?;
    Ok(Json(categories))
}

#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created with status pending", body = CourseResponse),
        (status = 400, description = "Missing or invalid fields", body = onlearn_core::ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires instructor or admin")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_course(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<CourseResponse>), AppError> {
    let course = CourseService::create_course(&state.db, &auth, dto).await?;
    track_course_created();

    Ok((
        StatusCode::CREATED,
        Json(CourseResponse {
            message: "Course created".to_string(),
            data: course,
        }),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/courses/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated and moved to draft", body = CourseResponse),
        (status = 400, description = "Missing or invalid fields", body = onlearn_core::ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - instructors may only edit their own courses"),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_course(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseDto>,
) -> Result<Json<CourseResponse>, AppError> {
    let course = CourseService::update_course(&state.db, &auth, id, dto).await?;

    Ok(Json(CourseResponse {
        message: "Course updated".to_string(),
        data: course,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course and its lessons deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the owner"),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    CourseService::delete_course(&state.db, &auth, id).await?;
    Ok(Json(MessageResponse::new("Course deleted")))
}

#[utoipa::path(
    patch,
    path = "/api/courses/{id}/approve",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course published", body = CourseStatusResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires admin"),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn approve_course(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<CourseStatusResponse>, AppError> {
    let course = CourseService::set_status(&state.db, id, CourseStatus::Published).await?;

    Ok(Json(CourseStatusResponse {
        message: "Course approved and published".to_string(),
        data: course,
    }))
}

#[utoipa::path(
    patch,
    path = "/api/courses/{id}/reject",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course sent back to draft", body = CourseStatusResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires admin"),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn reject_course(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<CourseStatusResponse>, AppError> {
    let course = CourseService::set_status(&state.db, id, CourseStatus::Draft).await?;

    Ok(Json(CourseStatusResponse {
        message: "Course rejected and moved to draft".to_string(),
        data: course,
    }))
}
