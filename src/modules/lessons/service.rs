use onlearn_core::AppError;
use onlearn_models::{CreateLessonDto, Lesson, UpdateLessonDto};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthContext;
use crate::modules::courses::ownership::ensure_can_edit;
use crate::modules::courses::service::CourseService;

const LESSON_COLUMNS: &str =
    "id, course_id, title, description, video_url, order_index, created_at";

pub struct LessonService;

impl LessonService {
    /// Lessons of a course in `order_index` order. An unknown course simply
    /// has no lessons.
    #[instrument]
    pub async fn list_lessons(db: &PgPool, course_id: Uuid) -> Result<Vec<Lesson>, AppError> {
        let lessons = sqlx::query_as::<_, Lesson>(&format!(
            "SELECT {LESSON_COLUMNS} FROM course_lessons
             WHERE course_id = $1
             ORDER BY order_index ASC, created_at ASC"
        ))
        .bind(course_id)
        .fetch_all(db)
        .await?;

        Ok(lessons)
    }

    /// The parent course must exist and the caller must be allowed to edit it.
    async fn authorize_course(
        db: &PgPool,
        actor: &AuthContext,
        course_id: Uuid,
    ) -> Result<(), AppError> {
        let course = CourseService::require_ownership(db, course_id).await?;
        ensure_can_edit(actor, course.owner)
    }

    #[instrument]
    pub async fn create_lesson(
        db: &PgPool,
        actor: &AuthContext,
        course_id: Uuid,
        dto: CreateLessonDto,
    ) -> Result<Lesson, AppError> {
        let Some(title) = dto.title else {
            return Err(AppError::bad_request("title is required"));
        };

        Self::authorize_course(db, actor, course_id).await?;

        let lesson = sqlx::query_as::<_, Lesson>(&format!(
            "INSERT INTO course_lessons (course_id, title, description, video_url, order_index)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {LESSON_COLUMNS}"
        ))
        .bind(course_id)
        .bind(title)
        .bind(dto.description)
        .bind(dto.video_url)
        .bind(dto.order_index.unwrap_or(0))
        .fetch_one(db)
        .await?;

        Ok(lesson)
    }

    /// Partial update; fields absent from `dto` keep their values.
    #[instrument]
    pub async fn update_lesson(
        db: &PgPool,
        actor: &AuthContext,
        course_id: Uuid,
        lesson_id: Uuid,
        dto: UpdateLessonDto,
    ) -> Result<Lesson, AppError> {
        Self::authorize_course(db, actor, course_id).await?;

        sqlx::query_as::<_, Lesson>(&format!(
            "UPDATE course_lessons
             SET title = COALESCE($3, title),
                 description = COALESCE($4, description),
                 video_url = COALESCE($5, video_url),
                 order_index = COALESCE($6, order_index)
             WHERE id = $2 AND course_id = $1
             RETURNING {LESSON_COLUMNS}"
        ))
        .bind(course_id)
        .bind(lesson_id)
        .bind(dto.title)
        .bind(dto.description)
        .bind(dto.video_url)
        .bind(dto.order_index)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Lesson not found"))
    }

    /// Deleting a lesson that is already gone succeeds.
    #[instrument]
    pub async fn delete_lesson(
        db: &PgPool,
        actor: &AuthContext,
        course_id: Uuid,
        lesson_id: Uuid,
    ) -> Result<u64, AppError> {
        Self::authorize_course(db, actor, course_id).await?;

        let result = sqlx::query("DELETE FROM course_lessons WHERE id = $2 AND course_id = $1")
            .bind(course_id)
            .bind(lesson_id)
            .execute(db)
            .await?;

        Ok(result.rows_affected())
    }
}
