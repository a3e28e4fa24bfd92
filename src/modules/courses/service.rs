use onlearn_core::AppError;
use onlearn_models::{
    Category, Course, CourseFilterParams, CourseOwnership, CourseStatus, CourseWithCategory,
    CreateCourseDto, UpdateCourseDto,
};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthContext;
use crate::modules::courses::ownership::{ensure_can_delete, ensure_can_edit, resolve_owner};

const COURSE_COLUMNS: &str = "c.id, c.title, c.description, c.price, c.image_url, c.owner, \
     c.category_id, c.status, c.is_popular, c.created_at, cat.name AS category_name";

const CATEGORY_JOIN: &str = "LEFT JOIN course_categories cat ON cat.id = c.category_id";

fn category_fk_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_foreign_key_violation()
    {
        return AppError::bad_request("category_id does not match an existing category");
    }
    AppError::from(e)
}

pub struct CourseService;

impl CourseService {
    #[instrument]
    pub async fn list_courses(
        db: &PgPool,
        filters: CourseFilterParams,
    ) -> Result<Vec<CourseWithCategory>, AppError> {
        let query = format!(
            r#"SELECT {COURSE_COLUMNS}
               FROM courses c {CATEGORY_JOIN}
               WHERE ($1::uuid IS NULL OR c.owner = $1)
                 AND ($2::uuid IS NULL OR c.category_id = $2)
               ORDER BY c.created_at DESC"#
        );

        let courses = sqlx::query_as::<_, CourseWithCategory>(&query)
            .bind(filters.instructor_id)
            .bind(filters.category_id)
            .fetch_all(db)
            .await?;

        Ok(courses)
    }

    #[instrument]
    pub async fn list_published(db: &PgPool) -> Result<Vec<CourseWithCategory>, AppError> {
        let query = format!(
            r#"SELECT {COURSE_COLUMNS}
               FROM courses c {CATEGORY_JOIN}
               WHERE c.status = 'published'
               ORDER BY c.created_at DESC"#
        );

        let courses = sqlx::query_as::<_, CourseWithCategory>(&query)
            .fetch_all(db)
            .await?;

        Ok(courses)
    }

    #[instrument]
    pub async fn list_popular(db: &PgPool) -> Result<Vec<CourseWithCategory>, AppError> {
        let query = format!(
            r#"SELECT {COURSE_COLUMNS}
               FROM courses c {CATEGORY_JOIN}
               WHERE c.status = 'published' AND c.is_popular
               ORDER BY c.created_at DESC"#
        );

        let courses = sqlx::query_as::<_, CourseWithCategory>(&query)
            .fetch_all(db)
            .await?;

        Ok(courses)
    }

    #[instrument]
    pub async fn list_categories(db: &PgPool) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name FROM course_categories ORDER BY name ASC",
        )
        .fetch_all(db)
        .await?;

        Ok(categories)
    }

    #[instrument]
    pub async fn find_ownership(
        db: &PgPool,
        id: Uuid,
    ) -> Result<Option<CourseOwnership>, AppError> {
        let course = sqlx::query_as::<_, CourseOwnership>(
            "SELECT id, owner FROM courses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(course)
    }

    /// Fetch a course's owner or fail with 404.
    pub async fn require_ownership(db: &PgPool, id: Uuid) -> Result<CourseOwnership, AppError> {
        Self::find_ownership(db, id)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))
    }

    #[instrument]
    pub async fn create_course(
        db: &PgPool,
        actor: &AuthContext,
        dto: CreateCourseDto,
    ) -> Result<CourseWithCategory, AppError> {
        let (Some(title), Some(description), Some(price), Some(category_id)) =
            (dto.title, dto.description, dto.price, dto.category_id)
        else {
            return Err(AppError::bad_request(
                "title, description, price and category_id are required",
            ));
        };

        let owner = resolve_owner(actor, dto.owner)?;

        let query = format!(
            r#"WITH c AS (
                   INSERT INTO courses (title, description, price, image_url, owner, category_id, status)
                   VALUES ($1, $2, $3, $4, $5, $6, 'pending')
                   RETURNING *
               )
               SELECT {COURSE_COLUMNS} FROM c {CATEGORY_JOIN}"#
        );

        let course = sqlx::query_as::<_, CourseWithCategory>(&query)
            .bind(title)
            .bind(description)
            .bind(price)
            .bind(dto.image_url)
            .bind(owner)
            .bind(category_id)
            .fetch_one(db)
            .await
            .map_err(category_fk_error)?;

        Ok(course)
    }

    /// Replace the editable fields of a course and send it back to `draft`.
    ///
    /// `image_url` and `category_id` keep their stored values when omitted.
    #[instrument]
    pub async fn update_course(
        db: &PgPool,
        actor: &AuthContext,
        id: Uuid,
        dto: UpdateCourseDto,
    ) -> Result<CourseWithCategory, AppError> {
        let (Some(title), Some(description), Some(price)) = (dto.title, dto.description, dto.price)
        else {
            return Err(AppError::bad_request(
                "title, description and price are required",
            ));
        };

        let existing = Self::require_ownership(db, id).await?;
        ensure_can_edit(actor, existing.owner)?;

        let query = format!(
            r#"WITH c AS (
                   UPDATE courses
                   SET title = $2,
                       description = $3,
                       price = $4,
                       image_url = COALESCE($5, image_url),
                       category_id = COALESCE($6, category_id),
                       status = 'draft'
                   WHERE id = $1
                   RETURNING *
               )
               SELECT {COURSE_COLUMNS} FROM c {CATEGORY_JOIN}"#
        );

        sqlx::query_as::<_, CourseWithCategory>(&query)
            .bind(id)
            .bind(title)
            .bind(description)
            .bind(price)
            .bind(dto.image_url)
            .bind(dto.category_id)
            .fetch_optional(db)
            .await
            .map_err(category_fk_error)?
            .ok_or_else(|| AppError::not_found("Course not found"))
    }

    #[instrument]
    pub async fn set_status(
        db: &PgPool,
        id: Uuid,
        status: CourseStatus,
    ) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(
            r#"UPDATE courses SET status = $2
               WHERE id = $1
               RETURNING id, title, description, price, image_url, owner, category_id,
                         status, is_popular, created_at"#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Course not found"))
    }

    /// Delete a course and its lessons in one transaction, lessons first.
    #[instrument]
    pub async fn delete_course(db: &PgPool, actor: &AuthContext, id: Uuid) -> Result<(), AppError> {
        let existing = Self::require_ownership(db, id).await?;
        ensure_can_delete(actor, existing.owner)?;

        let mut tx = db.begin().await?;

        sqlx::query("DELETE FROM course_lessons WHERE course_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}
