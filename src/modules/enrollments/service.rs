use onlearn_core::AppError;
use onlearn_models::{CourseSummary, Enrollment, EnrollmentWithCourse};
use sqlx::{FromRow, PgPool};
use tracing::instrument;
use uuid::Uuid;

/// Outcome of an enrollment request.
#[derive(Debug, Clone, PartialEq)]
pub enum EnrollOutcome {
    Created(Enrollment),
    AlreadyEnrolled(Enrollment),
}

#[derive(Debug, FromRow)]
struct EnrollmentCourseRow {
    user_id: Uuid,
    course_id: Uuid,
    progress: f64,
    created_at: chrono::DateTime<chrono::Utc>,
    c_id: Option<Uuid>,
    c_title: Option<String>,
    c_description: Option<String>,
    c_image_url: Option<String>,
    c_price: Option<f64>,
}

impl From<EnrollmentCourseRow> for EnrollmentWithCourse {
    fn from(row: EnrollmentCourseRow) -> Self {
        let course = match (row.c_id, row.c_title, row.c_description, row.c_price) {
            (Some(id), Some(title), Some(description), Some(price)) => Some(CourseSummary {
                id,
                title,
                description,
                image_url: row.c_image_url,
                price,
            }),
            _ => None,
        };

        EnrollmentWithCourse {
            user_id: row.user_id,
            course_id: row.course_id,
            progress: row.progress,
            created_at: row.created_at,
            course,
        }
    }
}

pub struct EnrollmentService;

impl EnrollmentService {
    #[instrument]
    pub async fn list_for_user(
        db: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<EnrollmentWithCourse>, AppError> {
        let rows = sqlx::query_as::<_, EnrollmentCourseRow>(
            r#"SELECT e.user_id, e.course_id, e.progress, e.created_at,
                      c.id AS c_id, c.title AS c_title, c.description AS c_description,
                      c.image_url AS c_image_url, c.price AS c_price
               FROM enrollments e
               LEFT JOIN courses c ON c.id = e.course_id
               WHERE e.user_id = $1
               ORDER BY e.created_at DESC"#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(rows.into_iter().map(EnrollmentWithCourse::from).collect())
    }

    #[instrument]
    pub async fn find(
        db: &PgPool,
        user_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<Enrollment>, AppError> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"SELECT user_id, course_id, progress, created_at
               FROM enrollments
               WHERE user_id = $1 AND course_id = $2"#,
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(db)
        .await?;

        Ok(enrollment)
    }

    /// Enroll `user_id` in `course_id` at progress 0.
    ///
    /// The insert is keyed on the (user, course) primary key, so concurrent
    /// requests yield one row; the losing request sees `AlreadyEnrolled`.
    #[instrument]
    pub async fn enroll(
        db: &PgPool,
        user_id: Uuid,
        course_id: Uuid,
    ) -> Result<EnrollOutcome, AppError> {
        if let Some(existing) = Self::find(db, user_id, course_id).await? {
            return Ok(EnrollOutcome::AlreadyEnrolled(existing));
        }

        let inserted = sqlx::query_as::<_, Enrollment>(
            r#"INSERT INTO enrollments (user_id, course_id, progress)
               VALUES ($1, $2, 0)
               ON CONFLICT (user_id, course_id) DO NOTHING
               RETURNING user_id, course_id, progress, created_at"#,
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_foreign_key_violation()
            {
                return AppError::not_found("Course not found");
            }
            AppError::from(e)
        })?;

        match inserted {
            Some(enrollment) => Ok(EnrollOutcome::Created(enrollment)),
            None => Self::find(db, user_id, course_id)
                .await?
                .map(EnrollOutcome::AlreadyEnrolled)
                .ok_or_else(|| AppError::internal(anyhow::anyhow!("Enrollment vanished"))),
        }
    }

    #[instrument]
    pub async fn update_progress(
        db: &PgPool,
        user_id: Uuid,
        course_id: Uuid,
        progress: f64,
    ) -> Result<f64, AppError> {
        let result = sqlx::query(
            "UPDATE enrollments SET progress = $3 WHERE user_id = $1 AND course_id = $2",
        )
        .bind(user_id)
        .bind(course_id)
        .bind(progress)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Enrollment not found"));
        }

        Ok(progress)
    }
}
