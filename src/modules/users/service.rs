use onlearn_core::AppError;
use onlearn_models::{Profile, Role};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

const PROFILE_COLUMNS: &str = "id, full_name, email, role, created_at";

pub struct UserService;

impl UserService {
    #[instrument]
    pub async fn list_users(db: &PgPool) -> Result<Vec<Profile>, AppError> {
        let users = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY created_at DESC"
        ))
        .fetch_all(db)
        .await?;

        Ok(users)
    }

    #[instrument]
    pub async fn list_by_role(db: &PgPool, role: Role) -> Result<Vec<Profile>, AppError> {
        let users = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE role = $1 ORDER BY created_at DESC"
        ))
        .bind(role)
        .fetch_all(db)
        .await?;

        Ok(users)
    }

    #[instrument]
    pub async fn set_role(db: &PgPool, id: Uuid, role: Role) -> Result<Profile, AppError> {
        sqlx::query_as::<_, Profile>(&format!(
            "UPDATE profiles SET role = $2 WHERE id = $1 RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(id)
        .bind(role)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Remove a profile and everything that hangs off it in one transaction:
    /// lessons of the user's courses, enrollments in those courses, the
    /// courses, the user's own enrollments, then the profile.
    ///
    /// Returns `false` when no such profile exists; nothing is deleted then.
    #[instrument]
    pub async fn delete_user_data(db: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let mut tx = db.begin().await?;

        let exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        if exists.is_none() {
            return Ok(false);
        }

        sqlx::query(
            "DELETE FROM course_lessons WHERE course_id IN (SELECT id FROM courses WHERE owner = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "DELETE FROM enrollments WHERE course_id IN (SELECT id FROM courses WHERE owner = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM courses WHERE owner = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM enrollments WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(true)
    }
}
