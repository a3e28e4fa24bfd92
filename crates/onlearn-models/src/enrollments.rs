use onlearn_core::serde::deserialize_optional_uuid;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Enrollment of a user in a course. The (`user_id`, `course_id`) pair is
/// the primary key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Enrollment {
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub progress: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CourseSummary {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub price: f64,
}

/// Enrollment with the enrolled course embedded, as listed for the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentWithCourse {
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub progress: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub course: Option<CourseSummary>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct EnrollDto {
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    #[validate(required(message = "course_id is required"))]
    pub course_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProgressDto {
    #[validate(
        required(message = "progress is required"),
        range(min = 0.0, max = 100.0, message = "progress must be between 0 and 100")
    )]
    pub progress: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentResponse {
    pub message: String,
    pub data: Enrollment,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProgressResponse {
    pub message: String,
    pub progress: f64,
}
