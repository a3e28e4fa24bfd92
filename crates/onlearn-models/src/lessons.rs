use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A lesson (module) of a course, ordered by `order_index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Lesson {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub order_index: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateLessonDto {
    #[validate(
        required(message = "title is required"),
        length(min = 1, message = "title is required")
    )]
    pub title: Option<String>,
    pub description: Option<String>,
    pub video_url: Option<String>,
    #[validate(range(min = 0, message = "order_index must be zero or greater"))]
    pub order_index: Option<i32>,
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateLessonDto {
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub video_url: Option<String>,
    #[validate(range(min = 0, message = "order_index must be zero or greater"))]
    pub order_index: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LessonResponse {
    pub message: String,
    pub data: Lesson,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_lesson_requires_title() {
        let dto: CreateLessonDto = serde_json::from_str(r#"{"description": "x"}"#).unwrap();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }

    #[test]
    fn test_update_lesson_allows_empty_body() {
        let dto: UpdateLessonDto = serde_json::from_str("{}").unwrap();
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_update_lesson_rejects_negative_order() {
        let dto: UpdateLessonDto = serde_json::from_str(r#"{"order_index": -1}"#).unwrap();
        assert!(dto.validate().is_err());
    }
}
