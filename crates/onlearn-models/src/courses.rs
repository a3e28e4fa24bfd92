//! Course models and DTOs.
//!
//! # Status lifecycle
//!
//! ```text
//! create ──► pending ──approve──► published
//!               │                    │
//!               └──reject / edit──► draft ◄──edit / reject
//! ```

use onlearn_core::serde::deserialize_optional_uuid;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "course_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CourseStatus {
    Pending,
    Published,
    Draft,
}

impl CourseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseStatus::Pending => "pending",
            CourseStatus::Published => "published",
            CourseStatus::Draft => "draft",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image_url: Option<String>,
    /// Profile id of the instructor who owns the course.
    pub owner: Uuid,
    pub category_id: Option<Uuid>,
    pub status: CourseStatus,
    pub is_popular: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Course joined with the name of its category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CourseWithCategory {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub course: Course,
    pub category_name: Option<String>,
}

/// The minimum needed to decide who may modify a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct CourseOwnership {
    pub id: Uuid,
    pub owner: Uuid,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct CourseFilterParams {
    /// Only courses owned by this instructor
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub instructor_id: Option<Uuid>,
    /// Only courses in this category
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[validate(
        required(message = "title is required"),
        length(min = 1, message = "title is required")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "description is required"),
        length(min = 1, message = "description is required")
    )]
    pub description: Option<String>,
    #[validate(
        required(message = "price is required"),
        range(min = 0.0, message = "price must be zero or greater")
    )]
    pub price: Option<f64>,
    pub image_url: Option<String>,
    /// Owning profile. Defaults to the caller; only admins may set another owner.
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub owner: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    #[validate(required(message = "category_id is required"))]
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseDto {
    #[validate(
        required(message = "title is required"),
        length(min = 1, message = "title is required")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "description is required"),
        length(min = 1, message = "description is required")
    )]
    pub description: Option<String>,
    #[validate(
        required(message = "price is required"),
        range(min = 0.0, message = "price must be zero or greater")
    )]
    pub price: Option<f64>,
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseResponse {
    pub message: String,
    pub data: CourseWithCategory,
}

/// Answer to an approve/reject decision.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseStatusResponse {
    pub message: String,
    pub data: Course,
}
