use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use onlearn_core::ErrorResponse;
use onlearn_models::{
    Category, Course, CourseFilterParams, CourseResponse, CourseStatus, CourseStatusResponse,
    CourseSummary, CourseWithCategory, CreateCourseDto, CreateLessonDto, EnrollDto, Enrollment,
    EnrollmentResponse, EnrollmentWithCourse, Lesson, LessonResponse, MessageResponse, Profile,
    ProfileResponse, ProgressResponse, Role, UpdateCourseDto, UpdateLessonDto, UpdateProgressDto,
};

use crate::modules::system::model::{ApiIndexResponse, HealthResponse};
use crate::modules::uploads::model::{UploadForm, UploadResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::courses::controller::list_courses,
        crate::modules::courses::controller::list_published_courses,
        crate::modules::courses::controller::list_popular_courses,
        crate::modules::courses::controller::list_categories,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::courses::controller::approve_course,
        crate::modules::courses::controller::reject_course,
        crate::modules::lessons::controller::list_lessons,
        crate::modules::lessons::controller::create_lesson,
        crate::modules::lessons::controller::update_lesson,
        crate::modules::lessons::controller::delete_lesson,
        crate::modules::enrollments::controller::list_my_enrollments,
        crate::modules::enrollments::controller::enroll,
        crate::modules::enrollments::controller::update_progress,
        crate::modules::users::controller::list_users,
        crate::modules::users::controller::list_pending_teachers,
        crate::modules::users::controller::approve_teacher,
        crate::modules::users::controller::reject_teacher,
        crate::modules::users::controller::delete_user,
        crate::modules::uploads::controller::upload_file,
        crate::modules::system::controller::health,
        crate::modules::system::controller::api_index,
    ),
    components(
        schemas(
            Role,
            Profile,
            ProfileResponse,
            Category,
            Course,
            CourseStatus,
            CourseWithCategory,
            CourseFilterParams,
            CreateCourseDto,
            UpdateCourseDto,
            CourseResponse,
            CourseStatusResponse,
            Lesson,
            CreateLessonDto,
            UpdateLessonDto,
            LessonResponse,
            Enrollment,
            CourseSummary,
            EnrollmentWithCourse,
            EnrollDto,
            UpdateProgressDto,
            EnrollmentResponse,
            ProgressResponse,
            MessageResponse,
            ErrorResponse,
            UploadForm,
            UploadResponse,
            HealthResponse,
            ApiIndexResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Courses", description = "Course catalogue and moderation"),
        (name = "Lessons", description = "Lessons of a course"),
        (name = "Enrollments", description = "Enrollment of the calling user"),
        (name = "Users", description = "Profile administration"),
        (name = "Uploads", description = "File uploads to object storage"),
        (name = "System", description = "Health and service information")
    ),
    info(
        title = "OnLearn API",
        version = "1.0.0",
        description = "Backend for the OnLearn course marketplace. Authentication is delegated to Supabase Auth; send its access token as a bearer token.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
