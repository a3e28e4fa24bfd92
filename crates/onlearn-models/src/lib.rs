//! # OnLearn Models
//!
//! Domain entities, enums and request/response DTOs for the OnLearn API.
//!
//! # Modules
//!
//! - [`roles`]: the four profile roles
//! - [`profiles`]: application-level user records
//! - [`categories`]: course categories (read-only reference data)
//! - [`courses`]: courses, their status lifecycle and DTOs
//! - [`lessons`]: lessons belonging to a course
//! - [`enrollments`]: (user, course) enrollments and progress
//! - [`responses`]: response envelopes shared by several modules

pub mod categories;
pub mod courses;
pub mod enrollments;
pub mod lessons;
pub mod profiles;
pub mod responses;
pub mod roles;

pub use categories::Category;
pub use courses::{
    Course, CourseFilterParams, CourseOwnership, CourseResponse, CourseStatus,
    CourseStatusResponse, CourseWithCategory, CreateCourseDto, UpdateCourseDto,
};
pub use enrollments::{
    CourseSummary, EnrollDto, Enrollment, EnrollmentResponse, EnrollmentWithCourse,
    ProgressResponse, UpdateProgressDto,
};
pub use lessons::{CreateLessonDto, Lesson, LessonResponse, UpdateLessonDto};
pub use profiles::{Profile, ProfileResponse};
pub use responses::MessageResponse;
pub use roles::Role;
