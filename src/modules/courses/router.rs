use axum::{
    Router,
    routing::{get, patch},
};

use crate::modules::lessons::init_lessons_router;
use crate::state::AppState;

use super::controller::{
    approve_course, create_course, delete_course, list_categories, list_courses,
    list_popular_courses, list_published_courses, reject_course, update_course,
};

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route("/published", get(list_published_courses))
        .route("/popular", get(list_popular_courses))
        .route("/categories", get(list_categories))
        .route("/{id}", patch(update_course).delete(delete_course))
        .route("/{id}/approve", patch(approve_course))
        .route("/{id}/reject", patch(reject_course))
        .nest("/{id}/lessons", init_lessons_router())
}
