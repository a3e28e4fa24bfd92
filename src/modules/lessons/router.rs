use axum::{
    Router,
    routing::{get, patch},
};

use crate::state::AppState;

use super::controller::{create_lesson, delete_lesson, list_lessons, update_lesson};

/// Lesson routes, nested under `/courses/{id}/lessons`.
pub fn init_lessons_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_lessons).post(create_lesson))
        .route("/{lesson_id}", patch(update_lesson).delete(delete_lesson))
}
