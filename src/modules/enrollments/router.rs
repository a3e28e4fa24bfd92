use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

use super::controller::{enroll, list_my_enrollments, update_progress};

pub fn init_enrollments_router() -> Router<AppState> {
    Router::new()
        .route("/", post(enroll))
        .route("/me", get(list_my_enrollments))
        .route("/{course_id}/progress", patch(update_progress))
}
