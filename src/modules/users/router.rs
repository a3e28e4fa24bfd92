use axum::{
    Router,
    routing::{delete, get, patch},
};

use crate::state::AppState;

use super::controller::{
    approve_teacher, delete_user, list_pending_teachers, list_users, reject_teacher,
};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/pending-teachers", get(list_pending_teachers))
        .route("/approve-teacher/{id}", patch(approve_teacher))
        .route("/reject-teacher/{id}", patch(reject_teacher))
        .route("/{id}", delete(delete_user))
}
