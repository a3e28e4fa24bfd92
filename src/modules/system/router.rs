use axum::{Router, routing::get};

use crate::metrics::render_metrics;
use crate::state::AppState;

use super::controller::{api_index, health};

pub fn init_system_router() -> Router<AppState> {
    Router::new()
        .route("/", get(api_index))
        .route("/health", get(health))
        .route("/metrics", get(render_metrics))
}
