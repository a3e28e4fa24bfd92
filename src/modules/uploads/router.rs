use axum::{Router, extract::DefaultBodyLimit, routing::post};

use crate::state::AppState;

use super::controller::upload_file;

/// Room for multipart boundaries and the `folder` field on top of the file.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn init_uploads_router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new().route(
        "/",
        post(upload_file).layer(DefaultBodyLimit::max(
            max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES),
        )),
    )
}
