use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartError},
};
use onlearn_core::AppError;
use tracing::instrument;

use crate::metrics::track_upload;
use crate::modules::uploads::model::{UploadForm, UploadResponse};
use crate::modules::uploads::service::{IncomingFile, UploadService};
use crate::state::AppState;

fn multipart_error(e: MultipartError) -> AppError {
    AppError::msg(e.status(), e.body_text())
}

#[utoipa::path(
    post,
    path = "/api/upload",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored", body = UploadResponse),
        (status = 400, description = "No file, or an invalid folder/file name", body = onlearn_core::ErrorResponse),
        (status = 413, description = "File too large", body = onlearn_core::ErrorResponse),
        (status = 500, description = "Object storage failure", body = onlearn_core::ErrorResponse)
    ),
    tag = "Uploads"
)]
#[instrument(skip(state, multipart))]
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut file: Option<IncomingFile> = None;
    let mut folder: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        match field.name() {
            Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(multipart_error)?;

                file = Some(IncomingFile {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            Some("folder") => {
                folder = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| AppError::bad_request("No valid file received"))?;
    let millis = chrono::Utc::now().timestamp_millis();

    let response =
        UploadService::store(state.storage.as_ref(), folder.as_deref(), file, millis).await?;

    track_upload(state.storage_config.backend.as_str());

    Ok(Json(response))
}
