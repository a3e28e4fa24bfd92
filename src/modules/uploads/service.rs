use onlearn_core::{AppError, FileStorage, StorageError};
use tracing::instrument;

use crate::modules::uploads::model::UploadResponse;

pub const DEFAULT_FOLDER: &str = "uploads";
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
const UNNAMED: &str = "unnamed";

/// A file part received from the client.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Make a client file name safe to embed in a storage key.
///
/// Whitespace runs become a single `_`. Any other character outside
/// `[A-Za-z0-9._-]`, and any run of two or more dots, becomes `_`.
pub fn sanitize_file_name(name: &str) -> String {
    let joined = name.split_whitespace().collect::<Vec<_>>().join("_");

    let mut out = String::with_capacity(joined.len());
    let mut chars = joined.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '.' && chars.peek() == Some(&'.') {
            while chars.peek() == Some(&'.') {
                chars.next();
            }
            out.push('_');
        } else if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
            out.push(c);
        } else {
            out.push('_');
        }
    }
    out
}

/// Build the storage key for an upload: `{folder}/{millis}-{name}`.
///
/// The file name goes through [`sanitize_file_name`]; a missing or blank
/// name becomes `unnamed`. A blank folder becomes `uploads`. The folder is
/// taken as given, so a bad folder is still rejected by the storage layer.
pub fn build_object_key(folder: Option<&str>, file_name: Option<&str>, millis: i64) -> String {
    let folder = folder
        .map(|f| f.trim().trim_end_matches('/'))
        .filter(|f| !f.is_empty())
        .unwrap_or(DEFAULT_FOLDER);

    let name = file_name
        .map(sanitize_file_name)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| UNNAMED.to_string());

    format!("{}/{}-{}", folder, millis, name)
}

pub fn storage_error(e: StorageError) -> AppError {
    match e {
        StorageError::InvalidKey(msg) => AppError::bad_request(msg),
        StorageError::InvalidFileSize { max_bytes } => AppError::payload_too_large(format!(
            "File exceeds maximum size of {} bytes",
            max_bytes
        )),
        other => AppError::upstream(other),
    }
}

pub struct UploadService;

impl UploadService {
    /// Write the file under a fresh key and resolve its public URL.
    #[instrument(skip(storage, file), fields(size = file.bytes.len()))]
    pub async fn store(
        storage: &dyn FileStorage,
        folder: Option<&str>,
        file: IncomingFile,
        millis: i64,
    ) -> Result<UploadResponse, AppError> {
        if file.bytes.is_empty() {
            return Err(AppError::bad_request("No valid file received"));
        }

        let key = build_object_key(folder, file.file_name.as_deref(), millis);
        let content_type = file
            .content_type
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

        let path = storage
            .save(&key, &file.bytes, &content_type)
            .await
            .map_err(storage_error)?;

        let url = storage.get_url(&path).map_err(|e| {
            AppError::upstream(anyhow::anyhow!("Could not generate public URL: {}", e))
        })?;

        Ok(UploadResponse {
            success: true,
            url,
            path,
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use onlearn_core::LocalFileStorage;

    #[test]
    fn test_key_replaces_whitespace_runs() {
        assert_eq!(
            build_object_key(Some("avatars"), Some("my file.png"), 1700000000000),
            "avatars/1700000000000-my_file.png"
        );
        assert_eq!(
            build_object_key(Some("docs"), Some("a  b\tc.pdf"), 1),
            "docs/1-a_b_c.pdf"
        );
    }

    #[test]
    fn test_key_replaces_unsafe_characters() {
        assert_eq!(
            build_object_key(Some("avatars"), Some("photo (1).png"), 3),
            "avatars/3-photo__1_.png"
        );
        assert_eq!(sanitize_file_name("Résumé, final.pdf"), "R_sum___final.pdf");
        assert_eq!(sanitize_file_name("O'Brien.jpg"), "O_Brien.jpg");
        assert_eq!(sanitize_file_name("a+b.png"), "a_b.png");
        assert_eq!(sanitize_file_name("v1..2.png"), "v1_2.png");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "____etc_passwd");
    }

    #[test]
    fn test_sanitized_keys_pass_storage_validation() {
        for name in [
            "photo (1).png",
            "Résumé, final.pdf",
            "O'Brien.jpg",
            "a+b.png",
            "v1..2.png",
            "...",
        ] {
            let key = build_object_key(Some("avatars"), Some(name), 1);
            assert!(onlearn_core::file_storage::validate_key(&key).is_ok(), "{key}");
        }
    }

    #[test]
    fn test_key_defaults() {
        assert_eq!(build_object_key(None, None, 5), "uploads/5-unnamed");
        assert_eq!(build_object_key(Some(""), Some("   "), 5), "uploads/5-unnamed");
    }

    #[test]
    fn test_key_trims_trailing_slash_in_folder() {
        assert_eq!(
            build_object_key(Some("videos/"), Some("intro.mp4"), 9),
            "videos/9-intro.mp4"
        );
    }

    #[test]
    fn test_storage_error_mapping() {
        assert_eq!(
            storage_error(StorageError::InvalidKey("bad".into())).status,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            storage_error(StorageError::InvalidFileSize { max_bytes: 1 }).status,
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            storage_error(StorageError::Upstream("bucket not found".into())).status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    fn local(dir: &std::path::Path) -> LocalFileStorage {
        LocalFileStorage::new(dir.to_path_buf(), "http://localhost:4000/files".to_string())
    }

    #[tokio::test]
    async fn test_store_writes_file_and_returns_url() {
        let dir = tempfile::tempdir().unwrap();
        let storage = local(dir.path());

        let response = UploadService::store(
            &storage,
            Some("avatars"),
            IncomingFile {
                file_name: Some("my file.png".to_string()),
                content_type: Some("image/png".to_string()),
                bytes: b"png-bytes".to_vec(),
            },
            42,
        )
        .await
        .unwrap();

        assert!(response.success);
        assert_eq!(response.path, "avatars/42-my_file.png");
        assert_eq!(
            response.url,
            "http://localhost:4000/files/avatars/42-my_file.png"
        );
        assert_eq!(response.content_type, "image/png");
        assert_eq!(
            std::fs::read(dir.path().join("avatars/42-my_file.png")).unwrap(),
            b"png-bytes"
        );
    }

    #[tokio::test]
    async fn test_store_rejects_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = local(dir.path());

        let err = UploadService::store(
            &storage,
            None,
            IncomingFile {
                file_name: Some("empty.txt".to_string()),
                content_type: None,
                bytes: Vec::new(),
            },
            1,
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(!dir.path().join("uploads").exists());
    }

    #[tokio::test]
    async fn test_store_rejects_traversal_folder() {
        let dir = tempfile::tempdir().unwrap();
        let storage = local(dir.path());

        let err = UploadService::store(
            &storage,
            Some("../outside"),
            IncomingFile {
                file_name: Some("x.txt".to_string()),
                content_type: None,
                bytes: b"x".to_vec(),
            },
            1,
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_store_defaults_content_type() {
        let dir = tempfile::tempdir().unwrap();
        let storage = local(dir.path());

        let response = UploadService::store(
            &storage,
            None,
            IncomingFile {
                file_name: None,
                content_type: None,
                bytes: b"data".to_vec(),
            },
            7,
        )
        .await
        .unwrap();

        assert_eq!(response.path, "uploads/7-unnamed");
        assert_eq!(response.content_type, DEFAULT_CONTENT_TYPE);
    }
}
