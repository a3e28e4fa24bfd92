//! File storage abstraction layer.
//!
//! Uploads go through the [`FileStorage`] trait so the handler does not care
//! whether bytes land in the managed object store or on the local disk.
//!
//! - [`SupabaseStorage`]: writes to a Supabase Storage bucket and hands out
//!   public object URLs.
//! - [`LocalFileStorage`]: writes under a directory that the API serves at a
//!   public base URL. Used for development and tests.
//!
//! Both backends overwrite an existing object stored under the same key.
//!
//! # Example
//!
//! ```ignore
//! use onlearn_core::file_storage::{FileStorage, LocalFileStorage};
//! use std::path::PathBuf;
//!
//! let storage = LocalFileStorage::new(
//!     PathBuf::from("./storage/uploads"),
//!     "http://localhost:4000/files".to_string(),
//! );
//!
//! let key = storage.save("avatars/1700000000000-me.png", &bytes, "image/png").await?;
//! let url = storage.get_url(&key)?;
//! ```

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;
use tokio::fs;

/// Boxed future returned by storage operations.
pub type StorageFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StorageError>> + Send + 'a>>;

/// Default upload ceiling (50 MiB).
pub const DEFAULT_MAX_FILE_SIZE: usize = 50 * 1024 * 1024;

/// Abstract trait for file storage backends.
pub trait FileStorage: Send + Sync {
    /// Save file content under `key`, replacing any existing object, and
    /// return the storage key.
    fn save<'a>(
        &'a self,
        key: &'a str,
        content: &'a [u8],
        content_type: &'a str,
    ) -> StorageFuture<'a, String>;

    /// Get the public URL for accessing a stored object.
    fn get_url(&self, key: &str) -> Result<String, StorageError>;

    /// Largest payload accepted by [`FileStorage::save`].
    fn max_file_size(&self) -> usize;
}

/// Error type for file storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("File exceeds maximum size of {max_bytes} bytes")]
    InvalidFileSize { max_bytes: usize },

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Storage request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The object store answered with an error; the message is the
    /// provider's own.
    #[error("{0}")]
    Upstream(String),
}

/// Validate storage key format to prevent path traversal.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() || key.contains("..") || key.starts_with('/') || key.starts_with('\\') {
        return Err(StorageError::InvalidKey(
            "Key must not be empty, contain '..', or start with '/'".to_string(),
        ));
    }

    if !key
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '/' || c == '.')
    {
        return Err(StorageError::InvalidKey(
            "Key contains invalid characters".to_string(),
        ));
    }

    Ok(())
}

fn check_size(content: &[u8], max_file_size: usize) -> Result<(), StorageError> {
    if content.len() > max_file_size {
        return Err(StorageError::InvalidFileSize {
            max_bytes: max_file_size,
        });
    }
    Ok(())
}

/// Local filesystem-based file storage implementation.
#[derive(Clone, Debug)]
pub struct LocalFileStorage {
    /// Base directory where files are stored
    base_dir: PathBuf,

    /// Base URL for public file access (e.g., "http://localhost:4000/files")
    base_url: String,

    max_file_size: usize,
}

impl LocalFileStorage {
    pub fn new(base_dir: PathBuf, base_url: String) -> Self {
        Self::with_max_size(base_dir, base_url, DEFAULT_MAX_FILE_SIZE)
    }

    pub fn with_max_size(base_dir: PathBuf, base_url: String, max_file_size: usize) -> Self {
        Self {
            base_dir,
            base_url,
            max_file_size,
        }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }
}

impl FileStorage for LocalFileStorage {
    fn save<'a>(
        &'a self,
        key: &'a str,
        content: &'a [u8],
        _content_type: &'a str,
    ) -> StorageFuture<'a, String> {
        Box::pin(async move {
            validate_key(key)?;
            check_size(content, self.max_file_size)?;

            let file_path = self.base_dir.join(key);

            if let Some(parent) = file_path.parent() {
                fs::create_dir_all(parent).await?;
            }

            // fs::write truncates, which gives the same overwrite semantics as
            // the remote bucket's upsert.
            fs::write(&file_path, content).await?;

            Ok(key.to_string())
        })
    }

    fn get_url(&self, key: &str) -> Result<String, StorageError> {
        validate_key(key)?;

        Ok(format!("{}/{}", self.base_url.trim_end_matches('/'), key))
    }

    fn max_file_size(&self) -> usize {
        self.max_file_size
    }
}

/// Supabase Storage backend.
///
/// Objects are written with the service-role key to
/// `{project_url}/storage/v1/object/{bucket}/{key}` with `x-upsert: true`,
/// and exposed at `{project_url}/storage/v1/object/public/{bucket}/{key}`.
#[derive(Clone, Debug)]
pub struct SupabaseStorage {
    client: reqwest::Client,
    project_url: String,
    service_key: String,
    bucket: String,
    max_file_size: usize,
}

#[derive(Debug, Deserialize)]
struct StorageErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl SupabaseStorage {
    pub fn new(
        project_url: String,
        service_key: String,
        bucket: String,
        max_file_size: usize,
        timeout: Duration,
    ) -> Result<Self, StorageError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            project_url,
            service_key,
            bucket,
            max_file_size,
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    fn object_url(&self, prefix: &[&str], key: &str) -> Result<Url, StorageError> {
        let mut url = Url::parse(self.project_url.trim_end_matches('/'))
            .map_err(|e| StorageError::Upstream(format!("Invalid storage base URL: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| StorageError::Upstream("Storage base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["storage", "v1", "object"])
            .extend(prefix)
            .push(&self.bucket)
            .extend(key.split('/'));

        Ok(url)
    }
}

impl FileStorage for SupabaseStorage {
    fn save<'a>(
        &'a self,
        key: &'a str,
        content: &'a [u8],
        content_type: &'a str,
    ) -> StorageFuture<'a, String> {
        Box::pin(async move {
            validate_key(key)?;
            check_size(content, self.max_file_size)?;

            let url = self.object_url(&[], key)?;

            let response = self
                .client
                .post(url)
                .bearer_auth(&self.service_key)
                .header("apikey", &self.service_key)
                .header("x-upsert", "true")
                .header(reqwest::header::CONTENT_TYPE, content_type)
                .body(content.to_vec())
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<StorageErrorBody>(&text)
                    .ok()
                    .and_then(|body| body.message.or(body.error))
                    .unwrap_or_else(|| format!("Object storage returned {}: {}", status, text));

                tracing::warn!(%status, key, "Object storage rejected upload");
                return Err(StorageError::Upstream(message));
            }

            Ok(key.to_string())
        })
    }

    fn get_url(&self, key: &str) -> Result<String, StorageError> {
        validate_key(key)?;

        Ok(self.object_url(&["public"], key)?.to_string())
    }

    fn max_file_size(&self) -> usize {
        self.max_file_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supabase() -> SupabaseStorage {
        SupabaseStorage::new(
            "https://project.supabase.co/".to_string(),
            "service-key".to_string(),
            "onlearn_uploads".to_string(),
            DEFAULT_MAX_FILE_SIZE,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_validate_key_accepts_valid_keys() {
        assert!(validate_key("uploads/1700000000000-logo.png").is_ok());
        assert!(validate_key("avatars/abc-123.jpg").is_ok());
        assert!(validate_key("videos/intro_lesson.mp4").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_path_traversal() {
        assert!(validate_key("../../../etc/passwd").is_err());
        assert!(validate_key("uploads/../secrets").is_err());
    }

    #[test]
    fn test_validate_key_rejects_absolute_paths() {
        assert!(validate_key("/etc/passwd").is_err());
        assert!(validate_key("\\windows\\system32").is_err());
    }

    #[test]
    fn test_validate_key_rejects_special_characters() {
        assert!(validate_key("uploads/a b.png").is_err());
        assert!(validate_key("uploads/a?b.png").is_err());
    }

    #[test]
    fn test_local_get_url_handles_trailing_slash() {
        let storage = LocalFileStorage::new(
            PathBuf::from("./storage/uploads"),
            "http://localhost:4000/files/".to_string(),
        );

        let url = storage.get_url("avatars/logo.png").unwrap();
        assert_eq!(url, "http://localhost:4000/files/avatars/logo.png");
    }

    #[tokio::test]
    async fn test_local_save_overwrites_existing_object() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(
            dir.path().to_path_buf(),
            "http://localhost:4000/files".to_string(),
        );

        storage
            .save("uploads/file.txt", b"first", "text/plain")
            .await
            .unwrap();
        let key = storage
            .save("uploads/file.txt", b"second", "text/plain")
            .await
            .unwrap();

        assert_eq!(key, "uploads/file.txt");
        let stored = std::fs::read(dir.path().join("uploads/file.txt")).unwrap();
        assert_eq!(stored, b"second");
    }

    #[tokio::test]
    async fn test_local_save_rejects_oversized_payload() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::with_max_size(
            dir.path().to_path_buf(),
            "http://localhost:4000/files".to_string(),
            4,
        );

        let result = storage.save("uploads/big.bin", b"12345", "application/octet-stream").await;
        assert!(matches!(
            result,
            Err(StorageError::InvalidFileSize { max_bytes: 4 })
        ));
        assert!(!dir.path().join("uploads/big.bin").exists());
    }

    #[test]
    fn test_supabase_public_url() {
        let url = supabase().get_url("avatars/1700000000000-me.png").unwrap();
        assert_eq!(
            url,
            "https://project.supabase.co/storage/v1/object/public/onlearn_uploads/avatars/1700000000000-me.png"
        );
    }

    #[test]
    fn test_supabase_upload_url() {
        let url = supabase().object_url(&[], "uploads/a.png").unwrap();
        assert_eq!(
            url.as_str(),
            "https://project.supabase.co/storage/v1/object/onlearn_uploads/uploads/a.png"
        );
    }
}
