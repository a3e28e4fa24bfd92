//! Upload storage settings.
//!
//! # Environment Variables
//!
//! - `STORAGE_BACKEND`: `supabase` (default) or `local`
//! - `STORAGE_BUCKET`: bucket name for the Supabase backend (default: `onlearn_uploads`)
//! - `STORAGE_LOCAL_DIR`: directory for the local backend (default: `storage/uploads`)
//! - `STORAGE_PUBLIC_BASE_URL`: URL prefix the local backend is served under
//!   (default: `http://localhost:4000/files`)
//! - `UPLOAD_MAX_BYTES`: largest accepted upload (default: 50 MiB)

use std::env;
use std::path::PathBuf;

use crate::env_parse;

pub const DEFAULT_BUCKET: &str = "onlearn_uploads";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Supabase,
    Local,
}

impl StorageBackend {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "supabase" => Some(Self::Supabase),
            "local" => Some(Self::Local),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Supabase => "supabase",
            Self::Local => "local",
        }
    }
}

#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub bucket: String,
    pub local_dir: PathBuf,
    pub public_base_url: String,
    pub max_upload_bytes: usize,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        let backend = env::var("STORAGE_BACKEND")
            .ok()
            .and_then(|raw| StorageBackend::parse(&raw))
            .unwrap_or(StorageBackend::Supabase);

        Self {
            backend,
            bucket: env::var("STORAGE_BUCKET").unwrap_or_else(|_| DEFAULT_BUCKET.to_string()),
            local_dir: env::var("STORAGE_LOCAL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("storage/uploads")),
            public_base_url: env::var("STORAGE_PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:4000/files".to_string()),
            max_upload_bytes: env_parse("UPLOAD_MAX_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
        }
    }

    /// Local backend rooted at `dir`, mainly for tests.
    pub fn local(dir: PathBuf, public_base_url: impl Into<String>) -> Self {
        Self {
            backend: StorageBackend::Local,
            bucket: DEFAULT_BUCKET.to_string(),
            local_dir: dir,
            public_base_url: public_base_url.into(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}
