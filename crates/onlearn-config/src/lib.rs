//! # OnLearn Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`server`]: bind address
//! - [`supabase`]: managed backend project URL and service credentials
//! - [`storage`]: upload backend, bucket and size limit
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//!
//! # Example
//!
//! ```ignore
//! use onlearn_config::{CorsConfig, ServerConfig, StorageConfig, SupabaseConfig};
//!
//! let server = ServerConfig::from_env();
//! let supabase = SupabaseConfig::from_env();
//! let storage = StorageConfig::from_env();
//! let cors = CorsConfig::from_env();
//! ```

pub mod cors;
pub mod server;
pub mod storage;
pub mod supabase;

pub use cors::CorsConfig;
pub use server::ServerConfig;
pub use storage::{StorageBackend, StorageConfig};
pub use supabase::SupabaseConfig;

/// Read a numeric environment variable, falling back to `default` when the
/// variable is unset or does not parse.
pub(crate) fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}
