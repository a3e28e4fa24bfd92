//! # OnLearn Core
//!
//! Core types shared by every OnLearn crate:
//!
//! - [`errors`]: the application error type and its JSON rendering
//! - [`file_storage`]: object storage abstraction with Supabase and local backends
//! - [`serde`]: custom deserialization helpers for request bodies
//!
//! # Example
//!
//! ```ignore
//! use onlearn_core::AppError;
//!
//! let error = AppError::not_found("Course not found");
//! ```

pub mod errors;
pub mod file_storage;
pub mod serde;

pub use errors::{AppError, ErrorResponse};
pub use file_storage::{FileStorage, LocalFileStorage, StorageError, SupabaseStorage};
