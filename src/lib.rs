//! # OnLearn API
//!
//! REST backend for the OnLearn course marketplace, built with Axum and
//! PostgreSQL. Identity and file storage are delegated to a managed
//! backend (Supabase Auth and Supabase Storage).
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Auth pipeline and the route policy table
//! ├── modules/          # Feature modules
//! │   ├── courses/     # Catalogue, moderation, ownership rules
//! │   ├── lessons/     # Lessons nested under a course
//! │   ├── enrollments/ # Caller's enrollments and progress
//! │   ├── users/       # Profile administration
//! │   ├── uploads/     # Multipart uploads to object storage
//! │   └── system/      # Health and API index
//! ├── docs.rs           # OpenAPI document
//! ├── logging.rs        # Tracing setup and request logging
//! ├── metrics.rs        # Prometheus metrics
//! ├── router.rs         # Main application router
//! ├── state.rs          # Shared application state
//! └── validator.rs      # Validated JSON extractor
//! ```
//!
//! Each feature module has a `controller.rs` (HTTP handlers), a
//! `service.rs` (queries and business rules) and a `router.rs`.
//!
//! ## Roles
//!
//! | Role | Can |
//! |------|-----|
//! | client | browse, enroll, track progress |
//! | pending_instructor | same as client, waiting for approval |
//! | instructor | manage own courses and their lessons |
//! | admin | everything, plus moderation and user management |
//!
//! Route access is declared in [`middleware::role::POLICIES`].
//!
//! ## API Documentation
//!
//! - Swagger UI: `http://localhost:4000/swagger-ui`
//! - Scalar: `http://localhost:4000/scalar`

pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

pub use onlearn_auth;
pub use onlearn_config;
pub use onlearn_core;
pub use onlearn_db;
pub use onlearn_models;
