//! Request authentication and authorization.
//!
//! Every request under `/api` runs through one pipeline, driven by the
//! declarative policy table in [`role`]:
//!
//! 1. The matched route pattern is looked up in [`role::POLICIES`]
//! 2. `Public` routes go straight to the handler
//! 3. Otherwise the bearer token is verified with the identity provider
//!    (401 on failure) and the caller's profile is loaded
//! 4. `Roles(..)` routes check the profile role against the allow-list (403)
//! 5. The resulting [`auth::AuthContext`] is handed to the handler
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::AuthContext;
//!
//! async fn list_my_enrollments(auth: AuthContext) -> impl IntoResponse {
//!     let user_id = auth.user_id();
//!     // ...
//! }
//! ```

pub mod auth;
pub mod role;
