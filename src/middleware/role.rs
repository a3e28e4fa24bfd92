//! Route policies and the role gate.
//!
//! [`POLICIES`] is the single place where route access is declared. Routes
//! under `/api` without an entry require authentication but no particular
//! role.

use axum::http::Method;
use onlearn_core::AppError;
use onlearn_models::{Profile, Role};

/// Who may call a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Roles(&'static [Role]),
}

#[derive(Debug, Clone, Copy)]
pub struct RoutePolicy {
    pub method: &'static str,
    /// Route pattern as registered, including the `/api` prefix.
    pub path: &'static str,
    pub access: Access,
}

const INSTRUCTOR_OR_ADMIN: &[Role] = &[Role::Instructor, Role::Admin];
const ADMIN_ONLY: &[Role] = &[Role::Admin];

const fn policy(method: &'static str, path: &'static str, access: Access) -> RoutePolicy {
    RoutePolicy {
        method,
        path,
        access,
    }
}

pub const POLICIES: &[RoutePolicy] = &[
    // Courses
    policy("GET", "/api/courses", Access::Public),
    policy("GET", "/api/courses/published", Access::Public),
    policy("GET", "/api/courses/popular", Access::Public),
    policy("GET", "/api/courses/categories", Access::Public),
    policy("POST", "/api/courses", Access::Roles(INSTRUCTOR_OR_ADMIN)),
    policy("PATCH", "/api/courses/{id}", Access::Roles(INSTRUCTOR_OR_ADMIN)),
    policy("DELETE", "/api/courses/{id}", Access::Roles(INSTRUCTOR_OR_ADMIN)),
    policy("PATCH", "/api/courses/{id}/approve", Access::Roles(ADMIN_ONLY)),
    policy("PATCH", "/api/courses/{id}/reject", Access::Roles(ADMIN_ONLY)),
    // Lessons
    policy("GET", "/api/courses/{id}/lessons", Access::Public),
    policy(
        "POST",
        "/api/courses/{id}/lessons",
        Access::Roles(INSTRUCTOR_OR_ADMIN),
    ),
    policy(
        "PATCH",
        "/api/courses/{id}/lessons/{lesson_id}",
        Access::Roles(INSTRUCTOR_OR_ADMIN),
    ),
    policy(
        "DELETE",
        "/api/courses/{id}/lessons/{lesson_id}",
        Access::Roles(INSTRUCTOR_OR_ADMIN),
    ),
    // Enrollments
    policy("GET", "/api/enrollments/me", Access::Authenticated),
    policy("POST", "/api/enrollments", Access::Authenticated),
    policy(
        "PATCH",
        "/api/enrollments/{course_id}/progress",
        Access::Authenticated,
    ),
    // Users
    policy("GET", "/api/users", Access::Roles(ADMIN_ONLY)),
    policy("GET", "/api/users/pending-teachers", Access::Roles(ADMIN_ONLY)),
    policy(
        "PATCH",
        "/api/users/approve-teacher/{id}",
        Access::Roles(ADMIN_ONLY),
    ),
    policy(
        "PATCH",
        "/api/users/reject-teacher/{id}",
        Access::Roles(ADMIN_ONLY),
    ),
    policy("DELETE", "/api/users/{id}", Access::Roles(ADMIN_ONLY)),
    // Uploads are open to anonymous callers
    policy("POST", "/api/upload", Access::Public),
];

/// Look up the access rule for a matched route.
///
/// A trailing slash on the pattern is ignored, so `/api/courses/` and
/// `/api/courses` share a policy. Unknown routes require authentication.
pub fn policy_for(method: &Method, path: Option<&str>) -> Access {
    let Some(path) = path else {
        return Access::Authenticated;
    };

    let path = match path.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => path,
    };

    POLICIES
        .iter()
        .find(|p| p.method == method.as_str() && p.path == path)
        .map(|p| p.access)
        .unwrap_or(Access::Authenticated)
}

/// Check the caller's role against an allow-list.
///
/// Returns the caller's role when it is allowed.
pub fn check_role(profile: Option<&Profile>, allowed: &[Role]) -> Result<Role, AppError> {
    let role = profile
        .and_then(|p| p.role)
        .ok_or_else(|| AppError::forbidden("no role assigned"))?;

    if !allowed.contains(&role) {
        return Err(AppError::forbidden("insufficient role"));
    }

    Ok(role)
}
