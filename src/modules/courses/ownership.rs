//! Who may modify a course once the role gate has let the caller through.
//!
//! The rules differ per operation:
//!
//! | Operation | instructor | admin |
//! |---|---|---|
//! | create for someone else | 403 | allowed |
//! | update | owner only | any course |
//! | delete | owner only | any course |
//! | lessons | owner only | any course |

use onlearn_core::AppError;
use uuid::Uuid;

use crate::middleware::auth::AuthContext;

/// Owner of a new course: the caller unless an admin names someone else.
pub fn resolve_owner(actor: &AuthContext, requested: Option<Uuid>) -> Result<Uuid, AppError> {
    match requested {
        Some(owner) if owner != actor.user_id() && !actor.is_admin() => Err(AppError::forbidden(
            "Not allowed to create courses for another instructor",
        )),
        Some(owner) => Ok(owner),
        None => Ok(actor.user_id()),
    }
}

/// Only the `instructor` role is held to ownership; every other role that
/// reached the handler passes.
pub fn ensure_can_edit(actor: &AuthContext, owner: Uuid) -> Result<(), AppError> {
    if actor.is_instructor() && owner != actor.user_id() {
        return Err(AppError::forbidden("Not allowed to edit this course"));
    }
    Ok(())
}

/// Anyone but an admin must own the course.
pub fn ensure_can_delete(actor: &AuthContext, owner: Uuid) -> Result<(), AppError> {
    if !actor.is_admin() && owner != actor.user_id() {
        return Err(AppError::forbidden("Not allowed to delete this course"));
    }
    Ok(())
}
