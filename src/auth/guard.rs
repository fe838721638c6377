//! Role-escalation and self-action guards for the admin user handlers.
//!
//! These run after tier middleware has already established the caller holds
//! at least `admin`, and enforce the finer-grained rules that depend on the
//! target record. All pure functions; violations are `403 Forbidden` with a
//! human-readable reason.

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::models::user::{Role, UserProfile};

/// Rules for updating another user document.
///
/// - nobody edits their own role field;
/// - granting `super_admin` requires holding `super_admin`;
/// - touching an existing `super_admin` record requires `super_admin`.
pub fn ensure_can_update_user(
    caller: &AuthUser,
    target: &UserProfile,
    requested_role: Option<Role>,
) -> Result<(), ApiError> {
    if caller.id == target.uid && requested_role.is_some() {
        return Err(ApiError::forbidden("You cannot change your own role"));
    }

    if target.role == Role::SuperAdmin && caller.role != Role::SuperAdmin {
        return Err(ApiError::forbidden(
            "Only a super admin can modify a super admin account",
        ));
    }

    if requested_role == Some(Role::SuperAdmin) && caller.role != Role::SuperAdmin {
        return Err(ApiError::forbidden(
            "Only a super admin can grant the super admin role",
        ));
    }

    Ok(())
}

/// Rules for deleting a user document: no self-deletion, and removing a
/// `super_admin` requires holding `super_admin`.
pub fn ensure_can_delete_user(caller: &AuthUser, target: &UserProfile) -> Result<(), ApiError> {
    if caller.id == target.uid {
        return Err(ApiError::forbidden("You cannot delete your own account"));
    }

    if target.role == Role::SuperAdmin && caller.role != Role::SuperAdmin {
        return Err(ApiError::forbidden(
            "Only a super admin can delete a super admin account",
        ));
    }

    Ok(())
}
