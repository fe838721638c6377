//! Admin user management. The tier middleware has already established the
//! caller is at least `admin`; the per-record escalation rules live in
//! [`crate::auth::guard`].

use axum::extract::{Path, State};
use axum::{Extension, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::auth::guard::{ensure_can_delete_user, ensure_can_update_user};
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::activity::ActivityCategory;
use crate::models::user::{UserProfile, UserUpdate, COLLECTION};
use crate::state::AppState;
use crate::store::ListQuery;

/// GET /api/admin/users
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<UserProfile>> {
    let docs = state
        .store
        .list(COLLECTION, ListQuery::all().order_desc("created_at"))
        .await?;

    let users = docs
        .iter()
        .map(|d| d.decode::<UserProfile>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ApiResponse::success(users))
}

/// PUT /api/admin/users/:id - profile fields and (guarded) role changes
pub async fn update(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<UserProfile> {
    let update = UserUpdate::parse(&body)?;

    // Self role changes are refused before we even look at the store
    if caller.id == id && update.role.is_some() {
        return Err(ApiError::forbidden("You cannot change your own role"));
    }

    let doc = state
        .store
        .get(COLLECTION, &id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    let target: UserProfile = doc.decode()?;

    ensure_can_update_user(&caller, &target, update.role)?;

    let role_changed = update.role.filter(|r| *r != target.role);
    state
        .store
        .update(COLLECTION, &id, update.into_patch(Utc::now()))
        .await?;

    let doc = state
        .store
        .get(COLLECTION, &id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    let updated: UserProfile = doc.decode()?;

    if let Some(new_role) = role_changed {
        state
            .activity
            .record(
                &caller,
                ActivityCategory::User,
                "user_role_updated",
                format!("User {} role set to {}", updated.email, new_role),
            )
            .await;
    }

    Ok(ApiResponse::success(updated))
}

/// DELETE /api/admin/users/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    if id.trim().is_empty() {
        let mut errors = std::collections::HashMap::new();
        errors.insert("id".to_string(), "is required".to_string());
        return Err(ApiError::validation_error("Invalid request payload", Some(errors)));
    }

    // Self-deletion needs no store round-trip to refuse
    if caller.id == id {
        return Err(ApiError::forbidden("You cannot delete your own account"));
    }

    let doc = state
        .store
        .get(COLLECTION, &id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    let target: UserProfile = doc.decode()?;

    ensure_can_delete_user(&caller, &target)?;

    state.store.delete(COLLECTION, &id).await?;

    state
        .activity
        .record(
            &caller,
            ActivityCategory::User,
            "user_deleted",
            format!("User {} deleted", target.email),
        )
        .await;

    Ok(ApiResponse::success(json!({ "deleted": id })))
}
