//! Admin booking management: listing with customer enrichment, status
//! transitions, and deletion.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::activity::ActivityCategory;
use crate::models::booking::{attach_customer, Booking, EnrichedBooking, StatusUpdate, COLLECTION};
use crate::models::user::{UserProfile, COLLECTION as USERS};
use crate::state::AppState;
use crate::store::ListQuery;

/// GET /api/admin/bookings - all bookings newest first, with the owning
/// user's contact details joined in at read time
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<EnrichedBooking>> {
    let docs = state
        .store
        .list(COLLECTION, ListQuery::all().order_desc("created_at"))
        .await?;

    let mut enriched = Vec::with_capacity(docs.len());
    for doc in &docs {
        let booking: Booking = doc.decode()?;
        let owner = match state.store.get(USERS, &booking.user_id).await? {
            Some(user_doc) => Some(user_doc.decode::<UserProfile>()?),
            None => None,
        };
        enriched.push(attach_customer(booking, owner.as_ref()));
    }

    Ok(ApiResponse::success(enriched))
}

/// PUT /api/admin/bookings/:id/status - transition a booking and append an
/// order audit record. The audit append runs only after the status write
/// succeeds and is best-effort from there.
pub async fn update_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<Booking> {
    let update = StatusUpdate::parse(&body)?;

    let doc = state
        .store
        .get(COLLECTION, &id)
        .await?
        .ok_or_else(|| ApiError::not_found("Booking not found"))?;
    let mut booking: Booking = doc.decode()?;

    state
        .store
        .update(COLLECTION, &id, json!({ "status": update.status }))
        .await?;
    booking.status = update.status;

    state
        .activity
        .record(
            &user,
            ActivityCategory::Order,
            "booking_status_updated",
            format!("Booking {} set to {}", booking.id, update.status),
        )
        .await;

    Ok(ApiResponse::success(booking))
}

/// DELETE /api/admin/bookings/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    if id.trim().is_empty() {
        let mut errors = std::collections::HashMap::new();
        errors.insert("id".to_string(), "is required".to_string());
        return Err(ApiError::validation_error("Invalid request payload", Some(errors)));
    }

    let doc = state
        .store
        .get(COLLECTION, &id)
        .await?
        .ok_or_else(|| ApiError::not_found("Booking not found"))?;
    let booking: Booking = doc.decode()?;

    state.store.delete(COLLECTION, &id).await?;

    state
        .activity
        .record(
            &user,
            ActivityCategory::Order,
            "booking_deleted",
            format!("Booking {} ({}) deleted", booking.id, booking.service_name),
        )
        .await;

    Ok(ApiResponse::success(json!({ "deleted": id })))
}
