//! Admin CRUD for testimonials. Hidden entries are visible here.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::testimonial::{Testimonial, TestimonialPayload, COLLECTION};
use crate::state::AppState;
use crate::store::ListQuery;

/// GET /api/admin/testimonials - all entries, hidden included
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Testimonial>> {
    let docs = state
        .store
        .list(COLLECTION, ListQuery::all().order_desc("created_at"))
        .await?;

    let testimonials = docs
        .iter()
        .map(|d| d.decode::<Testimonial>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ApiResponse::success(testimonials))
}

/// POST /api/admin/testimonials
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<Testimonial> {
    let testimonial = TestimonialPayload::parse(&body)?.into_testimonial(Utc::now());

    let fields = serde_json::to_value(&testimonial)
        .map_err(|e| ApiError::internal_server_error(e.to_string()))?;
    state.store.put(COLLECTION, &testimonial.id, fields).await?;

    Ok(ApiResponse::created(testimonial))
}

/// PUT /api/admin/testimonials/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<Testimonial> {
    let payload = TestimonialPayload::parse(&body)?;

    state
        .store
        .get(COLLECTION, &id)
        .await?
        .ok_or_else(|| ApiError::not_found("Testimonial not found"))?;

    state
        .store
        .update(COLLECTION, &id, payload.into_patch())
        .await?;

    let doc = state
        .store
        .get(COLLECTION, &id)
        .await?
        .ok_or_else(|| ApiError::not_found("Testimonial not found"))?;

    Ok(ApiResponse::success(doc.decode()?))
}

/// DELETE /api/admin/testimonials/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    if id.trim().is_empty() {
        let mut errors = std::collections::HashMap::new();
        errors.insert("id".to_string(), "is required".to_string());
        return Err(ApiError::validation_error("Invalid request payload", Some(errors)));
    }

    state
        .store
        .get(COLLECTION, &id)
        .await?
        .ok_or_else(|| ApiError::not_found("Testimonial not found"))?;

    state.store.delete(COLLECTION, &id).await?;

    Ok(ApiResponse::success(json!({ "deleted": id })))
}
