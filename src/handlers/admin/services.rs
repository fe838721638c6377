//! Admin CRUD for services.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use chrono::Utc;
use serde_json::Value;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::activity::ActivityCategory;
use crate::models::service::{Service, ServicePayload, COLLECTION};
use crate::state::AppState;
use crate::store::ListQuery;

/// GET /api/admin/services - every service, inactive included
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Service>> {
    let docs = state
        .store
        .list(COLLECTION, ListQuery::all().order_desc("created_at"))
        .await?;

    let services = docs
        .iter()
        .map(|d| d.decode::<Service>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ApiResponse::success(services))
}

/// POST /api/admin/services
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<Value>,
) -> ApiResult<Service> {
    let service = ServicePayload::parse(&body)?.into_service(Utc::now());

    let fields = serde_json::to_value(&service)
        .map_err(|e| ApiError::internal_server_error(e.to_string()))?;
    state.store.put(COLLECTION, &service.id, fields).await?;

    state
        .activity
        .record(
            &user,
            ActivityCategory::System,
            "service_created",
            format!("Service '{}' created", service.title),
        )
        .await;

    Ok(ApiResponse::created(service))
}

/// PUT /api/admin/services/:id - full replacement of the editable fields
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<Service> {
    let payload = ServicePayload::parse(&body)?;

    state
        .store
        .get(COLLECTION, &id)
        .await?
        .ok_or_else(|| ApiError::not_found("Service not found"))?;

    state
        .store
        .update(COLLECTION, &id, payload.into_patch(Utc::now()))
        .await?;

    let doc = state
        .store
        .get(COLLECTION, &id)
        .await?
        .ok_or_else(|| ApiError::not_found("Service not found"))?;
    let service: Service = doc.decode()?;

    state
        .activity
        .record(
            &user,
            ActivityCategory::System,
            "service_updated",
            format!("Service '{}' updated", service.title),
        )
        .await;

    Ok(ApiResponse::success(service))
}

/// DELETE /api/admin/services/:id
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
        .ok_or_else(|| ApiError::not_found("Service not found"))?;
    let service: Service = doc.decode()?;

    state.store.delete(COLLECTION, &id).await?;

    state
        .activity
        .record(
            &user,
            ActivityCategory::System,
            "service_deleted",
            format!("Service '{}' deleted", service.title),
        )
        .await;

    Ok(ApiResponse::success(serde_json::json!({ "deleted": id })))
}
