//! Admin content management: the about/footer singletons and the slider
//! collection.

use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::content::{
    AboutContent, FooterContent, Slider, SliderPayload, ABOUT_DOC, COLLECTION, FOOTER_DOC,
    SLIDERS_COLLECTION,
};
use crate::state::AppState;

/// PUT /api/admin/content/about - replace the about singleton
pub async fn about_put(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<AboutContent> {
    let content = AboutContent::parse(&body)?;

    let fields = serde_json::to_value(&content)
        .map_err(|e| ApiError::internal_server_error(e.to_string()))?;
    state.store.put(COLLECTION, ABOUT_DOC, fields).await?;

    Ok(ApiResponse::success(content))
}

/// PUT /api/admin/content/footer - replace the footer singleton
pub async fn footer_put(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<FooterContent> {
    let content = FooterContent::parse(&body)?;

    let fields = serde_json::to_value(&content)
        .map_err(|e| ApiError::internal_server_error(e.to_string()))?;
    state.store.put(COLLECTION, FOOTER_DOC, fields).await?;

    Ok(ApiResponse::success(content))
}

/// POST /api/admin/content/sliders
pub async fn slider_create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<Slider> {
    let slider = SliderPayload::parse(&body)?.into_slider();

    let fields = serde_json::to_value(&slider)
        .map_err(|e| ApiError::internal_server_error(e.to_string()))?;
    state
        .store
        .put(SLIDERS_COLLECTION, &slider.id, fields)
        .await?;

    Ok(ApiResponse::created(slider))
}

/// PUT /api/admin/content/sliders/:id
pub async fn slider_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<Slider> {
    let payload = SliderPayload::parse(&body)?;

    state
        .store
        .get(SLIDERS_COLLECTION, &id)
        .await?
        .ok_or_else(|| ApiError::not_found("Slider not found"))?;

    let slider = Slider {
        id: id.clone(),
        title: payload.title,
        subtitle: payload.subtitle,
        image_url: payload.image_url,
        position: payload.position,
    };

    let fields = serde_json::to_value(&slider)
        .map_err(|e| ApiError::internal_server_error(e.to_string()))?;
    state.store.put(SLIDERS_COLLECTION, &id, fields).await?;

    Ok(ApiResponse::success(slider))
}

/// DELETE /api/admin/content/sliders/:id
pub async fn slider_delete(
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
        .get(SLIDERS_COLLECTION, &id)
        .await?
        .ok_or_else(|| ApiError::not_found("Slider not found"))?;

    state.store.delete(SLIDERS_COLLECTION, &id).await?;

    Ok(ApiResponse::success(json!({ "deleted": id })))
}
