//! Public read endpoints. No credential required; inactive and hidden
//! records never appear here.

use axum::extract::{Path, State};
use axum::response::Json;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::content::{AboutContent, FooterContent, Slider, ABOUT_DOC, FOOTER_DOC};
use crate::models::service::Service;
use crate::models::testimonial::Testimonial;
use crate::models::{content, service, testimonial};
use crate::state::AppState;
use crate::store::ListQuery;

pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "CareLink API",
            "version": version,
            "endpoints": {
                "public": "/services, /content/*, /testimonials",
                "account": "/api/auth/*, /api/bookings, /api/payments/intent (bearer token)",
                "admin": "/api/admin/* (admin role)",
            }
        }
    }))
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let now = chrono::Utc::now();

    // A cheap read doubles as a store reachability probe
    match state.store.get(content::COLLECTION, ABOUT_DOC).await {
        Ok(_) => Json(json!({
            "success": true,
            "data": { "status": "ok", "timestamp": now, "store": "ok" }
        })),
        Err(e) => {
            tracing::error!("health check failed: {}", e);
            Json(json!({
                "success": false,
                "data": { "status": "degraded", "timestamp": now, "store": "unreachable" }
            }))
        }
    }
}

/// GET /services - active services only
pub async fn services_list(State(state): State<AppState>) -> ApiResult<Vec<Service>> {
    let docs = state
        .store
        .list(
            service::COLLECTION,
            ListQuery::all().filter_eq("is_active", true),
        )
        .await?;

    let services = docs
        .iter()
        .map(|d| d.decode::<Service>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ApiResponse::success(services))
}

/// GET /services/:id - single active service. Inactive services 404 here
/// so the public surface never confirms they exist.
pub async fn service_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Service> {
    let doc = state
        .store
        .get(service::COLLECTION, &id)
        .await?
        .ok_or_else(|| ApiError::not_found("Service not found"))?;

    let service: Service = doc.decode()?;
    if !service.is_active {
        return Err(ApiError::not_found("Service not found"));
    }

    Ok(ApiResponse::success(service))
}

/// GET /content/about
pub async fn about_get(State(state): State<AppState>) -> ApiResult<AboutContent> {
    let doc = state
        .store
        .get(content::COLLECTION, ABOUT_DOC)
        .await?
        .ok_or_else(|| ApiError::not_found("About content not published"))?;

    Ok(ApiResponse::success(doc.decode()?))
}

/// GET /content/footer
pub async fn footer_get(State(state): State<AppState>) -> ApiResult<FooterContent> {
    let doc = state
        .store
        .get(content::COLLECTION, FOOTER_DOC)
        .await?
        .ok_or_else(|| ApiError::not_found("Footer content not published"))?;

    Ok(ApiResponse::success(doc.decode()?))
}

/// GET /content/sliders - ordered by position
pub async fn sliders_list(State(state): State<AppState>) -> ApiResult<Vec<Slider>> {
    let docs = state
        .store
        .list(
            content::SLIDERS_COLLECTION,
            ListQuery::all().order_asc("position"),
        )
        .await?;

    let sliders = docs
        .iter()
        .map(|d| d.decode::<Slider>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ApiResponse::success(sliders))
}

/// GET /testimonials - visible entries in store-insertion order.
/// Visibility is filtered here rather than in the store query so documents
/// predating the flag still show up.
pub async fn testimonials_list(State(state): State<AppState>) -> ApiResult<Vec<Testimonial>> {
    let docs = state
        .store
        .list(testimonial::COLLECTION, ListQuery::all())
        .await?;

    let testimonials = docs
        .iter()
        .map(|d| d.decode::<Testimonial>())
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .filter(|t| t.is_visible)
        .collect();

    Ok(ApiResponse::success(testimonials))
}
