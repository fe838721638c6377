//! Authenticated (user-tier) endpoints: session sync, whoami, the booking
//! checkout flow, and the payment-intent bridge.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::{Extension, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::auth::{extract_bearer, AuthUser};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::activity::ActivityCategory;
use crate::models::booking::{Booking, NewBooking};
use crate::models::service::Service;
use crate::models::user::{Role, UserProfile};
use crate::models::{booking, service, user};
use crate::payments::to_minor_units;
use crate::state::AppState;
use crate::store::ListQuery;

/// POST /api/auth/session - sync the caller's profile from a verified token.
///
/// This route verifies the bearer token itself instead of sitting behind the
/// auth middleware: on first login there is no profile document yet, and the
/// middleware would reject the request before we could create one.
pub async fn session_sync(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Option<Json<Value>>,
) -> ApiResult<UserProfile> {
    let header_value = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok());
    let token = extract_bearer(header_value).map_err(ApiError::unauthorized)?;
    let claims = state
        .verifier
        .verify(token)
        .map_err(ApiError::unauthorized)?;

    let body = body.map(|Json(v)| v).unwrap_or(Value::Null);
    let name = body
        .get("name")
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let now = Utc::now();
    let existing = state.store.get(user::COLLECTION, &claims.sub).await?;

    let profile = match existing {
        Some(doc) => {
            let stored: UserProfile = doc.decode()?;
            let mut patch = json!({
                "email": claims.email.clone(),
                "updated_at": now,
            });
            if let Some(name) = &name {
                patch["name"] = json!(name);
            }
            state
                .store
                .update(user::COLLECTION, &claims.sub, patch)
                .await?;
            UserProfile {
                email: claims.email,
                name: name.or(stored.name),
                updated_at: now,
                ..stored
            }
        }
        None => {
            // First login creates the profile at the lowest tier
            let profile = UserProfile {
                uid: claims.sub.clone(),
                email: claims.email,
                role: Role::User,
                name,
                phone: None,
                address: None,
                created_at: now,
                updated_at: now,
            };
            let fields = serde_json::to_value(&profile)
                .map_err(|e| ApiError::internal_server_error(e.to_string()))?;
            state.store.put(user::COLLECTION, &claims.sub, fields).await?;
            profile
        }
    };

    Ok(ApiResponse::success(profile))
}

/// GET /api/auth/whoami - the verified identity for the presented token
pub async fn whoami(Extension(user): Extension<AuthUser>) -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({
        "id": user.id,
        "email": user.email,
        "role": user.role,
        "name": user.name,
    })))
}

/// GET /api/bookings - the caller's own bookings, newest first
pub async fn my_bookings(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Vec<Booking>> {
    let docs = state
        .store
        .list(
            booking::COLLECTION,
            ListQuery::all()
                .filter_eq("user_id", user.id.as_str())
                .order_desc("created_at"),
        )
        .await?;

    let bookings = docs
        .iter()
        .map(|d| d.decode::<Booking>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ApiResponse::success(bookings))
}

/// POST /api/bookings - checkout: create a pending booking for an active
/// service. Cost and the service-name snapshot come from the service
/// document at creation time.
pub async fn booking_create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<Value>,
) -> ApiResult<Booking> {
    let payload = NewBooking::parse(&body)?;

    let doc = state
        .store
        .get(service::COLLECTION, &payload.service_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Service not found"))?;
    let service: Service = doc.decode()?;

    if !service.is_active {
        let mut errors = std::collections::HashMap::new();
        errors.insert(
            "service_id".to_string(),
            "this service is not available for booking".to_string(),
        );
        return Err(ApiError::validation_error("Invalid request payload", Some(errors)));
    }

    let new_booking = payload.into_booking(
        &user.id,
        &service.title,
        service.price_per_hr,
        Utc::now(),
    );

    let fields = serde_json::to_value(&new_booking)
        .map_err(|e| ApiError::internal_server_error(e.to_string()))?;
    state
        .store
        .put(booking::COLLECTION, &new_booking.id, fields)
        .await?;

    state
        .activity
        .record(
            &user,
            ActivityCategory::Order,
            "booking_created",
            format!(
                "Booking {} created for {} on {}",
                new_booking.id, new_booking.service_name, new_booking.scheduled_date
            ),
        )
        .await;

    Ok(ApiResponse::created(new_booking))
}

/// POST /api/payments/intent - create a payment intent with the hosted
/// processor and hand the client secret back to the browser. Nothing is
/// persisted locally.
pub async fn payment_intent(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<Value>,
) -> ApiResult<Value> {
    let amount = match body.get("amount").and_then(Value::as_f64) {
        Some(amount) => amount,
        None => {
            let mut errors = std::collections::HashMap::new();
            errors.insert("amount".to_string(), "must be a number".to_string());
            return Err(ApiError::validation_error("Invalid payment amount", Some(errors)));
        }
    };

    let amount_minor = to_minor_units(amount)?;
    let currency = &state.config.payments.currency;

    let intent = state
        .payments
        .create_intent(amount_minor, currency, &user.id)
        .await?;

    Ok(ApiResponse::success(json!({
        "intent_id": intent.id,
        "client_secret": intent.client_secret,
    })))
}
