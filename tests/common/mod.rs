//! Shared test harness: the production router wired to in-memory fakes,
//! plus seeding and request helpers.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;

use carelink_api::auth::Claims;
use carelink_api::config::{
    AppConfig, Environment, PaymentsConfig, SecurityConfig, ServerConfig, StoreConfig,
};
use carelink_api::payments::{PaymentError, PaymentIntent, PaymentProvider};
use carelink_api::state::AppState;
use carelink_api::store::{DocumentStore, MemoryStore};

pub const JWT_SECRET: &str = "integration-test-secret";

/// Recording payment provider fake
#[derive(Default)]
pub struct FakePayments {
    pub calls: Mutex<Vec<(i64, String, String)>>,
}

#[async_trait]
impl PaymentProvider for FakePayments {
    async fn create_intent(
        &self,
        amount_minor: i64,
        currency: &str,
        user_id: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        self.calls
            .lock()
            .unwrap()
            .push((amount_minor, currency.to_string(), user_id.to_string()));
        Ok(PaymentIntent {
            id: "pi_test_123".to_string(),
            client_secret: "pi_test_123_secret".to_string(),
        })
    }
}

pub struct TestApp {
    pub app: Router,
    pub store: Arc<MemoryStore>,
    pub payments: Arc<FakePayments>,
}

fn test_config() -> AppConfig {
    AppConfig {
        environment: Environment::Development,
        server: ServerConfig { port: 0 },
        security: SecurityConfig {
            jwt_secret: JWT_SECRET.to_string(),
        },
        store: StoreConfig {
            base_url: "http://store.invalid".to_string(),
            api_key: String::new(),
        },
        payments: PaymentsConfig {
            base_url: "http://payments.invalid".to_string(),
            secret_key: "sk_test".to_string(),
            currency: "usd".to_string(),
        },
    }
}

pub fn spawn_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let payments = Arc::new(FakePayments::default());
    let state = AppState::new(test_config(), store.clone(), payments.clone());
    TestApp {
        app: carelink_api::app(state),
        store,
        payments,
    }
}

/// Mint a bearer token the way the identity service would
pub fn token(uid: &str, email: &str) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: uid.to_string(),
        email: email.to_string(),
        exp: (now + Duration::hours(1)).timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn expired_token(uid: &str, email: &str) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: uid.to_string(),
        email: email.to_string(),
        exp: (now - Duration::hours(2)).timestamp(),
        iat: (now - Duration::hours(3)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

pub async fn seed_user(store: &MemoryStore, uid: &str, email: &str, role: &str) {
    store
        .put(
            "users",
            uid,
            json!({
                "uid": uid,
                "email": email,
                "role": role,
                "name": null,
                "created_at": Utc::now(),
                "updated_at": Utc::now(),
            }),
        )
        .await
        .unwrap();
}

pub async fn seed_service(store: &MemoryStore, id: &str, title: &str, active: bool) {
    store
        .put(
            "services",
            id,
            json!({
                "id": id,
                "title": title,
                "description": "In-home support by licensed caregivers",
                "price_per_hr": 24.0,
                "features": ["meal prep"],
                "is_active": active,
                "created_at": Utc::now(),
                "updated_at": Utc::now(),
            }),
        )
        .await
        .unwrap();
}

pub async fn seed_booking(store: &MemoryStore, id: &str, user_id: &str, status: &str) {
    store
        .put(
            "bookings",
            id,
            json!({
                "id": id,
                "user_id": user_id,
                "service_id": "svc-1",
                "service_name": "Elder Care",
                "scheduled_date": "2025-03-01",
                "scheduled_time": "09:00",
                "hours": 3.0,
                "address": "12 Elm St",
                "total_cost": 72.0,
                "status": status,
                "created_at": Utc::now(),
            }),
        )
        .await
        .unwrap();
}

pub async fn seed_testimonial(store: &MemoryStore, id: &str, visible: Option<bool>) {
    let mut fields = json!({
        "id": id,
        "author_name": "Priya",
        "content": "Wonderful caregivers.",
        "created_at": Utc::now(),
    });
    if let Some(visible) = visible {
        fields["is_visible"] = json!(visible);
    }
    store.put("testimonials", id, fields).await.unwrap();
}

/// One-shot a request through the router and decode the JSON body
pub async fn send(
    app: &Router,
    method: &str,
    path: &str,
    bearer: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}
