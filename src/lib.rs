pub mod activity;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod payments;
pub mod state;
pub mod store;

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Assemble the full application router. Takes the wired state so tests can
/// drive the exact production routing with fakes behind the seams.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(public_routes())
        .merge(session_routes())
        .merge(account_routes(&state))
        .merge(admin_routes(&state))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    use handlers::public;

    Router::new()
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .route("/services", get(public::services_list))
        .route("/services/:id", get(public::service_get))
        .route("/content/about", get(public::about_get))
        .route("/content/footer", get(public::footer_get))
        .route("/content/sliders", get(public::sliders_list))
        .route("/testimonials", get(public::testimonials_list))
}

/// Session sync verifies the bearer token itself (the profile may not exist
/// yet on first login), so it stays outside the auth middleware.
fn session_routes() -> Router<AppState> {
    use handlers::account;

    Router::new().route("/api/auth/session", post(account::session_sync))
}

fn account_routes(state: &AppState) -> Router<AppState> {
    use handlers::account;

    Router::new()
        .route("/api/auth/whoami", get(account::whoami))
        .route(
            "/api/bookings",
            get(account::my_bookings).post(account::booking_create),
        )
        .route("/api/payments/intent", post(account::payment_intent))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::authenticate,
        ))
}

fn admin_routes(state: &AppState) -> Router<AppState> {
    use handlers::admin::{activities, bookings, content, services, testimonials, users};

    Router::new()
        .route(
            "/api/admin/services",
            get(services::list).post(services::create),
        )
        .route(
            "/api/admin/services/:id",
            put(services::update).delete(services::delete),
        )
        .route("/api/admin/bookings", get(bookings::list))
        .route("/api/admin/bookings/:id/status", put(bookings::update_status))
        .route("/api/admin/bookings/:id", delete(bookings::delete))
        .route("/api/admin/users", get(users::list))
        .route(
            "/api/admin/users/:id",
            put(users::update).delete(users::delete),
        )
        .route("/api/admin/content/about", put(content::about_put))
        .route("/api/admin/content/footer", put(content::footer_put))
        .route("/api/admin/content/sliders", post(content::slider_create))
        .route(
            "/api/admin/content/sliders/:id",
            put(content::slider_update).delete(content::slider_delete),
        )
        .route(
            "/api/admin/testimonials",
            get(testimonials::list).post(testimonials::create),
        )
        .route(
            "/api/admin/testimonials/:id",
            put(testimonials::update).delete(testimonials::delete),
        )
        .route("/api/admin/activities", get(activities::list))
        // Innermost layer runs last: authenticate, then check the tier
        .layer(axum::middleware::from_fn(middleware::require_admin))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::authenticate,
        ))
}
