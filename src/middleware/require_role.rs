use axum::{extract::Request, middleware::Next, response::Response};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::models::user::Role;

/// Gate a route group behind a minimum role tier. Runs after
/// [`super::authenticate`]; a missing identity here means the auth layer was
/// never applied, which is reported as unauthenticated rather than a server
/// error so the two failure modes stay distinguishable for clients.
async fn require_tier(tier: Role, request: Request, next: Next) -> Result<Response, ApiError> {
    let user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

    if user.role < tier {
        tracing::debug!(user = %user.id, role = %user.role, required = %tier, "insufficient role");
        return Err(ApiError::forbidden(format!(
            "{} access required",
            tier_label(tier)
        )));
    }

    Ok(next.run(request).await)
}

fn tier_label(tier: Role) -> &'static str {
    match tier {
        Role::User => "Authenticated",
        Role::Admin => "Admin",
        Role::SuperAdmin => "Super admin",
    }
}

/// Admin tier: accepts `admin` and `super_admin`
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    require_tier(Role::Admin, request, next).await
}
