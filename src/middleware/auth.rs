use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{extract_bearer, AuthUser};
use crate::error::ApiError;
use crate::models::user::{UserProfile, COLLECTION};
use crate::state::AppState;

/// Bearer authentication middleware: verify the token, resolve the subject
/// to a stored profile, and inject [`AuthUser`] into request extensions.
///
/// The role on the verified identity comes from the profile document, not
/// the token, so role changes take effect without waiting for token expiry.
/// Missing token, failed verification, and missing profile all collapse to
/// an authentication failure; none of them reveal whether a profile exists.
pub async fn authenticate(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header_value = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok());

    let token = extract_bearer(header_value).map_err(ApiError::unauthorized)?;

    let claims = state
        .verifier
        .verify(token)
        .map_err(ApiError::unauthorized)?;

    let doc = state
        .store
        .get(COLLECTION, &claims.sub)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;

    let profile: UserProfile = doc.decode().map_err(ApiError::from)?;

    let auth_user = AuthUser {
        id: profile.uid,
        email: profile.email,
        role: profile.role,
        name: profile.name,
    };

    tracing::debug!(user = %auth_user.id, role = %auth_user.role, "authenticated request");

    request.extensions_mut().insert(auth_user);
    Ok(next.run(request).await)
}
