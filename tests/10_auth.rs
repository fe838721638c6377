mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use common::{expired_token, seed_user, send, spawn_app, token};

#[tokio::test]
async fn admin_route_without_credential_is_unauthenticated() -> Result<()> {
    let app = spawn_app();

    // No Authorization header at all: 401, never a validation or not-found error
    let (status, body) = send(&app.app, "GET", "/api/admin/services", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    // Same for mutations with bodies that would otherwise fail validation
    let (status, _) = send(
        &app.app,
        "POST",
        "/api/admin/services",
        None,
        Some(json!({"price_per_hr": "nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // And for paths that do not exist in the store
    let (status, _) = send(&app.app, "DELETE", "/api/admin/users/ghost", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn malformed_and_expired_tokens_are_rejected() -> Result<()> {
    let app = spawn_app();
    seed_user(&app.store, "u1", "dana@example.com", "admin").await;

    let (status, _) = send(
        &app.app,
        "GET",
        "/api/admin/services",
        Some("not-a-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let expired = expired_token("u1", "dana@example.com");
    let (status, _) = send(&app.app, "GET", "/api/admin/services", Some(&expired), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn valid_token_without_profile_is_unauthenticated() -> Result<()> {
    let app = spawn_app();
    // token is cryptographically fine, but no profile document exists
    let stranger = token("ghost", "ghost@example.com");

    let (status, body) = send(&app.app, "GET", "/api/auth/whoami", Some(&stranger), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    Ok(())
}

#[tokio::test]
async fn user_tier_cannot_reach_admin_routes() -> Result<()> {
    let app = spawn_app();
    seed_user(&app.store, "u1", "dana@example.com", "user").await;
    let bearer = token("u1", "dana@example.com");

    let (status, body) = send(&app.app, "GET", "/api/admin/services", Some(&bearer), None).await;
    // authenticated but insufficient tier: forbidden, not unauthenticated
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    Ok(())
}

#[tokio::test]
async fn both_admin_tiers_pass_the_gate() -> Result<()> {
    let app = spawn_app();
    seed_user(&app.store, "a1", "admin@example.com", "admin").await;
    seed_user(&app.store, "s1", "root@example.com", "super_admin").await;

    for uid in ["a1", "s1"] {
        let bearer = token(uid, "x@example.com");
        let (status, body) = send(&app.app, "GET", "/api/admin/users", Some(&bearer), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    Ok(())
}

#[tokio::test]
async fn whoami_reflects_stored_role_not_token() -> Result<()> {
    let app = spawn_app();
    seed_user(&app.store, "u1", "dana@example.com", "admin").await;
    let bearer = token("u1", "dana@example.com");

    let (status, body) = send(&app.app, "GET", "/api/auth/whoami", Some(&bearer), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], "u1");
    assert_eq!(body["data"]["role"], "admin");

    Ok(())
}

#[tokio::test]
async fn root_and_health_respond() -> Result<()> {
    let app = spawn_app();

    let (status, body) = send(&app.app, "GET", "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = send(&app.app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");

    Ok(())
}
