mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use common::{seed_service, seed_testimonial, seed_user, send, spawn_app, token};

#[tokio::test]
async fn inactive_services_are_hidden_from_public_reads_only() -> Result<()> {
    let app = spawn_app();
    seed_service(&app.store, "svc-1", "Elder Care", true).await;
    seed_service(&app.store, "svc-2", "Night Shift", false).await;
    seed_user(&app.store, "a1", "admin@example.com", "admin").await;

    let (status, body) = send(&app.app, "GET", "/services", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Elder Care"]);

    // public get-by-id hides it too
    let (status, _) = send(&app.app, "GET", "/services/svc-2", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // but the admin list shows everything
    let bearer = token("a1", "admin@example.com");
    let (status, body) = send(&app.app, "GET", "/api/admin/services", Some(&bearer), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    Ok(())
}

#[tokio::test]
async fn service_create_with_non_numeric_price_writes_nothing() -> Result<()> {
    let app = spawn_app();
    seed_user(&app.store, "a1", "admin@example.com", "admin").await;
    let bearer = token("a1", "admin@example.com");

    let (status, body) = send(
        &app.app,
        "POST",
        "/api/admin/services",
        Some(&bearer),
        Some(json!({
            "title": "Elder Care",
            "description": "In-home support",
            "price_per_hr": "twenty"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["field_errors"]["price_per_hr"].is_string());
    assert_eq!(app.store.count("services").await, 0);

    Ok(())
}

#[tokio::test]
async fn service_crud_roundtrip() -> Result<()> {
    let app = spawn_app();
    seed_user(&app.store, "a1", "admin@example.com", "admin").await;
    let bearer = token("a1", "admin@example.com");

    let (status, body) = send(
        &app.app,
        "POST",
        "/api/admin/services",
        Some(&bearer),
        Some(json!({
            "title": "Elder Care",
            "description": "In-home support",
            "price_per_hr": 24.5,
            "features": ["meal prep"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    // visible publicly while active
    let (status, body) = send(&app.app, "GET", &format!("/services/{}", id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["price_per_hr"], 24.5);

    // deactivate via update
    let (status, _) = send(
        &app.app,
        "PUT",
        &format!("/api/admin/services/{}", id),
        Some(&bearer),
        Some(json!({
            "title": "Elder Care",
            "description": "In-home support",
            "price_per_hr": 26.0,
            "is_active": false
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app.app, "GET", &format!("/services/{}", id), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // delete
    let (status, _) = send(
        &app.app,
        "DELETE",
        &format!("/api/admin/services/{}", id),
        Some(&bearer),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.store.count("services").await, 0);

    Ok(())
}

#[tokio::test]
async fn updating_a_missing_service_is_not_found() -> Result<()> {
    let app = spawn_app();
    seed_user(&app.store, "a1", "admin@example.com", "admin").await;
    let bearer = token("a1", "admin@example.com");

    let (status, _) = send(
        &app.app,
        "PUT",
        "/api/admin/services/ghost",
        Some(&bearer),
        Some(json!({
            "title": "Elder Care",
            "description": "In-home support",
            "price_per_hr": 24.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn public_testimonials_show_only_visible_entries() -> Result<()> {
    let app = spawn_app();
    seed_testimonial(&app.store, "t1", Some(true)).await;
    seed_testimonial(&app.store, "t2", Some(false)).await;
    // entries written before the visibility flag existed count as visible
    seed_testimonial(&app.store, "t3", None).await;

    let (status, body) = send(&app.app, "GET", "/testimonials", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    // insertion order, hidden entry dropped
    assert_eq!(ids, vec!["t1", "t3"]);

    Ok(())
}

#[tokio::test]
async fn sliders_are_ordered_by_position() -> Result<()> {
    let app = spawn_app();
    seed_user(&app.store, "a1", "admin@example.com", "admin").await;
    let bearer = token("a1", "admin@example.com");

    for (title, position) in [("Third", 3), ("First", 1), ("Second", 2)] {
        let (status, _) = send(
            &app.app,
            "POST",
            "/api/admin/content/sliders",
            Some(&bearer),
            Some(json!({
                "title": title,
                "image_url": "https://cdn.example.com/hero.jpg",
                "position": position
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app.app, "GET", "/content/sliders", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);

    Ok(())
}

#[tokio::test]
async fn about_content_is_published_through_admin() -> Result<()> {
    let app = spawn_app();
    seed_user(&app.store, "a1", "admin@example.com", "admin").await;
    let bearer = token("a1", "admin@example.com");

    // nothing published yet
    let (status, _) = send(&app.app, "GET", "/content/about", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app.app,
        "PUT",
        "/api/admin/content/about",
        Some(&bearer),
        Some(json!({
            "heading": "Who we are",
            "body": "Care you can count on."
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app.app, "GET", "/content/about", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["heading"], "Who we are");

    Ok(())
}
