use std::sync::Arc;

use anyhow::Context;
use carelink_api::config::AppConfig;
use carelink_api::payments::StripeProvider;
use carelink_api::state::AppState;
use carelink_api::store::RestStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so local runs pick up JWT_SECRET, STORE_BASE_URL, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carelink_api=info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::from_env();
    tracing::info!("Starting CareLink API in {:?} mode", config.environment);

    let http = reqwest::Client::new();
    let store = Arc::new(RestStore::new(
        http.clone(),
        config.store.base_url.as_str(),
        config.store.api_key.as_str(),
    ));
    let payments = Arc::new(StripeProvider::new(
        http,
        config.payments.base_url.as_str(),
        config.payments.secret_key.as_str(),
    ));

    let port = config.server.port;
    let state = AppState::new(config, store, payments);
    let app = carelink_api::app(state);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("CareLink API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server exited")?;
    Ok(())
}
