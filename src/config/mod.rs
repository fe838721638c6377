use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration, environment-driven with sane development
/// defaults. Built once in `main` and carried in application state; nothing
/// reads the environment after startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub store: StoreConfig,
    pub payments: PaymentsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Shared secret for verifying identity-service tokens
    pub jwt_secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub base_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentsConfig {
    pub base_url: String,
    pub secret_key: String,
    pub currency: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() {
            tracing::warn!("JWT_SECRET not set; all bearer tokens will be rejected");
        }

        Self {
            environment,
            server: ServerConfig { port },
            security: SecurityConfig { jwt_secret },
            store: StoreConfig {
                base_url: env::var("STORE_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:8600".to_string()),
                api_key: env::var("STORE_API_KEY").unwrap_or_default(),
            },
            payments: PaymentsConfig {
                base_url: env::var("PAYMENTS_BASE_URL")
                    .unwrap_or_else(|_| "https://api.stripe.com".to_string()),
                secret_key: env::var("PAYMENTS_SECRET_KEY").unwrap_or_default(),
                currency: env::var("PAYMENTS_CURRENCY").unwrap_or_else(|_| "usd".to_string()),
            },
        }
    }
}
