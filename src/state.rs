use std::sync::Arc;

use crate::activity::ActivityLog;
use crate::auth::TokenVerifier;
use crate::config::AppConfig;
use crate::payments::PaymentProvider;
use crate::store::DocumentStore;

/// Shared application state. Every external collaborator sits behind a
/// trait object so tests can substitute fakes at the seam.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn DocumentStore>,
    pub payments: Arc<dyn PaymentProvider>,
    pub verifier: TokenVerifier,
    pub activity: ActivityLog,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        store: Arc<dyn DocumentStore>,
        payments: Arc<dyn PaymentProvider>,
    ) -> Self {
        let verifier = TokenVerifier::new(&config.security.jwt_secret);
        let activity = ActivityLog::new(store.clone());
        Self {
            config: Arc::new(config),
            store,
            payments,
            verifier,
            activity,
        }
    }
}
