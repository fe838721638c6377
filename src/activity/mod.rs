//! Best-effort audit logging.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::models::activity::{ActivityCategory, ActivityEntry, COLLECTION};
use crate::store::DocumentStore;

/// Appends audit records after mutating operations. Append failures are
/// logged and swallowed: the primary write has already succeeded by the
/// time this runs, and the caller must still see that success.
#[derive(Clone)]
pub struct ActivityLog {
    store: Arc<dyn DocumentStore>,
}

impl ActivityLog {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn record(
        &self,
        actor: &AuthUser,
        category: ActivityCategory,
        action: &str,
        detail: String,
    ) {
        let entry = ActivityEntry {
            id: Uuid::new_v4().to_string(),
            actor_id: actor.id.clone(),
            actor_name: actor.display_name().to_string(),
            action: action.to_string(),
            detail,
            category,
            created_at: Utc::now(),
        };

        let fields = match serde_json::to_value(&entry) {
            Ok(fields) => fields,
            Err(e) => {
                tracing::warn!(action, "failed to serialize activity entry: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.put(COLLECTION, &entry.id, fields).await {
            tracing::warn!(
                actor = %entry.actor_id,
                action,
                "failed to append activity entry: {}",
                e
            );
        }
    }
}
