use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;

use super::{invalid, optional_bool, optional_string, require_positive_number, require_string, string_list};

pub const COLLECTION: &str = "services";

/// A bookable care service. Inactive services stay in the store but are
/// hidden from all public reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price_per_hr: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated create/update payload for a service
#[derive(Debug)]
pub struct ServicePayload {
    pub title: String,
    pub description: String,
    pub price_per_hr: f64,
    pub image_url: Option<String>,
    pub features: Vec<String>,
    pub is_active: bool,
}

impl ServicePayload {
    pub fn parse(body: &Value) -> Result<Self, ApiError> {
        let mut errors = HashMap::new();

        let title = require_string(body, "title", &mut errors);
        let description = require_string(body, "description", &mut errors);
        let price_per_hr = require_positive_number(body, "price_per_hr", &mut errors);
        let image_url = optional_string(body, "image_url", &mut errors);
        let features = string_list(body, "features", &mut errors);
        let is_active = optional_bool(body, "is_active", true, &mut errors);

        if !errors.is_empty() {
            return Err(invalid(errors));
        }

        Ok(Self {
            title,
            description,
            price_per_hr,
            image_url,
            features,
            is_active,
        })
    }

    pub fn into_service(self, now: DateTime<Utc>) -> Service {
        Service {
            id: Uuid::new_v4().to_string(),
            title: self.title,
            description: self.description,
            price_per_hr: self.price_per_hr,
            image_url: self.image_url,
            features: self.features,
            is_active: self.is_active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replacement fields for an existing service; `created_at` is preserved
    pub fn into_patch(self, now: DateTime<Utc>) -> Value {
        serde_json::json!({
            "title": self.title,
            "description": self.description,
            "price_per_hr": self.price_per_hr,
            "image_url": self.image_url,
            "features": self.features,
            "is_active": self.is_active,
            "updated_at": now,
        })
    }
}
