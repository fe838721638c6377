use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;

use super::{invalid, optional_bool, optional_string, require_string};

pub const COLLECTION: &str = "testimonials";

/// A customer testimonial. Hidden entries stay in the store but never
/// appear in public reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: String,
    pub author_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_title: Option<String>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    /// Documents written before the visibility flag existed have no
    /// `is_visible` member; they count as visible.
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    pub created_at: DateTime<Utc>,
}

fn default_visible() -> bool {
    true
}

#[derive(Debug)]
pub struct TestimonialPayload {
    pub author_name: String,
    pub author_title: Option<String>,
    pub content: String,
    pub rating: Option<u8>,
    pub is_visible: bool,
}

impl TestimonialPayload {
    pub fn parse(body: &Value) -> Result<Self, ApiError> {
        let mut errors = HashMap::new();

        let author_name = require_string(body, "author_name", &mut errors);
        let author_title = optional_string(body, "author_title", &mut errors);
        let content = require_string(body, "content", &mut errors);
        let is_visible = optional_bool(body, "is_visible", true, &mut errors);

        let rating = match body.get("rating") {
            None | Some(Value::Null) => None,
            Some(value) => match value.as_u64() {
                Some(n @ 1..=5) => Some(n as u8),
                _ => {
                    errors.insert(
                        "rating".to_string(),
                        "must be an integer between 1 and 5".to_string(),
                    );
                    None
                }
            },
        };

        if !errors.is_empty() {
            return Err(invalid(errors));
        }

        Ok(Self {
            author_name,
            author_title,
            content,
            rating,
            is_visible,
        })
    }

    pub fn into_testimonial(self, now: DateTime<Utc>) -> Testimonial {
        Testimonial {
            id: Uuid::new_v4().to_string(),
            author_name: self.author_name,
            author_title: self.author_title,
            content: self.content,
            rating: self.rating,
            is_visible: self.is_visible,
            created_at: now,
        }
    }

    pub fn into_patch(self) -> Value {
        serde_json::json!({
            "author_name": self.author_name,
            "author_title": self.author_title,
            "content": self.content,
            "rating": self.rating,
            "is_visible": self.is_visible,
        })
    }
}
