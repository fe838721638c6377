use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;

use super::{invalid, optional_string, require_integer, require_string};

pub const COLLECTION: &str = "content";
pub const SLIDERS_COLLECTION: &str = "sliders";

/// Fixed document names within the content collection
pub const ABOUT_DOC: &str = "about";
pub const FOOTER_DOC: &str = "footer";

/// Singleton "about us" block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AboutContent {
    pub heading: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl AboutContent {
    pub fn parse(body: &Value) -> Result<Self, ApiError> {
        let mut errors = HashMap::new();
        let heading = require_string(body, "heading", &mut errors);
        let text = require_string(body, "body", &mut errors);
        let image_url = optional_string(body, "image_url", &mut errors);

        if !errors.is_empty() {
            return Err(invalid(errors));
        }

        Ok(Self { heading, body: text, image_url })
    }
}

/// Singleton footer block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FooterContent {
    pub tagline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default)]
    pub links: Vec<FooterLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FooterLink {
    pub label: String,
    pub url: String,
}

impl FooterContent {
    pub fn parse(body: &Value) -> Result<Self, ApiError> {
        let mut errors = HashMap::new();
        let tagline = require_string(body, "tagline", &mut errors);
        let email = optional_string(body, "email", &mut errors);
        let phone = optional_string(body, "phone", &mut errors);
        let address = optional_string(body, "address", &mut errors);

        let links = match body.get("links") {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => match serde_json::from_value::<Vec<FooterLink>>(value.clone()) {
                Ok(links) => links,
                Err(_) => {
                    errors.insert(
                        "links".to_string(),
                        "must be a list of {label, url} objects".to_string(),
                    );
                    Vec::new()
                }
            },
        };

        if !errors.is_empty() {
            return Err(invalid(errors));
        }

        Ok(Self { tagline, email, phone, address, links })
    }
}

/// Homepage slider entry, ordered by `position` ascending
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slider {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub image_url: String,
    pub position: i64,
}

/// Validated create/update payload for a slider
#[derive(Debug)]
pub struct SliderPayload {
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub position: i64,
}

impl SliderPayload {
    pub fn parse(body: &Value) -> Result<Self, ApiError> {
        let mut errors = HashMap::new();
        let title = require_string(body, "title", &mut errors);
        let subtitle = optional_string(body, "subtitle", &mut errors);
        let image_url = require_string(body, "image_url", &mut errors);
        let position = require_integer(body, "position", &mut errors);

        if !errors.is_empty() {
            return Err(invalid(errors));
        }

        Ok(Self { title, subtitle, image_url, position })
    }

    pub fn into_slider(self) -> Slider {
        Slider {
            id: Uuid::new_v4().to_string(),
            title: self.title,
            subtitle: self.subtitle,
            image_url: self.image_url,
            position: self.position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn slider_requires_integer_position() {
        let err = SliderPayload::parse(&json!({
            "title": "Welcome",
            "image_url": "https://cdn.example.com/hero.jpg",
            "position": "first"
        }))
        .unwrap_err();

        match err {
            ApiError::ValidationError { field_errors, .. } => {
                assert_eq!(field_errors.unwrap().get("position").unwrap(), "must be an integer");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn footer_links_validate_shape() {
        let err = FooterContent::parse(&json!({
            "tagline": "Care you can count on",
            "links": [{"label": "Home"}]
        }))
        .unwrap_err();

        match err {
            ApiError::ValidationError { field_errors, .. } => {
                assert!(field_errors.unwrap().contains_key("links"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
