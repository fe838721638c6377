use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

use super::{invalid, optional_string};

pub const COLLECTION: &str = "users";

/// Privilege tiers, lowest to highest. Declaration order drives `Ord`, so
/// tier checks are plain comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Admin,
    SuperAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            "super_admin" => Some(Role::SuperAdmin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored user profile. Created on first session sync; the `role` field is
/// only ever changed through the guarded admin update handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub uid: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin update payload for a user document. All fields optional; `role`
/// must name a known tier when present.
#[derive(Debug)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: Option<Role>,
}

impl UserUpdate {
    pub fn parse(body: &Value) -> Result<Self, ApiError> {
        let mut errors = HashMap::new();

        let name = optional_string(body, "name", &mut errors);
        let phone = optional_string(body, "phone", &mut errors);
        let address = optional_string(body, "address", &mut errors);

        let role = match body.get("role") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => match Role::parse(s) {
                Some(role) => Some(role),
                None => {
                    errors.insert(
                        "role".to_string(),
                        "must be one of: user, admin, super_admin".to_string(),
                    );
                    None
                }
            },
            Some(_) => {
                errors.insert("role".to_string(), "must be a string".to_string());
                None
            }
        };

        if !errors.is_empty() {
            return Err(invalid(errors));
        }

        Ok(Self { name, phone, address, role })
    }

    /// Fields to merge into the stored document
    pub fn into_patch(self, now: DateTime<Utc>) -> Value {
        let mut patch = serde_json::Map::new();
        if let Some(name) = self.name {
            patch.insert("name".to_string(), Value::String(name));
        }
        if let Some(phone) = self.phone {
            patch.insert("phone".to_string(), Value::String(phone));
        }
        if let Some(address) = self.address {
            patch.insert("address".to_string(), Value::String(address));
        }
        if let Some(role) = self.role {
            patch.insert("role".to_string(), Value::String(role.as_str().to_string()));
        }
        patch.insert(
            "updated_at".to_string(),
            serde_json::to_value(now).unwrap_or(Value::Null),
        );
        Value::Object(patch)
    }
}
