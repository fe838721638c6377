pub mod activity;
pub mod booking;
pub mod content;
pub mod service;
pub mod testimonial;
pub mod user;

use std::collections::HashMap;

use serde_json::Value;

use crate::error::ApiError;

/// Field-level payload validation helpers. Each records a problem in the
/// shared error map and returns a placeholder; callers bail out with
/// [`invalid`] once every field has been checked, so a single response
/// reports all problems at once.
pub(crate) fn require_string(
    value: &Value,
    field: &str,
    errors: &mut HashMap<String, String>,
) -> String {
    match value.get(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::String(_)) => {
            errors.insert(field.to_string(), "must not be empty".to_string());
            String::new()
        }
        Some(_) => {
            errors.insert(field.to_string(), "must be a string".to_string());
            String::new()
        }
        None => {
            errors.insert(field.to_string(), "is required".to_string());
            String::new()
        }
    }
}

pub(crate) fn require_positive_number(
    value: &Value,
    field: &str,
    errors: &mut HashMap<String, String>,
) -> f64 {
    match value.get(field).and_then(Value::as_f64) {
        Some(n) if n > 0.0 => n,
        Some(_) => {
            errors.insert(field.to_string(), "must be a positive number".to_string());
            0.0
        }
        None => {
            errors.insert(field.to_string(), "must be a number".to_string());
            0.0
        }
    }
}

pub(crate) fn require_integer(
    value: &Value,
    field: &str,
    errors: &mut HashMap<String, String>,
) -> i64 {
    match value.get(field).and_then(Value::as_i64) {
        Some(n) => n,
        None => {
            errors.insert(field.to_string(), "must be an integer".to_string());
            0
        }
    }
}

pub(crate) fn optional_string(
    value: &Value,
    field: &str,
    errors: &mut HashMap<String, String>,
) -> Option<String> {
    match value.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(_) => {
            errors.insert(field.to_string(), "must be a string".to_string());
            None
        }
    }
}

pub(crate) fn optional_bool(
    value: &Value,
    field: &str,
    default: bool,
    errors: &mut HashMap<String, String>,
) -> bool {
    match value.get(field) {
        None | Some(Value::Null) => default,
        Some(Value::Bool(b)) => *b,
        Some(_) => {
            errors.insert(field.to_string(), "must be a boolean".to_string());
            default
        }
    }
}

pub(crate) fn string_list(
    value: &Value,
    field: &str,
    errors: &mut HashMap<String, String>,
) -> Vec<String> {
    match value.get(field) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(s) => out.push(s.clone()),
                    _ => {
                        errors.insert(field.to_string(), "must be a list of strings".to_string());
                        return Vec::new();
                    }
                }
            }
            out
        }
        Some(_) => {
            errors.insert(field.to_string(), "must be a list of strings".to_string());
            Vec::new()
        }
    }
}

pub(crate) fn invalid(errors: HashMap<String, String>) -> ApiError {
    ApiError::validation_error("Invalid request payload", Some(errors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn require_string_trims_and_flags() {
        let mut errors = HashMap::new();
        let body = json!({"title": "  Elder Care  ", "empty": "   ", "num": 4});

        assert_eq!(require_string(&body, "title", &mut errors), "Elder Care");
        require_string(&body, "empty", &mut errors);
        require_string(&body, "num", &mut errors);
        require_string(&body, "missing", &mut errors);

        assert_eq!(errors.get("empty").unwrap(), "must not be empty");
        assert_eq!(errors.get("num").unwrap(), "must be a string");
        assert_eq!(errors.get("missing").unwrap(), "is required");
    }

    #[test]
    fn positive_number_rejects_strings_and_zero() {
        let mut errors = HashMap::new();
        let body = json!({"ok": 24.5, "text": "25", "zero": 0});

        assert_eq!(require_positive_number(&body, "ok", &mut errors), 24.5);
        require_positive_number(&body, "text", &mut errors);
        require_positive_number(&body, "zero", &mut errors);

        assert_eq!(errors.get("text").unwrap(), "must be a number");
        assert_eq!(errors.get("zero").unwrap(), "must be a positive number");
    }
}
