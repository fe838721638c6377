use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;

use super::user::UserProfile;
use super::{invalid, optional_string, require_positive_number, require_string};

pub const COLLECTION: &str = "bookings";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::InProgress => "in_progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<BookingStatus> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "confirmed" => Some(BookingStatus::Confirmed),
            "in_progress" => Some(BookingStatus::InProgress),
            "completed" => Some(BookingStatus::Completed),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored booking. `service_name` is a snapshot taken at creation so the
/// booking stays readable after the service changes or disappears.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub service_id: String,
    pub service_name: String,
    pub scheduled_date: String,
    pub scheduled_time: String,
    pub hours: f64,
    pub address: String,
    pub total_cost: f64,
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A booking with the owning user's contact details attached at read time.
/// The customer fields are joined, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedBooking {
    #[serde(flatten)]
    pub booking: Booking,
    pub customer_name: String,
    pub customer_email: String,
}

/// Attach the owning user's display name and email to a booking, falling
/// back to placeholders when the user document is gone.
pub fn attach_customer(booking: Booking, owner: Option<&UserProfile>) -> EnrichedBooking {
    let (customer_name, customer_email) = match owner {
        Some(user) => (
            user.name.clone().unwrap_or_else(|| user.email.clone()),
            user.email.clone(),
        ),
        None => ("Unknown User".to_string(), "No Email".to_string()),
    };

    EnrichedBooking {
        booking,
        customer_name,
        customer_email,
    }
}

/// Validated checkout payload for a new booking
#[derive(Debug)]
pub struct NewBooking {
    pub service_id: String,
    pub scheduled_date: String,
    pub scheduled_time: String,
    pub hours: f64,
    pub address: String,
    pub notes: Option<String>,
}

impl NewBooking {
    pub fn parse(body: &Value) -> Result<Self, ApiError> {
        let mut errors = HashMap::new();

        let service_id = require_string(body, "service_id", &mut errors);
        let scheduled_date = require_string(body, "scheduled_date", &mut errors);
        let scheduled_time = require_string(body, "scheduled_time", &mut errors);
        let hours = require_positive_number(body, "hours", &mut errors);
        let address = require_string(body, "address", &mut errors);
        let notes = optional_string(body, "notes", &mut errors);

        if !errors.is_empty() {
            return Err(invalid(errors));
        }

        Ok(Self {
            service_id,
            scheduled_date,
            scheduled_time,
            hours,
            address,
            notes,
        })
    }

    /// Build the stored booking; cost is computed server-side from the
    /// service's current hourly price.
    pub fn into_booking(
        self,
        user_id: &str,
        service_name: &str,
        price_per_hr: f64,
        now: DateTime<Utc>,
    ) -> Booking {
        Booking {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            service_id: self.service_id,
            service_name: service_name.to_string(),
            scheduled_date: self.scheduled_date,
            scheduled_time: self.scheduled_time,
            hours: self.hours,
            address: self.address,
            total_cost: price_per_hr * self.hours,
            status: BookingStatus::Pending,
            notes: self.notes,
            created_at: now,
        }
    }
}

/// Validated admin payload for a booking status change
#[derive(Debug)]
pub struct StatusUpdate {
    pub status: BookingStatus,
}

impl StatusUpdate {
    pub fn parse(body: &Value) -> Result<Self, ApiError> {
        let mut errors = HashMap::new();
        let raw = require_string(body, "status", &mut errors);

        if !errors.is_empty() {
            return Err(invalid(errors));
        }

        match BookingStatus::parse(&raw) {
            Some(status) => Ok(Self { status }),
            None => {
                errors.insert(
                    "status".to_string(),
                    "must be one of: pending, confirmed, in_progress, completed, cancelled"
                        .to_string(),
                );
                Err(invalid(errors))
            }
        }
    }
}
