use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Seats assigned to a class when the creating request does not say otherwise.
pub const DEFAULT_MAX_SPOTS: u32 = 12;

/// One reservation inside a [`ClassRecord`]. Emails are stored lowercased.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[schema(value_type = String, format = "date-time", example = "2026-08-06T09:00:00Z")]
    pub booked_at: DateTime<Utc>,
}

/// Persisted document for one class session, keyed by `classId` in the store.
///
/// Descriptive fields are whatever the first booking supplied; later bookings
/// never touch them. `bookings` is append-only in reservation order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    pub class_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub max_spots: u32,
    pub bookings: Vec<Booking>,
}

/// Booking submission. All fields default so that a missing field surfaces as
/// an empty value to validation instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(default)]
    pub class_id: String,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub max_spots: Option<u32>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl BookingRequest {
    /// Capacity for a record created by this request; falsy values (absent
    /// or zero) fall back to [`DEFAULT_MAX_SPOTS`].
    pub fn capacity(&self) -> u32 {
        match self.max_spots {
            Some(n) if n > 0 => n,
            _ => DEFAULT_MAX_SPOTS,
        }
    }
}

/// Seat availability for one class. `available` is the raw subtraction
/// `maxSpots - booked` and may go negative on a corrupted record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub class_id: String,
    pub booked: u32,
    pub max_spots: u32,
    pub available: i64,
}

/// Response to a successful booking.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub message: String,
    pub booked: u32,
    pub max_spots: u32,
}
