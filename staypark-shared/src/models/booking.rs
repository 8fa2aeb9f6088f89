use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use super::values;
use crate::pii::Masked;

/// Returned when a string is not part of a fixed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static [&'static str],
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid {}: {}. Must be one of: {}",
            self.kind,
            self.value,
            self.expected.join(", ")
        )
    }
}

impl std::error::Error for UnknownVariant {}

/// What a booking reserves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingType {
    Hotel,
    Parking,
}

impl BookingType {
    pub const NAMES: &'static [&'static str] = &["hotel", "parking"];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingType::Hotel => "hotel",
            BookingType::Parking => "parking",
        }
    }
}

impl fmt::Display for BookingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hotel" => Ok(BookingType::Hotel),
            "parking" => Ok(BookingType::Parking),
            other => Err(UnknownVariant {
                kind: "booking type",
                value: other.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}

/// Booking status vocabulary. No transition order is implied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Active,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const NAMES: &'static [&'static str] = &["pending", "active", "completed", "cancelled"];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Active => "active",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "active" => Ok(BookingStatus::Active),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(UnknownVariant {
                kind: "status",
                value: other.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}

/// A hotel or parking reservation as stored under a customer.
///
/// The owning customer is not a field: it comes from where the document lives.
/// Every field decodes leniently so one malformed value never hides the rest
/// of the booking from an operator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "type", default, deserialize_with = "values::lenient")]
    pub booking_type: Option<BookingType>,
    #[serde(default, deserialize_with = "values::lenient")]
    pub status: Option<BookingStatus>,
    #[serde(default, deserialize_with = "values::lenient")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "values::lenient")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "values::lenient")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "values::amount")]
    pub total_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "values::lenient")]
    pub user_email: Option<Masked<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "values::lenient")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "values::lenient")]
    pub room_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "values::lenient")]
    pub parking_spot: Option<String>,
}

impl Booking {
    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        serde_json::from_value(Value::Object(fields.clone())).unwrap_or_default()
    }
}
