use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::utils::{is_addressable, slugify};

/// Lifecycle of a booking inquiry. Every status may move to every other
/// status (including itself); an admin decides, the system never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    Pending,
    Contacted,
    Booked,
    Cancelled,
}

impl InquiryStatus {
    pub const ALL: [InquiryStatus; 4] = [
        InquiryStatus::Pending,
        InquiryStatus::Contacted,
        InquiryStatus::Booked,
        InquiryStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryStatus::Pending => "pending",
            InquiryStatus::Contacted => "contacted",
            InquiryStatus::Booked => "booked",
            InquiryStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for InquiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InquiryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InquiryStatus::Pending),
            "contacted" => Ok(InquiryStatus::Contacted),
            "booked" => Ok(InquiryStatus::Booked),
            "cancelled" => Ok(InquiryStatus::Cancelled),
            other => Err(format!("Unknown inquiry status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingInquiry {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub pickup_location: String,
    pub drop_location: String,
    pub pickup_date: NaiveDate,
    pub pickup_time: String,
    pub drop_date: NaiveDate,
    pub drop_time: String,
    pub status: InquiryStatus,
    pub created_at: DateTime<Utc>,
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("required"))
    } else {
        Ok(())
    }
}

/// Required, and must yield a slug with at least one letter or digit.
pub fn sluggable(value: &str) -> Result<(), ValidationError> {
    not_blank(value)?;
    if is_addressable(&slugify(value)) {
        Ok(())
    } else {
        Err(ValidationError::new("slug"))
    }
}

/// Required and parseable as a calendar date.
pub fn calendar_date(value: &str) -> Result<(), ValidationError> {
    not_blank(value)?;
    parse_calendar_date(value)
        .map(|_| ())
        .ok_or_else(|| ValidationError::new("calendar_date"))
}

/// Accepts `YYYY-MM-DD`, the format date inputs submit.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Public booking form payload. Drop date/time is not required to follow
/// pickup. Absent fields deserialize as empty and fail validation.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateBookingInquiryRequest {
    #[validate(custom(function = not_blank), length(max = 200))]
    pub name: String,
    #[validate(custom(function = not_blank), length(max = 40))]
    pub phone: String,
    #[validate(custom(function = not_blank), length(max = 200))]
    pub pickup_location: String,
    #[validate(custom(function = not_blank), length(max = 200))]
    pub drop_location: String,
    #[validate(custom(function = calendar_date))]
    pub pickup_date: String,
    #[validate(custom(function = not_blank), length(max = 20))]
    pub pickup_time: String,
    #[validate(custom(function = calendar_date))]
    pub drop_date: String,
    #[validate(custom(function = not_blank), length(max = 20))]
    pub drop_time: String,
}

/// Validated, trimmed booking row ready for insertion. Status is not part of
/// it: every new inquiry starts at `pending`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBookingInquiry {
    pub name: String,
    pub phone: String,
    pub pickup_location: String,
    pub drop_location: String,
    pub pickup_date: NaiveDate,
    pub pickup_time: String,
    pub drop_date: NaiveDate,
    pub drop_time: String,
}

impl NewBookingInquiry {
    /// Only call on a request that passed `validate()`.
    pub fn from_validated(request: &CreateBookingInquiryRequest) -> Option<Self> {
        Some(Self {
            name: request.name.trim().to_string(),
            phone: request.phone.trim().to_string(),
            pickup_location: request.pickup_location.trim().to_string(),
            drop_location: request.drop_location.trim().to_string(),
            pickup_date: parse_calendar_date(&request.pickup_date)?,
            pickup_time: request.pickup_time.trim().to_string(),
            drop_date: parse_calendar_date(&request.drop_date)?,
            drop_time: request.drop_time.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInquiryStatusRequest {
    pub status: InquiryStatus,
}
