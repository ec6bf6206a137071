//! Bookings: spans of worked time recorded against a booking type.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use labmon_core::error::{DomainError, DomainResult};
use labmon_core::identity::Identity;
use labmon_core::impl_change_aware;
use labmon_core::validate::{Validator, check_present, missing_target};
use labmon_core::value_object::ValueObject;

/// A closed span of time. End is strictly after start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<Self> {
        if end <= start {
            return Err(DomainError::invariant(format!(
                "end ({end}) must be after start ({start})"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

impl ValueObject for TimeRange {}

/// A single booked span of work.
///
/// Start and end stay independently settable (the UI collaborator fills them
/// in one at a time); [`BookingValidator`] decides when the whole record is
/// coherent, and [`range`](Booking::range) only yields a value once it is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    identity: Identity,
    description: String,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    booking_type_id: Option<i64>,
}

impl_change_aware!(Booking);

impl Booking {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            identity: Identity::new(),
            description: description.into(),
            start: None,
            end: None,
            booking_type_id: None,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    pub fn set_start(&mut self, start: DateTime<Utc>) {
        self.start = Some(start);
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    pub fn set_end(&mut self, end: DateTime<Utc>) {
        self.end = Some(end);
    }

    pub fn booking_type_id(&self) -> Option<i64> {
        self.booking_type_id
    }

    pub fn set_booking_type_id(&mut self, booking_type_id: i64) {
        self.booking_type_id = Some(booking_type_id);
    }

    /// The booked span, once both endpoints are set and ordered.
    pub fn range(&self) -> Option<TimeRange> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => TimeRange::new(start, end).ok(),
            _ => None,
        }
    }
}

impl core::fmt::Display for Booking {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Booking[id={}, description={}]",
            self.identity, self.description
        )
    }
}

/// Validates a [`Booking`]: both endpoints set, end after start, booking
/// type assigned.
#[derive(Debug, Default)]
pub struct BookingValidator;

impl Validator for BookingValidator {
    type Target = Booking;

    fn validate(&self, target: Option<&Booking>) -> Vec<String> {
        let Some(booking) = target else {
            return missing_target("booking");
        };
        let mut errors = Vec::new();
        check_present(&mut errors, booking.start().as_ref(), "start");
        check_present(&mut errors, booking.end().as_ref(), "end");
        if let (Some(start), Some(end)) = (booking.start(), booking.end()) {
            if end <= start {
                errors.push("end must be after start".to_string());
            }
        }
        check_present(&mut errors, booking.booking_type_id().as_ref(), "booking type");
        errors
    }
}
