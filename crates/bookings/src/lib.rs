//! `labmon-bookings` — work bookings and booking types.
//!
//! A booking records a span of worked time against a booking type (regular
//! hours, overtime, on-call, ...). Booking types carry the pay multiplier
//! applied by the reporting collaborator.

pub mod booking;
pub mod booking_type;

pub use booking::{Booking, BookingValidator, TimeRange};
pub use booking_type::{BookingType, BookingTypeValidator};
