//! Booking types: named categories of worked time with a pay multiplier.

use serde::{Deserialize, Serialize};

use labmon_core::identity::Identity;
use labmon_core::impl_change_aware;
use labmon_core::validate::{
    Validator, check_non_blank, check_positive, check_present, missing_target,
};

/// A category of bookable time (regular, overtime, on-call, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingType {
    identity: Identity,
    name: String,
    multiplier: Option<f64>,
}

impl_change_aware!(BookingType);

impl BookingType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            identity: Identity::new(),
            name: name.into(),
            multiplier: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn multiplier(&self) -> Option<f64> {
        self.multiplier
    }

    pub fn set_multiplier(&mut self, multiplier: f64) {
        self.multiplier = Some(multiplier);
    }
}

impl core::fmt::Display for BookingType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "BookingType[id={}, name={}]", self.identity, self.name)
    }
}

/// Validates a [`BookingType`]: name filled in, multiplier set and positive.
/// Messages come in [name, multiplier] order.
#[derive(Debug, Default)]
pub struct BookingTypeValidator;

impl Validator for BookingTypeValidator {
    type Target = BookingType;

    fn validate(&self, target: Option<&BookingType>) -> Vec<String> {
        let Some(booking_type) = target else {
            return missing_target("booking type");
        };
        let mut errors = Vec::new();
        check_non_blank(&mut errors, booking_type.name(), "name");
        check_present(&mut errors, booking_type.multiplier().as_ref(), "multiplier");
        if let Some(multiplier) = booking_type.multiplier() {
            check_positive(&mut errors, multiplier, "multiplier");
        }
        errors
    }
}
