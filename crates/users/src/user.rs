//! User entity and its validator.

use serde::{Deserialize, Serialize};

use labmon_core::identity::Identity;
use labmon_core::impl_change_aware;
use labmon_core::validate::{Validator, check_non_blank, missing_target};

use crate::contact::ContactOption;

/// A way for a user to authenticate. The payloads are opaque at this layer;
/// hashing and token issuance happen elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Credential {
    Password { hash: String },
    ApiToken { token: String },
}

/// A user of the time-tracking application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    identity: Identity,
    first_name: String,
    last_name: String,
    credentials: Vec<Credential>,
    contact_options: Vec<ContactOption>,
}

impl_change_aware!(User);

impl User {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            identity: Identity::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            credentials: Vec::new(),
            contact_options: Vec::new(),
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn set_first_name(&mut self, first_name: impl Into<String>) {
        self.first_name = first_name.into();
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn set_last_name(&mut self, last_name: impl Into<String>) {
        self.last_name = last_name.into();
    }

    pub fn credentials(&self) -> &[Credential] {
        &self.credentials
    }

    pub fn add_credential(&mut self, credential: Credential) {
        self.credentials.push(credential);
    }

    pub fn remove_credential(&mut self, credential: &Credential) -> bool {
        let before = self.credentials.len();
        self.credentials.retain(|c| c != credential);
        self.credentials.len() < before
    }

    pub fn contact_options(&self) -> &[ContactOption] {
        &self.contact_options
    }

    pub fn add_contact_option(&mut self, option: ContactOption) {
        self.contact_options.push(option);
    }
}

impl core::fmt::Display for User {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "User[id={}, name={} {}]",
            self.identity, self.first_name, self.last_name
        )
    }
}

/// Validates a [`User`]: names must be filled in and the user needs at
/// least one way to authenticate.
#[derive(Debug, Default)]
pub struct UserValidator;

impl Validator for UserValidator {
    type Target = User;

    fn validate(&self, target: Option<&User>) -> Vec<String> {
        let Some(user) = target else {
            return missing_target("user");
        };
        let mut errors = Vec::new();
        check_non_blank(&mut errors, user.first_name(), "first name");
        check_non_blank(&mut errors, user.last_name(), "last name");
        if user.credentials().is_empty() {
            errors.push("user must have at least one credential".to_string());
        }
        errors
    }
}
