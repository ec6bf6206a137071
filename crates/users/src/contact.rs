//! Contact options: social media and messenger handles a user can attach.
//!
//! Each option is its own entity with a single optional handle field; the
//! validators enforce the service-specific handle rules. Length and pattern
//! are checked independently, so one malformed handle can report both.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use labmon_core::identity::Identity;
use labmon_core::impl_change_aware;
use labmon_core::validate::{
    Validator, check_length, check_pattern, check_present, missing_target,
};

static TWITTER_USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]{1,15}$").expect("literal pattern"));

static THREEMA_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{8}$").expect("literal pattern"));

static SKYPE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9.,\-_]{5,31}$").expect("literal pattern"));

/// Any contact option a [`User`](crate::user::User) can hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactOption {
    Twitter(Twitter),
    Threema(Threema),
    Skype(Skype),
}

/// Twitter handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Twitter {
    identity: Identity,
    username: Option<String>,
}

impl_change_aware!(Twitter);

impl Twitter {
    pub fn new() -> Self {
        Self {
            identity: Identity::new(),
            username: None,
        }
    }

    pub fn with_username(username: impl Into<String>) -> Self {
        let mut twitter = Self::new();
        twitter.set_username(username);
        twitter
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = Some(username.into());
    }
}

impl Default for Twitter {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for Twitter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Twitter[id={}, username={}]",
            self.identity,
            self.username.as_deref().unwrap_or("-")
        )
    }
}

/// Threema messenger ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Threema {
    identity: Identity,
    threema_id: Option<String>,
}

impl_change_aware!(Threema);

impl Threema {
    pub fn new() -> Self {
        Self {
            identity: Identity::new(),
            threema_id: None,
        }
    }

    pub fn threema_id(&self) -> Option<&str> {
        self.threema_id.as_deref()
    }

    pub fn set_threema_id(&mut self, threema_id: impl Into<String>) {
        self.threema_id = Some(threema_id.into());
    }
}

impl Default for Threema {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for Threema {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Threema[id={}, threema_id={}]",
            self.identity,
            self.threema_id.as_deref().unwrap_or("-")
        )
    }
}

/// Skype account name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skype {
    identity: Identity,
    name: Option<String>,
}

impl_change_aware!(Skype);

impl Skype {
    pub fn new() -> Self {
        Self {
            identity: Identity::new(),
            name: None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }
}

impl Default for Skype {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for Skype {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Skype[id={}, name={}]",
            self.identity,
            self.name.as_deref().unwrap_or("-")
        )
    }
}

/// Twitter usernames: 1–15 characters, letters/digits/underscores.
#[derive(Debug, Default)]
pub struct TwitterValidator;

impl Validator for TwitterValidator {
    type Target = Twitter;

    fn validate(&self, target: Option<&Twitter>) -> Vec<String> {
        let Some(twitter) = target else {
            return missing_target("twitter account");
        };
        let mut errors = Vec::new();
        check_present(&mut errors, twitter.username(), "username");
        if let Some(username) = twitter.username() {
            check_length(&mut errors, username, 1, 15, "username");
            check_pattern(
                &mut errors,
                username,
                &TWITTER_USERNAME,
                "username may only contain letters, digits and underscores",
            );
        }
        errors
    }
}

/// Threema IDs: exactly 8 characters, capital letters and digits.
#[derive(Debug, Default)]
pub struct ThreemaValidator;

impl Validator for ThreemaValidator {
    type Target = Threema;

    fn validate(&self, target: Option<&Threema>) -> Vec<String> {
        let Some(threema) = target else {
            return missing_target("threema account");
        };
        let mut errors = Vec::new();
        check_present(&mut errors, threema.threema_id(), "threema id");
        if let Some(id) = threema.threema_id() {
            check_length(&mut errors, id, 8, 8, "threema id");
            check_pattern(
                &mut errors,
                id,
                &THREEMA_ID,
                "threema id may only contain capital letters and digits",
            );
        }
        errors
    }
}

/// Skype names: 6–32 characters, starting with a letter.
#[derive(Debug, Default)]
pub struct SkypeValidator;

impl Validator for SkypeValidator {
    type Target = Skype;

    fn validate(&self, target: Option<&Skype>) -> Vec<String> {
        let Some(skype) = target else {
            return missing_target("skype account");
        };
        let mut errors = Vec::new();
        check_present(&mut errors, skype.name(), "skype name");
        if let Some(name) = skype.name() {
            check_length(&mut errors, name, 6, 32, "skype name");
            check_pattern(
                &mut errors,
                name,
                &SKYPE_NAME,
                "skype name must start with a letter and may only contain letters, digits and . , - _",
            );
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twitter_missing_target_and_missing_username() {
        let validator = TwitterValidator;
        assert_eq!(
            validator.validate(None),
            vec!["twitter account must not be null"]
        );
        assert_eq!(
            validator.validate(Some(&Twitter::new())),
            vec!["username must be set"]
        );
    }

    #[test]
    fn twitter_accepts_a_plain_username() {
        let twitter = Twitter::with_username("abc");
        assert!(TwitterValidator.is_valid(Some(&twitter)));
    }

    #[test]
    fn twitter_empty_username_reports_only_the_length_error() {
        let twitter = Twitter::with_username("");
        let errors = TwitterValidator.validate(Some(&twitter));
        assert_eq!(
            errors,
            vec!["username must be between 1 and 15 characters long"]
        );
    }

    #[test]
    fn twitter_too_long_username_reports_length_and_pattern() {
        // 21 characters, all from the allowed alphabet.
        let twitter = Twitter::with_username("this_is_too_long_name");
        let errors = TwitterValidator.validate(Some(&twitter));
        assert_eq!(
            errors,
            vec![
                "username must be between 1 and 15 characters long",
                "username may only contain letters, digits and underscores",
            ]
        );
    }

    #[test]
    fn twitter_illegal_character_reports_only_the_pattern_error() {
        let twitter = Twitter::with_username("bad!name");
        let errors = TwitterValidator.validate(Some(&twitter));
        assert_eq!(
            errors,
            vec!["username may only contain letters, digits and underscores"]
        );
    }

    #[test]
    fn threema_id_must_be_eight_capitals_or_digits() {
        let validator = ThreemaValidator;
        assert_eq!(
            validator.validate(None),
            vec!["threema account must not be null"]
        );

        let mut threema = Threema::new();
        assert_eq!(validator.validate(Some(&threema)), vec!["threema id must be set"]);

        threema.set_threema_id("ABCD1234");
        assert!(validator.is_valid(Some(&threema)));

        threema.set_threema_id("abcd1234");
        assert_eq!(
            validator.validate(Some(&threema)),
            vec!["threema id may only contain capital letters and digits"]
        );

        threema.set_threema_id("ABC");
        assert_eq!(
            validator.validate(Some(&threema)),
            vec![
                "threema id must be exactly 8 characters long",
                "threema id may only contain capital letters and digits",
            ]
        );
    }

    #[test]
    fn skype_name_rules() {
        let validator = SkypeValidator;
        let mut skype = Skype::new();
        assert_eq!(validator.validate(Some(&skype)), vec!["skype name must be set"]);

        skype.set_name("alice.b");
        assert!(validator.is_valid(Some(&skype)));

        skype.set_name("short");
        assert_eq!(
            validator.validate(Some(&skype)),
            vec![
                "skype name must be between 6 and 32 characters long",
                "skype name must start with a letter and may only contain letters, digits and . , - _",
            ]
        );

        skype.set_name("1digitfirst");
        assert_eq!(
            validator.validate(Some(&skype)),
            vec![
                "skype name must start with a letter and may only contain letters, digits and . , - _",
            ]
        );
    }

    #[test]
    fn contact_options_nest_into_a_user_facing_enum() {
        let option = ContactOption::Twitter(Twitter::with_username("ada"));
        let json = serde_json::to_string(&option).unwrap();
        let back: ContactOption = serde_json::from_str(&json).unwrap();
        assert_eq!(option, back);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: everything the handle alphabet can produce within
            /// the length bounds passes the full validator.
            #[test]
            fn twitter_accepts_its_own_alphabet(username in "[A-Za-z0-9_]{1,15}") {
                let twitter = Twitter::with_username(username);
                prop_assert!(TwitterValidator.is_valid(Some(&twitter)));
            }

            /// Property: a character outside the alphabet always fails,
            /// whatever surrounds it.
            #[test]
            fn twitter_rejects_foreign_characters(
                prefix in "[A-Za-z0-9_]{0,6}",
                bad in "[^A-Za-z0-9_]",
                suffix in "[A-Za-z0-9_]{0,6}",
            ) {
                let twitter = Twitter::with_username(format!("{prefix}{bad}{suffix}"));
                prop_assert!(!TwitterValidator.is_valid(Some(&twitter)));
            }
        }
    }
}
