//! `labmon-users` — user accounts and their contact options.
//!
//! Pure domain data: entities with getter/setter accessors and the
//! validators that decide whether an instance is fit to be persisted.

pub mod contact;
pub mod user;

pub use contact::{
    ContactOption, Skype, SkypeValidator, Threema, ThreemaValidator, Twitter, TwitterValidator,
};
pub use user::{Credential, User, UserValidator};
