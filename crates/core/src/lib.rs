//! `labmon-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the identity/version primitive shared by every entity, the domain error
//! model, and the validation toolkit the per-entity validators are built from.

pub mod error;
pub mod identity;
pub mod validate;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use identity::{ChangeAware, ExpectedVersion, Identity};
pub use validate::Validator;
pub use value_object::ValueObject;
