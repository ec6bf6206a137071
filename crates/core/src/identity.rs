//! Identity/version primitive composed by every entity.
//!
//! Entities carry an [`Identity`] value (has-a, not is-a) and delegate
//! equality, hashing and ordering to it via [`impl_change_aware!`].

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};

/// Identity and change tracking for a single entity instance.
///
/// Two identifiers live side by side:
///
/// - `key`: a surrogate key generated eagerly at construction time. It never
///   changes and clones share it, so an unsaved entity and its clones compare
///   equal while two independently constructed instances never do.
/// - `id`: the persisted identifier. Unset until an external persistence
///   collaborator assigns it through [`set_id`](Identity::set_id); the domain
///   layer itself never assigns ids.
///
/// Equality and ordering use the persisted id when both sides have one and
/// fall back to the surrogate key otherwise. The hash follows the same rule,
/// which makes it unstable across the unset→set transition of `id`: do not
/// keep an entity in a hash-based container while it is being saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    key: Uuid,
    id: Option<i64>,
    version: u64,
}

impl Identity {
    /// Fresh identity: no persisted id yet, version 1.
    pub fn new() -> Self {
        Self {
            key: Uuid::now_v7(),
            id: None,
            version: 1,
        }
    }

    /// Persisted identifier, if one has been assigned.
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Assign the persisted identifier. Plain accessor, no validation;
    /// reserved for the persistence collaborator.
    pub fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    /// Current version, starting at 1 for a fresh instance.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Bump the version and return the new value (pre-increment semantics).
    ///
    /// Called by the persistence collaborator on each logical update.
    pub fn increment_version(&mut self) -> u64 {
        self.version += 1;
        self.version
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => self.key == other.key,
        }
    }
}

impl Eq for Identity {}

impl Hash for Identity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.id {
            Some(id) => id.hash(state),
            None => self.key.hash(state),
        }
    }
}

impl PartialOrd for Identity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Identity {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => self.key.cmp(&other.key),
        }
    }
}

impl core::fmt::Display for Identity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.id {
            Some(id) => write!(f, "{id}"),
            None => f.write_str("unsaved"),
        }
    }
}

/// Capability: has identity and a version counter.
///
/// Implemented for entity types via [`impl_change_aware!`]; collaborators
/// that only care about "something identifiable and versioned" take this
/// trait instead of a concrete entity type.
pub trait ChangeAware {
    fn identity(&self) -> &Identity;
    fn identity_mut(&mut self) -> &mut Identity;

    fn id(&self) -> Option<i64> {
        self.identity().id()
    }

    fn set_id(&mut self, id: i64) {
        self.identity_mut().set_id(id);
    }

    fn version(&self) -> u64 {
        self.identity().version()
    }

    fn increment_version(&mut self) -> u64 {
        self.identity_mut().increment_version()
    }
}

/// Implement [`ChangeAware`] plus identity-delegating `PartialEq`, `Eq`,
/// `Hash`, `PartialOrd` and `Ord` for an entity type with an `identity`
/// field.
#[macro_export]
macro_rules! impl_change_aware {
    ($t:ty) => {
        impl $crate::identity::ChangeAware for $t {
            fn identity(&self) -> &$crate::identity::Identity {
                &self.identity
            }

            fn identity_mut(&mut self) -> &mut $crate::identity::Identity {
                &mut self.identity
            }
        }

        impl PartialEq for $t {
            fn eq(&self, other: &Self) -> bool {
                self.identity == other.identity
            }
        }

        impl Eq for $t {}

        impl core::hash::Hash for $t {
            fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
                core::hash::Hash::hash(&self.identity, state);
            }
        }

        impl PartialOrd for $t {
            fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $t {
            fn cmp(&self, other: &Self) -> core::cmp::Ordering {
                self.identity.cmp(&other.identity)
            }
        }
    };
}

/// Optimistic concurrency expectation checked by the persistence
/// collaborator before applying an update.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExpectedVersion {
    /// Skip version checking (idempotent writes, migrations).
    Any,
    /// Require the entity to be at an exact version.
    Exact(u64),
}

impl ExpectedVersion {
    pub fn matches(self, actual: u64) -> bool {
        match self {
            ExpectedVersion::Any => true,
            ExpectedVersion::Exact(v) => v == actual,
        }
    }

    pub fn check(self, actual: u64) -> DomainResult<()> {
        if self.matches(actual) {
            Ok(())
        } else {
            Err(DomainError::conflict(format!(
                "stale version (expected: {self:?}, actual: {actual})"
            )))
        }
    }
}
