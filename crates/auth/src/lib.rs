//! `labmon-auth` — roles and permission assignments.
//!
//! This crate holds the role graph only: a role names other roles it
//! includes and overrides permission statuses directly. Flattening the graph
//! into effective permissions (including any cycle handling) is the
//! authorization collaborator's job and lives outside this crate.

pub mod permissions;
pub mod role;

pub use permissions::{Permission, PermissionStatus};
pub use role::{Role, RoleValidator};
