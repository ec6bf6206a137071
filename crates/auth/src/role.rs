//! Role graph: named roles including sub-roles and overriding permissions.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use labmon_core::identity::Identity;
use labmon_core::impl_change_aware;
use labmon_core::validate::{Validator, check_non_blank, missing_target};

use crate::permissions::{Permission, PermissionStatus};

/// A named role.
///
/// A role may include other roles (held as `Arc`s so one role instance can be
/// shared across several graphs) and carries direct permission-status
/// overrides. Both collections tolerate concurrent readers and writers:
/// accessors hand out snapshots, so an iterating reader may or may not
/// observe a concurrent mutation but is never corrupted by one. Nothing here
/// detects inclusion cycles — a role may transitively include itself.
#[derive(Debug)]
pub struct Role {
    identity: Identity,
    name: String,
    included_roles: RwLock<BTreeSet<Arc<Role>>>,
    included_permissions: RwLock<BTreeMap<Permission, PermissionStatus>>,
}

impl_change_aware!(Role);

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            identity: Identity::new(),
            name: name.into(),
            included_roles: RwLock::new(BTreeSet::new()),
            included_permissions: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Snapshot of the directly included roles, in identity order.
    pub fn included_roles(&self) -> Vec<Arc<Role>> {
        self.roles_read().iter().cloned().collect()
    }

    /// Snapshot of the direct permission overrides, in permission order.
    pub fn included_permissions(&self) -> BTreeMap<Permission, PermissionStatus> {
        self.permissions_read().clone()
    }

    /// Include `role`. Returns whether the set contains it afterwards.
    pub fn add_role(&self, role: Arc<Role>) -> bool {
        let mut roles = self.roles_write();
        roles.insert(Arc::clone(&role));
        debug!(role = %self.name, included = %role.name, "included role added");
        roles.contains(&role)
    }

    /// Stop including `role`. Returns whether the set lacks it afterwards,
    /// so removing a role that was never included confirms with `true`.
    pub fn remove_role(&self, role: &Role) -> bool {
        let mut roles = self.roles_write();
        roles.remove(role);
        debug!(role = %self.name, removed = %role.name, "included role removed");
        !roles.contains(role)
    }

    /// Whether `role` is directly included.
    pub fn includes_role(&self, role: &Role) -> bool {
        self.roles_read().contains(role)
    }

    /// Upsert a permission override; a prior status for the same permission
    /// is overwritten. Returns whether the key is present afterwards.
    pub fn add_permission(&self, permission: Permission, status: PermissionStatus) -> bool {
        let mut permissions = self.permissions_write();
        permissions.insert(permission.clone(), status);
        debug!(role = %self.name, permission = %permission, ?status, "permission override set");
        permissions.contains_key(&permission)
    }

    /// Drop a permission override. Returns whether the key is absent
    /// afterwards; no-op removals confirm with `true`.
    pub fn remove_permission(&self, permission: &Permission) -> bool {
        let mut permissions = self.permissions_write();
        permissions.remove(permission);
        debug!(role = %self.name, permission = %permission, "permission override removed");
        !permissions.contains_key(permission)
    }

    /// Direct override status for `permission`, if any.
    pub fn permission_status(&self, permission: &Permission) -> Option<PermissionStatus> {
        self.permissions_read().get(permission).copied()
    }

    // A poisoned lock means a writer panicked mid-mutation; both collections
    // stay structurally sound across every mutation here, so the data is
    // still usable and the graph keeps operating on it.
    fn roles_read(&self) -> RwLockReadGuard<'_, BTreeSet<Arc<Role>>> {
        match self.included_roles.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn roles_write(&self) -> RwLockWriteGuard<'_, BTreeSet<Arc<Role>>> {
        match self.included_roles.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn permissions_read(&self) -> RwLockReadGuard<'_, BTreeMap<Permission, PermissionStatus>> {
        match self.included_permissions.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn permissions_write(&self) -> RwLockWriteGuard<'_, BTreeMap<Permission, PermissionStatus>> {
        match self.included_permissions.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Role[id={}, name={}]", self.identity, self.name)
    }
}

/// Validates a [`Role`]'s own fields (not the graph it spans).
#[derive(Debug, Default)]
pub struct RoleValidator;

impl Validator for RoleValidator {
    type Target = Role;

    fn validate(&self, target: Option<&Role>) -> Vec<String> {
        let Some(role) = target else {
            return missing_target("role");
        };
        let mut errors = Vec::new();
        check_non_blank(&mut errors, role.name(), "role name");
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labmon_core::ChangeAware;

    #[test]
    fn added_role_shows_up_in_the_snapshot() {
        let admin = Role::new("admin");
        let reporting = Arc::new(Role::new("reporting"));

        assert!(admin.add_role(Arc::clone(&reporting)));
        assert!(admin.includes_role(&reporting));
        let snapshot = admin.included_roles();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].name(), "reporting");
    }

    #[test]
    fn removed_role_is_gone_and_noop_removal_confirms_absence() {
        let admin = Role::new("admin");
        let reporting = Arc::new(Role::new("reporting"));

        admin.add_role(Arc::clone(&reporting));
        assert!(admin.remove_role(&reporting));
        assert!(!admin.includes_role(&reporting));
        // Never-included role: removal still confirms the post-condition.
        assert!(admin.remove_role(&Role::new("stranger")));
    }

    #[test]
    fn adding_a_permission_twice_keeps_the_latest_status() {
        let role = Role::new("clerk");
        let perm = Permission::new("booking.write");

        assert!(role.add_permission(perm.clone(), PermissionStatus::Granted));
        assert!(role.add_permission(perm.clone(), PermissionStatus::Denied));

        let snapshot = role.included_permissions();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get(&perm), Some(&PermissionStatus::Denied));
        assert_eq!(role.permission_status(&perm), Some(PermissionStatus::Denied));
    }

    #[test]
    fn removing_a_permission_confirms_absence() {
        let role = Role::new("clerk");
        let perm = Permission::new("booking.write");

        role.add_permission(perm.clone(), PermissionStatus::Granted);
        assert!(role.remove_permission(&perm));
        assert_eq!(role.permission_status(&perm), None);
        assert!(role.remove_permission(&perm));
    }

    #[test]
    fn snapshots_are_isolated_from_later_mutation() {
        let role = Role::new("clerk");
        let perm = Permission::new("booking.read");
        role.add_permission(perm.clone(), PermissionStatus::Granted);

        let snapshot = role.included_permissions();
        role.remove_permission(&perm);

        assert_eq!(snapshot.get(&perm), Some(&PermissionStatus::Granted));
        assert_eq!(role.permission_status(&perm), None);
    }

    #[test]
    fn a_role_may_include_itself_transitively() {
        let a = Arc::new(Role::new("a"));
        let b = Arc::new(Role::new("b"));
        // a -> b -> a: legal here, the flattening collaborator deals with it.
        assert!(a.add_role(Arc::clone(&b)));
        assert!(b.add_role(Arc::clone(&a)));
        assert!(a.includes_role(&b));
        assert!(b.includes_role(&a));
    }

    #[test]
    fn roles_are_entities_with_identity_equality() {
        let mut a = Role::new("same name");
        let mut b = Role::new("same name");
        assert_ne!(a, b);
        a.set_id(3);
        b.set_id(3);
        assert_eq!(a, b);
        assert_eq!(a.version(), 1);
        assert_eq!(a.increment_version(), 2);
    }

    #[test]
    fn validator_rejects_blank_names_and_missing_targets() {
        let validator = RoleValidator;
        assert_eq!(validator.validate(None), vec!["role must not be null"]);
        assert!(!validator.is_valid(None));

        let blank = Role::new("   ");
        assert_eq!(validator.validate(Some(&blank)), vec!["role name must not be blank"]);
        assert!(validator.is_valid(Some(&Role::new("admin"))));
    }
}
