//! Role registry.
//!
//! Maps every [`Role`] to its [`PermissionSet`] per resource kind. The table
//! is plain data so it can be audited (see the `rbac-audit` binary) and tested
//! without any resource in play.

use std::collections::{BTreeMap, HashMap};

use super::role::{Permission, PermissionSet, Role};
use crate::resources::ResourceKind;

/// Permission table shared by every resource kind unless overridden.
///
/// Indexed by [`Role::index`].
pub const STANDARD_ROLE_TABLE: [PermissionSet; Role::COUNT] = [
    // none
    PermissionSet::empty(),
    // viewer
    PermissionSet::READ,
    // user
    PermissionSet::READ.union(PermissionSet::CREATE_CHILDREN),
    // editor
    PermissionSet::READ
        .union(PermissionSet::WRITE)
        .union(PermissionSet::CREATE_CHILDREN),
    // validator
    PermissionSet::READ.union(PermissionSet::WRITE),
    // admin
    PermissionSet::all(),
];

/// Permission sets for every role of one resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleTable([PermissionSet; Role::COUNT]);

impl RoleTable {
    /// The standard table.
    #[must_use]
    pub const fn standard() -> Self {
        Self(STANDARD_ROLE_TABLE)
    }

    /// Permissions granted by `role`.
    #[must_use]
    pub const fn permissions_of(&self, role: Role) -> PermissionSet {
        self.0[role.index()]
    }

    /// Check whether `role` grants `permission`.
    #[must_use]
    pub const fn has_permission(&self, role: Role, permission: Permission) -> bool {
        self.permissions_of(role).allows(permission)
    }

    /// Replace the permissions of one role.
    #[must_use]
    pub fn with_role(mut self, role: Role, permissions: PermissionSet) -> Self {
        self.0[role.index()] = permissions;
        self
    }
}

impl Default for RoleTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Registry of role tables, one per resource kind.
///
/// Kinds without an explicit table use the standard one.
#[derive(Debug, Clone, Default)]
pub struct RoleRegistry {
    fallback: RoleTable,
    per_kind: HashMap<ResourceKind, RoleTable>,
}

impl RoleRegistry {
    /// Registry where every kind uses [`STANDARD_ROLE_TABLE`].
    #[must_use]
    pub fn standard() -> Self {
        Self::default()
    }

    /// Install a dedicated table for `kind`.
    #[must_use]
    pub fn with_kind_table(mut self, kind: ResourceKind, table: RoleTable) -> Self {
        self.per_kind.insert(kind, table);
        self
    }

    /// Override a single role's permissions for `kind`.
    #[must_use]
    pub fn with_kind_override(
        self,
        kind: ResourceKind,
        role: Role,
        permissions: PermissionSet,
    ) -> Self {
        let table = self.table(kind).with_role(role, permissions);
        self.with_kind_table(kind, table)
    }

    /// The table applied to resources of `kind`.
    #[must_use]
    pub fn table(&self, kind: ResourceKind) -> &RoleTable {
        self.per_kind.get(&kind).unwrap_or(&self.fallback)
    }

    /// Permissions granted by `role` on a resource of `kind`.
    #[must_use]
    pub fn permissions_of(&self, kind: ResourceKind, role: Role) -> PermissionSet {
        self.table(kind).permissions_of(role)
    }

    /// Check whether `role` grants `permission` on a resource of `kind`.
    #[must_use]
    pub fn has_permission(&self, kind: ResourceKind, role: Role, permission: Permission) -> bool {
        self.table(kind).has_permission(role, permission)
    }

    /// Role → permissions listing for `kind`, ordered by role.
    #[must_use]
    pub fn matrix(&self, kind: ResourceKind) -> BTreeMap<Role, Vec<Permission>> {
        let table = self.table(kind);
        Role::all()
            .iter()
            .map(|role| (*role, table.permissions_of(*role).permissions().collect()))
            .collect()
    }
}
