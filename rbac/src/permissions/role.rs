//! Roles and permissions.
//!
//! A [`Permission`] is one atomic capability. A [`PermissionSet`] is the
//! bitfield a role grants. Roles are NOT ordered by privilege: every role
//! enumerates its own permissions in the registry table.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::RbacError;

/// One atomic capability on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Read the resource itself.
    Read,
    /// Modify the resource.
    Write,
    /// Delete the resource.
    Delete,
    /// Create resources underneath this one.
    CreateChildren,
    /// See the full access-control list.
    ReadSecurity,
    /// Change the default role or the access-control list.
    WriteSecurity,
}

impl Permission {
    /// Returns all permissions as a slice.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Read,
            Self::Write,
            Self::Delete,
            Self::CreateChildren,
            Self::ReadSecurity,
            Self::WriteSecurity,
        ]
    }

    /// Wire name of the permission.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Delete => "delete",
            Self::CreateChildren => "create_children",
            Self::ReadSecurity => "read_security",
            Self::WriteSecurity => "write_security",
        }
    }

    /// The single-bit set for this permission.
    #[must_use]
    pub const fn flag(self) -> PermissionSet {
        match self {
            Self::Read => PermissionSet::READ,
            Self::Write => PermissionSet::WRITE,
            Self::Delete => PermissionSet::DELETE,
            Self::CreateChildren => PermissionSet::CREATE_CHILDREN,
            Self::ReadSecurity => PermissionSet::READ_SECURITY,
            Self::WriteSecurity => PermissionSet::WRITE_SECURITY,
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = RbacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| RbacError::Validation(format!("Unknown permission: {s}")))
    }
}

bitflags! {
    /// Set of permissions granted by a role.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PermissionSet: u8 {
        const READ            = 1 << 0;
        const WRITE           = 1 << 1;
        const DELETE          = 1 << 2;
        const CREATE_CHILDREN = 1 << 3;
        const READ_SECURITY   = 1 << 4;
        const WRITE_SECURITY  = 1 << 5;
    }
}

impl PermissionSet {
    /// Check whether the set grants `permission`.
    #[must_use]
    pub const fn allows(self, permission: Permission) -> bool {
        self.contains(permission.flag())
    }

    /// The granted permissions, in declaration order.
    pub fn permissions(self) -> impl Iterator<Item = Permission> {
        Permission::all()
            .iter()
            .copied()
            .filter(move |p| self.allows(*p))
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |acc, p| acc.union(p.flag()))
    }
}

/// Role held by a subject on a resource.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    None,
    Viewer,
    User,
    Editor,
    Validator,
    Admin,
}

impl Role {
    /// Number of roles; the size of every role table.
    pub const COUNT: usize = 6;

    /// Returns all roles as a slice.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::None,
            Self::Viewer,
            Self::User,
            Self::Editor,
            Self::Validator,
            Self::Admin,
        ]
    }

    /// Wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Viewer => "viewer",
            Self::User => "user",
            Self::Editor => "editor",
            Self::Validator => "validator",
            Self::Admin => "admin",
        }
    }

    /// Slot of this role in a role table.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RbacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| RbacError::Validation(format!("Unknown role: {s}")))
    }
}
