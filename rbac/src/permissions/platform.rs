//! Calling subjects and the platform-level override.
//!
//! Two-tier model:
//! - Platform super-admins bypass every resource-level check
//! - Everyone else is evaluated against resource security descriptors

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a subject (user principal, typically an email).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubjectId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SubjectId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The authenticated caller of an operation.
///
/// Produced by an identity collaborator per request and passed explicitly
/// to every check; the engine never stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub id: SubjectId,
    pub is_platform_super_admin: bool,
}

impl Subject {
    /// A regular subject, evaluated against resource ACLs.
    #[must_use]
    pub fn new(id: impl Into<SubjectId>) -> Self {
        Self {
            id: id.into(),
            is_platform_super_admin: false,
        }
    }

    /// A platform super-admin.
    #[must_use]
    pub fn platform_admin(id: impl Into<SubjectId>) -> Self {
        Self {
            id: id.into(),
            is_platform_super_admin: true,
        }
    }

    /// Derive the subject from identity-provider role claims.
    ///
    /// The subject is a super-admin when `roles` contains `admin_role`.
    #[must_use]
    pub fn from_platform_roles<S: AsRef<str>>(
        id: impl Into<SubjectId>,
        roles: &[S],
        admin_role: &str,
    ) -> Self {
        Self {
            id: id.into(),
            is_platform_super_admin: roles.iter().any(|r| r.as_ref() == admin_role),
        }
    }

    /// Whether resource-level checks are skipped for this subject.
    #[must_use]
    pub const fn bypasses_resource_checks(&self) -> bool {
        self.is_platform_super_admin
    }
}
