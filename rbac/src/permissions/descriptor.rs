//! Security descriptors attached to every resource.

use serde::{Deserialize, Serialize};

use super::platform::SubjectId;
use super::role::Role;

/// One explicit grant: `role` for subject `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControlEntry {
    pub id: SubjectId,
    pub role: Role,
}

impl AccessControlEntry {
    #[must_use]
    pub fn new(id: impl Into<SubjectId>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }
}

/// Default role plus the ordered ACL of a resource.
///
/// Only constructed through [`super::acl::create_descriptor`] (or the
/// single-owner constructor), so the ACL never holds two entries for the
/// same subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityDescriptor {
    #[serde(rename = "default")]
    pub(super) default_role: Role,
    #[serde(rename = "accessControlList")]
    pub(super) acl: Vec<AccessControlEntry>,
}

impl SecurityDescriptor {
    /// Descriptor for a freshly created resource with no caller-supplied
    /// security: nobody but `owner` (as admin) gets in.
    #[must_use]
    pub fn owned_by(owner: &SubjectId) -> Self {
        Self {
            default_role: Role::None,
            acl: vec![AccessControlEntry::new(owner.clone(), Role::Admin)],
        }
    }

    #[must_use]
    pub const fn default_role(&self) -> Role {
        self.default_role
    }

    #[must_use]
    pub fn acl(&self) -> &[AccessControlEntry] {
        &self.acl
    }

    /// The explicit entry for `subject_id`, if any.
    #[must_use]
    pub fn entry(&self, subject_id: &SubjectId) -> Option<&AccessControlEntry> {
        self.acl.iter().find(|e| &e.id == subject_id)
    }

    /// ACL role of `subject_id` if present, otherwise the default role.
    #[must_use]
    pub fn effective_role(&self, subject_id: &SubjectId) -> Role {
        self.entry(subject_id)
            .map_or(self.default_role, |entry| entry.role)
    }

    /// Subjects holding an explicit entry, in ACL order.
    pub fn subjects(&self) -> impl Iterator<Item = &SubjectId> {
        self.acl.iter().map(|e| &e.id)
    }

    /// Copy keeping only `subject_id`'s own entry (zero or one).
    #[must_use]
    pub fn redacted_for(&self, subject_id: &SubjectId) -> Self {
        Self {
            default_role: self.default_role,
            acl: self.entry(subject_id).cloned().into_iter().collect(),
        }
    }
}

/// Caller-supplied security for a resource being created.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityRequest {
    #[serde(rename = "default", default)]
    pub default_role: Role,
    #[serde(rename = "accessControlList", default)]
    pub acl: Vec<AccessControlEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(default_role: Role, acl: Vec<AccessControlEntry>) -> SecurityDescriptor {
        SecurityDescriptor { default_role, acl }
    }

    #[test]
    fn test_effective_role_prefers_acl_entry() {
        let alice = SubjectId::from("alice@example.com");
        let sec = descriptor(
            Role::Viewer,
            vec![AccessControlEntry::new(alice.clone(), Role::None)],
        );
        // an explicit NONE entry overrides a more generous default
        assert_eq!(sec.effective_role(&alice), Role::None);
        assert_eq!(sec.effective_role(&SubjectId::from("bob@example.com")), Role::Viewer);
    }

    #[test]
    fn test_owned_by() {
        let owner = SubjectId::from("owner@example.com");
        let sec = SecurityDescriptor::owned_by(&owner);
        assert_eq!(sec.default_role(), Role::None);
        assert_eq!(sec.acl(), &[AccessControlEntry::new(owner.clone(), Role::Admin)]);
        assert_eq!(sec.effective_role(&owner), Role::Admin);
    }

    #[test]
    fn test_redacted_for_keeps_own_entry_only() {
        let sec = descriptor(
            Role::User,
            vec![
                AccessControlEntry::new("alice@example.com", Role::Admin),
                AccessControlEntry::new("bob@example.com", Role::Editor),
            ],
        );

        let for_bob = sec.redacted_for(&SubjectId::from("bob@example.com"));
        assert_eq!(for_bob.default_role(), Role::User);
        assert_eq!(for_bob.acl(), &[AccessControlEntry::new("bob@example.com", Role::Editor)]);

        let for_carol = sec.redacted_for(&SubjectId::from("carol@example.com"));
        assert_eq!(for_carol.default_role(), Role::User);
        assert!(for_carol.acl().is_empty());
    }

    #[test]
    fn test_wire_format() {
        let sec = descriptor(
            Role::Viewer,
            vec![AccessControlEntry::new("alice@example.com", Role::Admin)],
        );
        let json = serde_json::to_value(&sec).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "default": "viewer",
                "accessControlList": [{ "id": "alice@example.com", "role": "admin" }]
            })
        );

        let request: SecurityRequest = serde_json::from_value(serde_json::json!({
            "accessControlList": [{ "id": "bob@example.com", "role": "editor" }]
        }))
        .unwrap();
        assert_eq!(request.default_role, Role::None);
        assert_eq!(request.acl.len(), 1);
    }
}
