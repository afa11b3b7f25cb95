//! Resource Types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::permissions::SecurityDescriptor;

/// Opaque resource identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh time-ordered id carrying the kind prefix, e.g. `w-0190...`.
    #[must_use]
    pub fn generate(kind: ResourceKind) -> Self {
        Self(format!("{}-{}", kind.id_prefix(), uuid::Uuid::now_v7().simple()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Kind of a node in the resource forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Organization,
    Workspace,
    Solution,
    Scenario,
    Dataset,
}

impl ResourceKind {
    /// Returns all kinds as a slice.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Organization,
            Self::Workspace,
            Self::Solution,
            Self::Scenario,
            Self::Dataset,
        ]
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Organization => "organization",
            Self::Workspace => "workspace",
            Self::Solution => "solution",
            Self::Scenario => "scenario",
            Self::Dataset => "dataset",
        }
    }

    /// Kind of the direct parent; `None` for roots.
    #[must_use]
    pub const fn parent_kind(self) -> Option<Self> {
        match self {
            Self::Organization => None,
            Self::Workspace => Some(Self::Organization),
            Self::Solution | Self::Scenario | Self::Dataset => Some(Self::Workspace),
        }
    }

    #[must_use]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::Organization => "o",
            Self::Workspace => "w",
            Self::Solution => "sol",
            Self::Scenario => "s",
            Self::Dataset => "d",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Address of a resource: every id from its organization down to itself.
///
/// A resource is only reachable through its real ancestors; the store
/// rejects paths whose links do not match stored parent ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourcePath(Vec<ResourceId>);

impl ResourcePath {
    /// Path of an organization.
    #[must_use]
    pub fn root(id: impl Into<ResourceId>) -> Self {
        Self(vec![id.into()])
    }

    /// Path of a direct child of this resource.
    #[must_use]
    pub fn child(&self, id: impl Into<ResourceId>) -> Self {
        let mut ids = self.0.clone();
        ids.push(id.into());
        Self(ids)
    }

    /// The addressed resource.
    #[must_use]
    pub fn leaf(&self) -> &ResourceId {
        // never empty: every constructor starts from a root id
        &self.0[self.0.len() - 1]
    }

    /// Path of the parent, `None` for organizations.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        (self.0.len() > 1).then(|| Self(self.0[..self.0.len() - 1].to_vec()))
    }

    #[must_use]
    pub fn ids(&self) -> &[ResourceId] {
        &self.0
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            f.write_str(id.as_str())?;
        }
        Ok(())
    }
}

/// A resource as held by the store.
///
/// `parent_id` is a lookup-only back reference; parents are resolved
/// through the store, never embedded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNode {
    pub id: ResourceId,
    pub kind: ResourceKind,
    pub parent_id: Option<ResourceId>,
    pub security: SecurityDescriptor,
    /// Descriptor version, bumped by every successful descriptor write.
    pub version: u64,
}

impl ResourceNode {
    /// New node at version 0; the store assigns the stored version.
    #[must_use]
    pub const fn new(
        id: ResourceId,
        kind: ResourceKind,
        parent_id: Option<ResourceId>,
        security: SecurityDescriptor,
    ) -> Self {
        Self {
            id,
            kind,
            parent_id,
            security,
            version: 0,
        }
    }
}

/// Listing item: a visible resource with security as seen by the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSummary {
    pub id: ResourceId,
    pub kind: ResourceKind,
    pub parent_id: Option<ResourceId>,
    pub security: SecurityDescriptor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_kinds_form_the_hierarchy() {
        assert_eq!(ResourceKind::Organization.parent_kind(), None);
        assert_eq!(
            ResourceKind::Workspace.parent_kind(),
            Some(ResourceKind::Organization)
        );
        for leaf in [ResourceKind::Solution, ResourceKind::Scenario, ResourceKind::Dataset] {
            assert_eq!(leaf.parent_kind(), Some(ResourceKind::Workspace));
        }
    }

    #[test]
    fn test_path_navigation() {
        let org = ResourcePath::root("o-1");
        let scenario = org.child("w-1").child("s-1");

        assert_eq!(scenario.leaf().as_str(), "s-1");
        assert_eq!(scenario.depth(), 3);
        assert_eq!(scenario.to_string(), "o-1/w-1/s-1");
        assert_eq!(scenario.parent(), Some(org.child("w-1")));
        assert_eq!(org.parent(), None);
    }

    #[test]
    fn test_generated_ids_carry_prefix_and_differ() {
        let a = ResourceId::generate(ResourceKind::Solution);
        let b = ResourceId::generate(ResourceKind::Solution);
        assert!(a.as_str().starts_with("sol-"));
        assert_ne!(a, b);
    }
}
