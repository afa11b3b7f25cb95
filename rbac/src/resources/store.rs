//! Resource store collaborator.
//!
//! The engine never persists resources itself; it reads immutable chain
//! snapshots and writes descriptors back through this trait.

use async_trait::async_trait;

use super::types::{ResourceId, ResourceKind, ResourceNode, ResourcePath};
use crate::permissions::SecurityDescriptor;

/// Errors reported by resource store implementations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No such resource under the requested parent.
    #[error("Resource {0} not found")]
    NotFound(ResourceId),

    /// A resource with this id already exists.
    #[error("Resource {0} already exists")]
    AlreadyExists(ResourceId),

    /// The descriptor changed since it was read.
    #[error("Resource {id} was modified concurrently (expected version {expected}, found {actual})")]
    VersionConflict {
        id: ResourceId,
        expected: u64,
        actual: u64,
    },

    /// Backend failure (connection, serialization, ...).
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Persistence of the resource forest.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Resolve `path` root → leaf.
    ///
    /// Fails with `NotFound` naming the first id that does not exist or whose
    /// stored parent is not the preceding id of the path.
    async fn fetch_chain(&self, path: &ResourcePath) -> Result<Vec<ResourceNode>, StoreError>;

    /// Direct children of `parent` having `kind`, in creation order.
    /// With no parent, lists root resources.
    async fn list_children(
        &self,
        parent: Option<&ResourceId>,
        kind: ResourceKind,
    ) -> Result<Vec<ResourceNode>, StoreError>;

    /// Store a new resource, returning it with its stored version.
    async fn insert(&self, node: ResourceNode) -> Result<ResourceNode, StoreError>;

    /// Remove a resource together with its whole subtree.
    async fn remove(&self, id: &ResourceId) -> Result<(), StoreError>;

    /// Compare-and-swap the descriptor of `id`.
    ///
    /// Succeeds only while the stored version equals `expected_version`;
    /// returns the new version.
    async fn replace_descriptor(
        &self,
        id: &ResourceId,
        expected_version: u64,
        security: SecurityDescriptor,
    ) -> Result<u64, StoreError>;
}
