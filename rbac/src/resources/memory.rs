//! In-memory resource store.
//!
//! Backs embedded deployments and tests. Nodes live in a `DashMap`, so chain
//! reads never block each other and descriptor writes take the entry's
//! exclusive guard for the compare-and-swap.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::store::{ResourceStore, StoreError};
use super::types::{ResourceId, ResourceKind, ResourceNode, ResourcePath};
use crate::permissions::SecurityDescriptor;

/// Stored node paired with its insertion sequence (listing order).
struct StoredNode {
    node: ResourceNode,
    sequence: u64,
}

/// Thread-safe in-memory resource forest.
pub struct InMemoryResourceStore {
    nodes: DashMap<ResourceId, StoredNode>,
    next_sequence: AtomicU64,
}

impl Default for InMemoryResourceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryResourceStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            nodes: DashMap::new(),
            next_sequence: AtomicU64::new(0),
        }
    }

    /// Number of stored resources.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ids of the direct children of `id`, any kind.
    fn child_ids(&self, id: &ResourceId) -> Vec<ResourceId> {
        self.nodes
            .iter()
            .filter(|entry| entry.node.parent_id.as_ref() == Some(id))
            .map(|entry| entry.key().clone())
            .collect()
    }
}

#[async_trait]
impl ResourceStore for InMemoryResourceStore {
    async fn fetch_chain(&self, path: &ResourcePath) -> Result<Vec<ResourceNode>, StoreError> {
        let mut chain: Vec<ResourceNode> = Vec::with_capacity(path.depth());

        for id in path.ids() {
            let node = self
                .nodes
                .get(id)
                .map(|entry| entry.node.clone())
                .ok_or_else(|| StoreError::NotFound(id.clone()))?;

            // Cross-tenant addressing: the id exists but not under this parent
            let expected_parent = chain.last().map(|parent| &parent.id);
            if node.parent_id.as_ref() != expected_parent {
                return Err(StoreError::NotFound(id.clone()));
            }

            chain.push(node);
        }

        Ok(chain)
    }

    async fn list_children(
        &self,
        parent: Option<&ResourceId>,
        kind: ResourceKind,
    ) -> Result<Vec<ResourceNode>, StoreError> {
        let mut children: Vec<(u64, ResourceNode)> = self
            .nodes
            .iter()
            .filter(|entry| entry.node.kind == kind && entry.node.parent_id.as_ref() == parent)
            .map(|entry| (entry.sequence, entry.node.clone()))
            .collect();

        children.sort_by_key(|(sequence, _)| *sequence);
        Ok(children.into_iter().map(|(_, node)| node).collect())
    }

    async fn insert(&self, mut node: ResourceNode) -> Result<ResourceNode, StoreError> {
        if let Some(parent_id) = &node.parent_id {
            if !self.nodes.contains_key(parent_id) {
                return Err(StoreError::NotFound(parent_id.clone()));
            }
        }

        node.version = 1;
        let sequence = self.next_sequence.fetch_add(1, Ordering::Relaxed);

        match self.nodes.entry(node.id.clone()) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists(node.id)),
            Entry::Vacant(slot) => {
                slot.insert(StoredNode {
                    node: node.clone(),
                    sequence,
                });
                Ok(node)
            }
        }
    }

    async fn remove(&self, id: &ResourceId) -> Result<(), StoreError> {
        if !self.nodes.contains_key(id) {
            return Err(StoreError::NotFound(id.clone()));
        }

        let mut pending = vec![id.clone()];
        while let Some(current) = pending.pop() {
            pending.extend(self.child_ids(&current));
            self.nodes.remove(&current);
        }

        Ok(())
    }

    async fn replace_descriptor(
        &self,
        id: &ResourceId,
        expected_version: u64,
        security: SecurityDescriptor,
    ) -> Result<u64, StoreError> {
        let mut entry = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        let actual = entry.node.version;
        if actual != expected_version {
            return Err(StoreError::VersionConflict {
                id: id.clone(),
                expected: expected_version,
                actual,
            });
        }

        entry.node.security = security;
        entry.node.version = actual + 1;
        Ok(entry.node.version)
    }
}
