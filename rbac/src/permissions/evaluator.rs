//! Permission evaluation over a resource chain.
//!
//! Resolution order for `authorize(subject, path, permission)`:
//! 1. Resolve the chain root → leaf (a missing link is `ResourceNotFound`)
//! 2. Platform super-admins pass
//! 3. Every ancestor requires `READ` for the subject's effective role
//! 4. The leaf requires the requested permission
//!
//! The first failing node aborts the walk and is the one reported.

use std::sync::Arc;

use tracing::debug;

use super::descriptor::SecurityDescriptor;
use super::platform::{Subject, SubjectId};
use super::registry::RoleRegistry;
use super::role::{Permission, Role};
use crate::error::RbacError;
use crate::resources::{ResourceNode, ResourcePath, ResourceStore};

/// Effective role of `subject_id` on a descriptor.
#[must_use]
pub fn effective_role(subject_id: &SubjectId, descriptor: &SecurityDescriptor) -> Role {
    descriptor.effective_role(subject_id)
}

/// Evaluates permission checks against chains fetched from a resource store.
///
/// Holds no mutable state: clones are cheap and can be shared across tasks.
#[derive(Clone)]
pub struct AccessEvaluator {
    store: Arc<dyn ResourceStore>,
    registry: Arc<RoleRegistry>,
}

impl AccessEvaluator {
    pub fn new(store: Arc<dyn ResourceStore>, registry: Arc<RoleRegistry>) -> Self {
        Self { store, registry }
    }

    #[must_use]
    pub fn registry(&self) -> &RoleRegistry {
        &self.registry
    }

    /// Fetch the chain for `path` and require `permission` on its leaf.
    ///
    /// Returns the fetched chain so callers can keep working on the same
    /// snapshot.
    #[tracing::instrument(skip(self), fields(subject = %subject.id))]
    pub async fn authorize(
        &self,
        subject: &Subject,
        path: &ResourcePath,
        permission: Permission,
    ) -> Result<Vec<ResourceNode>, RbacError> {
        let chain = self.store.fetch_chain(path).await?;
        self.evaluate_chain(subject, &chain, permission)?;
        Ok(chain)
    }

    /// Require `permission` on the last node of an already fetched chain.
    pub fn evaluate_chain(
        &self,
        subject: &Subject,
        chain: &[ResourceNode],
        permission: Permission,
    ) -> Result<(), RbacError> {
        let Some((leaf, ancestors)) = chain.split_last() else {
            return Err(RbacError::Storage(
                "resource store returned an empty chain".into(),
            ));
        };

        if subject.bypasses_resource_checks() {
            debug!(resource_id = %leaf.id, %permission, "platform admin bypass");
            return Ok(());
        }

        for node in ancestors {
            self.require(subject, node, Permission::Read)?;
        }
        self.require(subject, leaf, permission)
    }

    /// Non-failing variant of [`Self::evaluate_chain`].
    #[must_use]
    pub fn is_allowed(&self, subject: &Subject, chain: &[ResourceNode], permission: Permission) -> bool {
        self.evaluate_chain(subject, chain, permission).is_ok()
    }

    /// Check one node for one permission.
    fn require(
        &self,
        subject: &Subject,
        node: &ResourceNode,
        permission: Permission,
    ) -> Result<(), RbacError> {
        let role = effective_role(&subject.id, &node.security);
        if self.registry.has_permission(node.kind, role, permission) {
            return Ok(());
        }

        debug!(
            resource_id = %node.id,
            kind = %node.kind,
            %role,
            %permission,
            "permission denied"
        );
        Err(RbacError::access_denied(&node.id, permission))
    }
}
