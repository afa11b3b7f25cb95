//! Authorization service.
//!
//! Entry point for use-case code: every operation takes the calling
//! [`Subject`] explicitly and addresses resources by [`ResourcePath`].
//!
//! - `security`: descriptor reads and ACL mutations
//! - `resources`: creation, deletion, and visibility-filtered listing
//! - `scoped`: the same operations bound to an identity provider's subject

pub mod resources;
pub mod scoped;
pub mod security;

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::Config;
use crate::error::RbacError;
use crate::identity::IdentityProvider;
use crate::permissions::{
    view, AccessEvaluator, Permission, Role, RoleRegistry, SecurityDescriptor, Subject,
};
use crate::resources::{
    ResourceKind, ResourceNode, ResourcePath, ResourceStore, ResourceSummary,
};

pub use resources::CreatedResource;
pub use scoped::ScopedRbac;

/// Authorization service over a resource store.
#[derive(Clone)]
pub struct RbacService {
    store: Arc<dyn ResourceStore>,
    evaluator: AccessEvaluator,
    config: Arc<Config>,
}

impl RbacService {
    pub fn new(store: Arc<dyn ResourceStore>, registry: RoleRegistry, config: Config) -> Self {
        let evaluator = AccessEvaluator::new(Arc::clone(&store), Arc::new(registry));
        Self {
            store,
            evaluator,
            config: Arc::new(config),
        }
    }

    #[must_use]
    pub fn evaluator(&self) -> &AccessEvaluator {
        &self.evaluator
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Bind the service to the subject of the current request.
    pub fn scope(&self, identity: &dyn IdentityProvider) -> ScopedRbac<'_> {
        ScopedRbac::new(self, identity.current_subject())
    }

    /// Require `permission` on the resource at `path`.
    pub async fn authorize(
        &self,
        subject: &Subject,
        path: &ResourcePath,
        permission: Permission,
    ) -> Result<(), RbacError> {
        self.evaluator.authorize(subject, path, permission).await?;
        Ok(())
    }

    /// Permission matrix of one resource kind, for auditing.
    #[must_use]
    pub fn role_permissions(&self, kind: ResourceKind) -> BTreeMap<Role, Vec<Permission>> {
        self.evaluator.registry().matrix(kind)
    }

    /// Security of the chain's leaf as `subject` may see it.
    fn render(&self, subject: &Subject, chain: &[ResourceNode]) -> Result<SecurityDescriptor, RbacError> {
        view::render(&self.evaluator, subject, chain).ok_or_else(empty_chain)
    }

    /// Listing item for the chain's leaf, with redacted security.
    fn summarize(&self, subject: &Subject, chain: &[ResourceNode]) -> Result<ResourceSummary, RbacError> {
        let leaf = chain.last().ok_or_else(empty_chain)?;
        Ok(ResourceSummary {
            id: leaf.id.clone(),
            kind: leaf.kind,
            parent_id: leaf.parent_id.clone(),
            security: self.render(subject, chain)?,
        })
    }
}

fn empty_chain() -> RbacError {
    RbacError::Storage("resource store returned an empty chain".into())
}
