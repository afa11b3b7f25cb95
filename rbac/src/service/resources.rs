//! Resource lifecycle and listing.

use tracing::info;

use super::RbacService;
use crate::error::RbacError;
use crate::pagination::PageRequest;
use crate::permissions::{acl, Permission, SecurityDescriptor, SecurityRequest, Subject};
use crate::resources::{ResourceId, ResourceKind, ResourceNode, ResourcePath, ResourceSummary};

/// A freshly created resource and the path addressing it.
#[derive(Debug, Clone)]
pub struct CreatedResource {
    pub path: ResourcePath,
    pub resource: ResourceSummary,
}

impl RbacService {
    /// Create a resource of `kind` under `parent` (`None` for organizations).
    ///
    /// Requires `CREATE_CHILDREN` on the parent. Without caller-supplied
    /// security the creator becomes the only admin.
    #[tracing::instrument(skip(self, security), fields(subject = %subject.id))]
    pub async fn create_resource(
        &self,
        subject: &Subject,
        parent: Option<&ResourcePath>,
        kind: ResourceKind,
        security: Option<SecurityRequest>,
    ) -> Result<CreatedResource, RbacError> {
        let mut chain = match parent {
            Some(parent_path) => {
                let chain = self
                    .evaluator
                    .authorize(subject, parent_path, Permission::CreateChildren)
                    .await?;
                ensure_parent_kind(kind, chain.last().map(|n| n.kind))?;
                chain
            }
            None => {
                ensure_parent_kind(kind, None)?;
                Vec::new()
            }
        };

        let descriptor = match security {
            Some(request) => acl::create_descriptor(kind, request.default_role, request.acl)?,
            None => SecurityDescriptor::owned_by(&subject.id),
        };

        let node = ResourceNode::new(
            ResourceId::generate(kind),
            kind,
            chain.last().map(|n| n.id.clone()),
            descriptor,
        );
        let node = self.store.insert(node).await?;
        info!(resource_id = %node.id, %kind, "resource created");

        let path = match parent {
            Some(parent_path) => parent_path.child(node.id.clone()),
            None => ResourcePath::root(node.id.clone()),
        };
        chain.push(node);

        Ok(CreatedResource {
            path,
            resource: self.summarize(subject, &chain)?,
        })
    }

    /// Delete a resource, its descendants and their descriptors.
    #[tracing::instrument(skip(self), fields(subject = %subject.id))]
    pub async fn delete_resource(
        &self,
        subject: &Subject,
        path: &ResourcePath,
    ) -> Result<(), RbacError> {
        self.evaluator
            .authorize(subject, path, Permission::Delete)
            .await?;
        self.store.remove(path.leaf()).await?;
        info!(resource_id = %path.leaf(), "resource deleted");
        Ok(())
    }

    /// Children of `kind` under `parent` that `subject` may read.
    ///
    /// Unreadable children are skipped; an unreadable parent is an error.
    /// Pagination is validated first and applied after filtering.
    #[tracing::instrument(skip(self), fields(subject = %subject.id))]
    pub async fn list_visible(
        &self,
        subject: &Subject,
        parent: Option<&ResourcePath>,
        kind: ResourceKind,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<Vec<ResourceSummary>, RbacError> {
        let page_request = PageRequest::from_params(page, size, self.config.default_page_size)?;

        let parent_chain = match parent {
            Some(parent_path) => {
                let chain = self
                    .evaluator
                    .authorize(subject, parent_path, Permission::Read)
                    .await?;
                ensure_parent_kind(kind, chain.last().map(|n| n.kind))?;
                chain
            }
            None => {
                ensure_parent_kind(kind, None)?;
                Vec::new()
            }
        };

        let children = self
            .store
            .list_children(parent_chain.last().map(|n| &n.id), kind)
            .await?;

        let mut chain = parent_chain;
        let mut visible = Vec::with_capacity(children.len());
        for child in children {
            chain.push(child);
            if self.evaluator.is_allowed(subject, &chain, Permission::Read) {
                visible.push(self.summarize(subject, &chain)?);
            }
            chain.pop();
        }

        Ok(match page_request {
            Some(request) => request.apply(visible),
            None => visible,
        })
    }
}

/// `kind` may only live under a parent of its parent kind.
fn ensure_parent_kind(kind: ResourceKind, parent: Option<ResourceKind>) -> Result<(), RbacError> {
    if kind.parent_kind() == parent {
        return Ok(());
    }

    Err(RbacError::Validation(match parent {
        Some(parent) => format!("A {kind} cannot be placed under a {parent}"),
        None => format!("A {kind} needs a parent resource"),
    }))
}
