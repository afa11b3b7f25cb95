//! Service handle bound to the subject of one request.

use super::{CreatedResource, RbacService};
use crate::error::RbacError;
use crate::permissions::{
    AccessControlEntry, Permission, Role, SecurityDescriptor, SecurityRequest, Subject, SubjectId,
};
use crate::resources::{ResourceKind, ResourcePath, ResourceSummary};

/// [`RbacService`] operations with the subject resolved once up front.
pub struct ScopedRbac<'a> {
    service: &'a RbacService,
    subject: Subject,
}

impl<'a> ScopedRbac<'a> {
    pub(super) const fn new(service: &'a RbacService, subject: Subject) -> Self {
        Self { service, subject }
    }

    #[must_use]
    pub const fn subject(&self) -> &Subject {
        &self.subject
    }

    pub async fn authorize(&self, path: &ResourcePath, permission: Permission) -> Result<(), RbacError> {
        self.service.authorize(&self.subject, path, permission).await
    }

    pub async fn list_visible(
        &self,
        parent: Option<&ResourcePath>,
        kind: ResourceKind,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<Vec<ResourceSummary>, RbacError> {
        self.service
            .list_visible(&self.subject, parent, kind, page, size)
            .await
    }

    pub async fn create_resource(
        &self,
        parent: Option<&ResourcePath>,
        kind: ResourceKind,
        security: Option<SecurityRequest>,
    ) -> Result<CreatedResource, RbacError> {
        self.service
            .create_resource(&self.subject, parent, kind, security)
            .await
    }

    pub async fn delete_resource(&self, path: &ResourcePath) -> Result<(), RbacError> {
        self.service.delete_resource(&self.subject, path).await
    }

    pub async fn get_security(&self, path: &ResourcePath) -> Result<SecurityDescriptor, RbacError> {
        self.service.get_security(&self.subject, path).await
    }

    pub async fn set_default_security(
        &self,
        path: &ResourcePath,
        role: Role,
    ) -> Result<SecurityDescriptor, RbacError> {
        self.service
            .set_default_security(&self.subject, path, role)
            .await
    }

    pub async fn add_access_control(
        &self,
        path: &ResourcePath,
        entry: AccessControlEntry,
    ) -> Result<AccessControlEntry, RbacError> {
        self.service
            .add_access_control(&self.subject, path, entry)
            .await
    }

    pub async fn update_access_control(
        &self,
        path: &ResourcePath,
        subject_id: &SubjectId,
        role: Role,
    ) -> Result<AccessControlEntry, RbacError> {
        self.service
            .update_access_control(&self.subject, path, subject_id, role)
            .await
    }

    pub async fn remove_access_control(
        &self,
        path: &ResourcePath,
        subject_id: &SubjectId,
    ) -> Result<(), RbacError> {
        self.service
            .remove_access_control(&self.subject, path, subject_id)
            .await
    }

    pub async fn get_access_control(
        &self,
        path: &ResourcePath,
        subject_id: &SubjectId,
    ) -> Result<AccessControlEntry, RbacError> {
        self.service
            .get_access_control(&self.subject, path, subject_id)
            .await
    }

    pub async fn list_security_users(&self, path: &ResourcePath) -> Result<Vec<SubjectId>, RbacError> {
        self.service.list_security_users(&self.subject, path).await
    }
}
