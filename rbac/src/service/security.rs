//! Security descriptor operations.
//!
//! Reads go through redaction; mutations require `WRITE_SECURITY` and are
//! written back with a compare-and-swap on the descriptor version.

use tracing::{info, warn};

use super::{empty_chain, RbacService};
use crate::error::RbacError;
use crate::permissions::{
    acl, AccessControlEntry, Permission, Role, SecurityDescriptor, Subject, SubjectId,
};
use crate::resources::{ResourceId, ResourceKind, ResourceNode, ResourcePath, StoreError};

impl RbacService {
    /// Security of a readable resource, redacted unless the subject holds
    /// `READ_SECURITY`.
    #[tracing::instrument(skip(self), fields(subject = %subject.id))]
    pub async fn get_security(
        &self,
        subject: &Subject,
        path: &ResourcePath,
    ) -> Result<SecurityDescriptor, RbacError> {
        let chain = self
            .evaluator
            .authorize(subject, path, Permission::Read)
            .await?;
        self.render(subject, &chain)
    }

    /// Replace the default role.
    #[tracing::instrument(skip(self), fields(subject = %subject.id))]
    pub async fn set_default_security(
        &self,
        subject: &Subject,
        path: &ResourcePath,
        role: Role,
    ) -> Result<SecurityDescriptor, RbacError> {
        let (chain, ()) = self
            .mutate_security(subject, path, |_, _, security| {
                acl::set_default_role(security, role);
                Ok(())
            })
            .await?;
        self.render(subject, &chain)
    }

    /// Grant `entry.role` to a subject not yet in the ACL.
    #[tracing::instrument(skip(self), fields(subject = %subject.id))]
    pub async fn add_access_control(
        &self,
        subject: &Subject,
        path: &ResourcePath,
        entry: AccessControlEntry,
    ) -> Result<AccessControlEntry, RbacError> {
        self.mutate_security(subject, path, |kind, _, security| {
            acl::add_entry(kind, security, entry.clone())
        })
        .await?;
        Ok(entry)
    }

    /// Change the role of an existing ACL entry.
    #[tracing::instrument(skip(self), fields(subject = %subject.id))]
    pub async fn update_access_control(
        &self,
        subject: &Subject,
        path: &ResourcePath,
        subject_id: &SubjectId,
        role: Role,
    ) -> Result<AccessControlEntry, RbacError> {
        let (_, entry) = self
            .mutate_security(subject, path, |_, id, security| {
                acl::update_entry(id, security, subject_id, role)
            })
            .await?;
        Ok(entry)
    }

    /// Drop a subject's ACL entry.
    #[tracing::instrument(skip(self), fields(subject = %subject.id))]
    pub async fn remove_access_control(
        &self,
        subject: &Subject,
        path: &ResourcePath,
        subject_id: &SubjectId,
    ) -> Result<(), RbacError> {
        self.mutate_security(subject, path, |_, id, security| {
            acl::remove_entry(id, security, subject_id)
        })
        .await?;
        Ok(())
    }

    /// One subject's ACL entry; requires `READ_SECURITY`.
    #[tracing::instrument(skip(self), fields(subject = %subject.id))]
    pub async fn get_access_control(
        &self,
        subject: &Subject,
        path: &ResourcePath,
        subject_id: &SubjectId,
    ) -> Result<AccessControlEntry, RbacError> {
        let chain = self
            .evaluator
            .authorize(subject, path, Permission::ReadSecurity)
            .await?;
        let leaf = chain.last().ok_or_else(empty_chain)?;

        leaf.security
            .entry(subject_id)
            .cloned()
            .ok_or_else(|| RbacError::AccessControlNotFound {
                resource_id: leaf.id.clone(),
                subject_id: subject_id.clone(),
            })
    }

    /// Subjects with an explicit ACL entry; requires `READ_SECURITY`.
    #[tracing::instrument(skip(self), fields(subject = %subject.id))]
    pub async fn list_security_users(
        &self,
        subject: &Subject,
        path: &ResourcePath,
    ) -> Result<Vec<SubjectId>, RbacError> {
        let chain = self
            .evaluator
            .authorize(subject, path, Permission::ReadSecurity)
            .await?;
        let leaf = chain.last().ok_or_else(empty_chain)?;

        Ok(leaf.security.subjects().cloned().collect())
    }

    /// Authorize `WRITE_SECURITY`, apply `mutate` to a copy of the leaf's
    /// descriptor and store it if nobody wrote in between.
    ///
    /// On a version conflict the whole sequence (including the permission
    /// check) is replayed against a fresh snapshot, up to
    /// `Config::write_attempts` times. Returns the chain with the stored
    /// descriptor and whatever `mutate` produced.
    async fn mutate_security<T, F>(
        &self,
        subject: &Subject,
        path: &ResourcePath,
        mutate: F,
    ) -> Result<(Vec<ResourceNode>, T), RbacError>
    where
        F: Fn(ResourceKind, &ResourceId, &mut SecurityDescriptor) -> Result<T, RbacError>,
    {
        let attempts = self.config.write_attempts.max(1);

        for attempt in 1..=attempts {
            let mut chain = self
                .evaluator
                .authorize(subject, path, Permission::WriteSecurity)
                .await?;
            let leaf = chain.last_mut().ok_or_else(empty_chain)?;

            let mut security = leaf.security.clone();
            let output = mutate(leaf.kind, &leaf.id, &mut security)?;

            match self
                .store
                .replace_descriptor(&leaf.id, leaf.version, security.clone())
                .await
            {
                Ok(version) => {
                    info!(resource_id = %leaf.id, version, "security updated");
                    leaf.security = security;
                    leaf.version = version;
                    return Ok((chain, output));
                }
                Err(StoreError::VersionConflict { .. }) => {
                    warn!(
                        resource_id = %leaf.id,
                        attempt,
                        "security changed concurrently, retrying"
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(RbacError::Storage(format!(
            "Security of {} kept changing, gave up after {attempts} attempts",
            path.leaf()
        )))
    }
}
