//! ACL management.
//!
//! Every mutation keeps the one-entry-per-subject invariant. Authorization of
//! the caller (`WRITE_SECURITY`) happens in the service layer before any of
//! these run; these functions only enforce descriptor invariants.

use super::descriptor::{AccessControlEntry, SecurityDescriptor};
use super::platform::SubjectId;
use super::role::Role;
use crate::error::RbacError;
use crate::resources::{ResourceId, ResourceKind};
use crate::validation::ensure_unique_by;

/// Field name reported by duplicate-subject validation errors.
pub const ACL_FIELD: &str = "security.accessControlList";

fn ensure_unique_subjects(
    kind: ResourceKind,
    acl: &[AccessControlEntry],
) -> Result<(), RbacError> {
    ensure_unique_by(acl, |entry| entry.id.clone(), kind.as_str(), ACL_FIELD)
}

/// Build the descriptor of a resource being created.
pub fn create_descriptor(
    kind: ResourceKind,
    default_role: Role,
    initial_acl: Vec<AccessControlEntry>,
) -> Result<SecurityDescriptor, RbacError> {
    ensure_unique_subjects(kind, &initial_acl)?;

    Ok(SecurityDescriptor {
        default_role,
        acl: initial_acl,
    })
}

/// Append an entry for a subject not yet in the ACL.
pub fn add_entry(
    kind: ResourceKind,
    descriptor: &mut SecurityDescriptor,
    entry: AccessControlEntry,
) -> Result<(), RbacError> {
    if descriptor.entry(&entry.id).is_some() {
        // Same message as a duplicated initial ACL
        let duplicated = [entry.clone(), entry];
        return ensure_unique_subjects(kind, &duplicated);
    }

    descriptor.acl.push(entry);
    Ok(())
}

/// Change the role of an existing entry, returning the updated entry.
pub fn update_entry(
    resource_id: &ResourceId,
    descriptor: &mut SecurityDescriptor,
    subject_id: &SubjectId,
    role: Role,
) -> Result<AccessControlEntry, RbacError> {
    let entry = descriptor
        .acl
        .iter_mut()
        .find(|e| &e.id == subject_id)
        .ok_or_else(|| entry_not_found(resource_id, subject_id))?;

    entry.role = role;
    Ok(entry.clone())
}

/// Remove the entry of `subject_id`.
pub fn remove_entry(
    resource_id: &ResourceId,
    descriptor: &mut SecurityDescriptor,
    subject_id: &SubjectId,
) -> Result<(), RbacError> {
    let position = descriptor
        .acl
        .iter()
        .position(|e| &e.id == subject_id)
        .ok_or_else(|| entry_not_found(resource_id, subject_id))?;

    descriptor.acl.remove(position);
    Ok(())
}

/// Replace the default role.
pub fn set_default_role(descriptor: &mut SecurityDescriptor, role: Role) {
    descriptor.default_role = role;
}

fn entry_not_found(resource_id: &ResourceId, subject_id: &SubjectId) -> RbacError {
    RbacError::AccessControlNotFound {
        resource_id: resource_id.clone(),
        subject_id: subject_id.clone(),
    }
}
