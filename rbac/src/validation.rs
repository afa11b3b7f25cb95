//! Input invariants shared by every caller-supplied keyed list.

use std::collections::HashSet;
use std::hash::Hash;

use crate::error::RbacError;

/// Reject `items` when two of them share the same key.
///
/// `resource_kind` and `field` only shape the error message, e.g.
/// `One or several organization items have same id : security.accessControlList`.
pub fn ensure_unique_by<T, K, F>(
    items: &[T],
    key: F,
    resource_kind: &str,
    field: &str,
) -> Result<(), RbacError>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::with_capacity(items.len());
    if items.iter().all(|item| seen.insert(key(item))) {
        Ok(())
    } else {
        Err(RbacError::Validation(format!(
            "One or several {resource_kind} items have same id : {field}"
        )))
    }
}
