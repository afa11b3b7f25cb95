//! Redaction of security descriptors for non-privileged viewers.

use super::descriptor::SecurityDescriptor;
use super::evaluator::AccessEvaluator;
use super::platform::Subject;
use super::role::Permission;
use crate::resources::ResourceNode;

/// Security of the last node of `chain` as `subject` may see it.
///
/// Subjects holding `READ_SECURITY` get the descriptor unchanged; everyone
/// else only sees the default role and their own entry.
#[must_use]
pub fn render(
    evaluator: &AccessEvaluator,
    subject: &Subject,
    chain: &[ResourceNode],
) -> Option<SecurityDescriptor> {
    let leaf = chain.last()?;
    if evaluator.is_allowed(subject, chain, Permission::ReadSecurity) {
        Some(leaf.security.clone())
    } else {
        Some(leaf.security.redacted_for(&subject.id))
    }
}
