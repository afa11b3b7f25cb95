//! Identity collaborator.
//!
//! Authentication happens outside this crate; callers plug in whatever
//! produces the current [`Subject`] for a request.

use crate::permissions::Subject;

/// Source of the subject performing the current request.
pub trait IdentityProvider: Send + Sync {
    fn current_subject(&self) -> Subject;
}

/// Identity provider that always returns the same subject.
#[derive(Debug, Clone)]
pub struct StaticIdentity(Subject);

impl StaticIdentity {
    #[must_use]
    pub const fn new(subject: Subject) -> Self {
        Self(subject)
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_subject(&self) -> Subject {
        self.0.clone()
    }
}
