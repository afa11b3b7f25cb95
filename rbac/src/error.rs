//! Authorization Error Types

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::permissions::{Permission, SubjectId};
use crate::resources::{ResourceId, StoreError};

/// Errors raised by the authorization core.
///
/// None of these are transient: they describe policy or input outcomes and
/// are surfaced to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RbacError {
    /// The subject lacks `permission` on `resource_id` (the first failing
    /// node of the checked chain).
    #[error("RBAC {resource_id} - User does not have permission {permission}")]
    AccessDenied {
        resource_id: ResourceId,
        permission: Permission,
    },

    /// Client input violates an invariant (duplicate ids, bad pagination).
    #[error("{0}")]
    Validation(String),

    /// The resource (or one of its ancestors) does not exist under the
    /// requested path.
    #[error("Resource {0} not found")]
    ResourceNotFound(ResourceId),

    /// The descriptor has no entry for the subject.
    #[error("Entry for user {subject_id} not found in {resource_id} security")]
    AccessControlNotFound {
        resource_id: ResourceId,
        subject_id: SubjectId,
    },

    /// The resource store collaborator failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl RbacError {
    /// Build an access-denied error for a node of the checked chain.
    pub fn access_denied(resource_id: &ResourceId, permission: Permission) -> Self {
        Self::AccessDenied {
            resource_id: resource_id.clone(),
            permission,
        }
    }

    /// True for both resource and ACL-entry lookups that found nothing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ResourceNotFound(_) | Self::AccessControlNotFound { .. }
        )
    }

    /// Stable machine-readable code for transports.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::AccessDenied { .. } => "access_denied",
            Self::Validation(_) => "validation_error",
            Self::ResourceNotFound(_) => "resource_not_found",
            Self::AccessControlNotFound { .. } => "access_control_not_found",
            Self::Storage(_) => "storage_error",
        }
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::AccessDenied { .. } => StatusCode::FORBIDDEN,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::ResourceNotFound(_) | Self::AccessControlNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for RbacError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::ResourceNotFound(id),
            other => Self::Storage(other.to_string()),
        }
    }
}

impl IntoResponse for RbacError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match &self {
            Self::Storage(err) => {
                tracing::error!("Storage error in authorization core: {}", err);
                "Storage error".to_string()
            }
            other => other.to_string(),
        };

        (
            status,
            Json(serde_json::json!({ "error": self.code(), "message": message })),
        )
            .into_response()
    }
}
