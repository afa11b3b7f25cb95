//! Permission system types and evaluation.
//!
//! - Roles map to fixed permission sets per resource kind (`registry`)
//! - Resources carry a default role plus an ACL (`descriptor`, `acl`)
//! - Checks cascade down the resource chain (`evaluator`)
//! - Non-privileged viewers get redacted security (`view`)

pub mod acl;
pub mod descriptor;
pub mod evaluator;
pub mod platform;
pub mod registry;
pub mod role;
pub mod view;

pub use descriptor::{AccessControlEntry, SecurityDescriptor, SecurityRequest};
pub use evaluator::{effective_role, AccessEvaluator};
pub use platform::{Subject, SubjectId};
pub use registry::{RoleRegistry, RoleTable, STANDARD_ROLE_TABLE};
pub use role::{Permission, PermissionSet, Role};
