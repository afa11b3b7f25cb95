//! Platform RBAC
//!
//! Authorization core for a multi-tenant resource tree
//! (Organization → Workspace → Solution / Scenario / Dataset): role tables,
//! security descriptors, hierarchical permission checks, ACL management and
//! redaction of security data.

pub mod config;
pub mod error;
pub mod identity;
pub mod pagination;
pub mod permissions;
pub mod resources;
pub mod service;
pub mod validation;

pub use error::RbacError;
pub use service::RbacService;
