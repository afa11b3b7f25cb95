//! Shared fixtures for the authorization integration tests.
//!
//! [`fixture()`] seeds an in-memory store with two organizations:
//!
//! ```text
//! o-acme      default=none  acl=[admin:admin, viewer:viewer, editor:viewer]
//! ├── w-main     default=none    acl=[admin:admin, editor:editor, viewer:viewer]
//! │   ├── s-owned   default=none    acl=[admin:admin, editor:admin]
//! │   ├── s-shared  default=viewer  acl=[admin:admin]
//! │   └── s-hidden  default=none    acl=[admin:admin]
//! ├── w-private  default=none    acl=[admin:admin]
//! └── w-open     default=viewer  acl=[admin:admin]
//! o-other     default=none  acl=[admin:admin]
//! └── w-other    default=viewer  acl=[admin:admin]
//! ```
#![allow(dead_code)]

use std::sync::Arc;

use platform_rbac::config::Config;
use platform_rbac::permissions::acl::create_descriptor;
use platform_rbac::permissions::{AccessControlEntry, Role, RoleRegistry, Subject};
use platform_rbac::resources::{
    InMemoryResourceStore, ResourceId, ResourceKind, ResourceNode, ResourcePath, ResourceStore,
    ResourceSummary,
};
use platform_rbac::RbacService;

pub const ADMIN: &str = "admin@acme.io";
pub const EDITOR: &str = "editor@acme.io";
pub const VIEWER: &str = "viewer@acme.io";
pub const OUTSIDER: &str = "outsider@acme.io";

// ============================================================================
// Paths
// ============================================================================

pub fn acme() -> ResourcePath {
    ResourcePath::root("o-acme")
}

pub fn other_org() -> ResourcePath {
    ResourcePath::root("o-other")
}

pub fn main_ws() -> ResourcePath {
    acme().child("w-main")
}

pub fn private_ws() -> ResourcePath {
    acme().child("w-private")
}

pub fn open_ws() -> ResourcePath {
    acme().child("w-open")
}

pub fn other_ws() -> ResourcePath {
    other_org().child("w-other")
}

pub fn owned_scenario() -> ResourcePath {
    main_ws().child("s-owned")
}

pub fn shared_scenario() -> ResourcePath {
    main_ws().child("s-shared")
}

pub fn hidden_scenario() -> ResourcePath {
    main_ws().child("s-hidden")
}

// ============================================================================
// Subjects
// ============================================================================

pub fn admin() -> Subject {
    Subject::new(ADMIN)
}

pub fn editor() -> Subject {
    Subject::new(EDITOR)
}

pub fn viewer() -> Subject {
    Subject::new(VIEWER)
}

pub fn outsider() -> Subject {
    Subject::new(OUTSIDER)
}

pub fn super_admin() -> Subject {
    Subject::platform_admin("root@platform.io")
}

// ============================================================================
// Fixture
// ============================================================================

pub struct Fixture {
    pub store: Arc<InMemoryResourceStore>,
    pub service: RbacService,
}

/// Store seeded with the tree from the module docs and a service over it.
pub async fn fixture() -> Fixture {
    let store = Arc::new(InMemoryResourceStore::new());
    seed(&*store).await;
    let service = service_over(store.clone());
    Fixture { store, service }
}

/// Service with the standard registry and test configuration.
pub fn service_over(store: Arc<dyn ResourceStore>) -> RbacService {
    RbacService::new(store, RoleRegistry::standard(), Config::default_for_test())
}

pub async fn seed(store: &dyn ResourceStore) {
    use ResourceKind::{Organization, Scenario, Workspace};

    insert(store, "o-acme", Organization, None, Role::None, &[
        (ADMIN, Role::Admin),
        (VIEWER, Role::Viewer),
        (EDITOR, Role::Viewer),
    ])
    .await;
    insert(store, "w-main", Workspace, Some("o-acme"), Role::None, &[
        (ADMIN, Role::Admin),
        (EDITOR, Role::Editor),
        (VIEWER, Role::Viewer),
    ])
    .await;
    insert(store, "s-owned", Scenario, Some("w-main"), Role::None, &[
        (ADMIN, Role::Admin),
        (EDITOR, Role::Admin),
    ])
    .await;
    insert(store, "s-shared", Scenario, Some("w-main"), Role::Viewer, &[(ADMIN, Role::Admin)]).await;
    insert(store, "s-hidden", Scenario, Some("w-main"), Role::None, &[(ADMIN, Role::Admin)]).await;
    insert(store, "w-private", Workspace, Some("o-acme"), Role::None, &[(ADMIN, Role::Admin)]).await;
    insert(store, "w-open", Workspace, Some("o-acme"), Role::Viewer, &[(ADMIN, Role::Admin)]).await;

    insert(store, "o-other", Organization, None, Role::None, &[(ADMIN, Role::Admin)]).await;
    insert(store, "w-other", Workspace, Some("o-other"), Role::Viewer, &[(ADMIN, Role::Admin)]).await;
}

/// Insert one node, panicking on any store or validation failure.
pub async fn insert(
    store: &dyn ResourceStore,
    id: &str,
    kind: ResourceKind,
    parent: Option<&str>,
    default_role: Role,
    acl: &[(&str, Role)],
) -> ResourceNode {
    let acl = acl
        .iter()
        .map(|(subject, role)| AccessControlEntry::new(*subject, *role))
        .collect();
    let security = create_descriptor(kind, default_role, acl).expect("fixture ACL is valid");

    store
        .insert(ResourceNode::new(
            ResourceId::from(id),
            kind,
            parent.map(ResourceId::from),
            security,
        ))
        .await
        .expect("fixture insert")
}

/// Ids of a listing, in order.
pub fn ids<'a>(items: impl IntoIterator<Item = &'a ResourceSummary>) -> Vec<&'a str> {
    items.into_iter().map(|item| item.id.as_str()).collect()
}
