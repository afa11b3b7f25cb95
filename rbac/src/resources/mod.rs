//! Resource forest: identifiers, nodes, and the store collaborator.

pub mod memory;
pub mod store;
pub mod types;

pub use memory::InMemoryResourceStore;
pub use store::{ResourceStore, StoreError};
pub use types::{ResourceId, ResourceKind, ResourceNode, ResourcePath, ResourceSummary};
