//! Domain layer: hierarchy engine, rendering and build-context entities
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod board;
pub mod context;
pub mod error;
pub mod hierarchy;
pub mod node;
pub mod render;
pub mod tree_traits;

pub use context::{compute_tag, BuildContext, ParentParser};
pub use error::DomainError;
pub use hierarchy::{HierarchyIndex, PreOrderIter};
pub use node::{HierarchyNode, Indexed};
pub use render::{FnSink, LineSink, TreeRenderer, WriteSink};
pub use tree_traits::TreeNodeConvert;
