//! Tree model and drag-and-drop mutation engine.
//!
//! The crate is UI-agnostic and split into three layers:
//! - the data model ([`TreeNode`], [`Folder`], [`File`]) and pure tree
//!   helpers ([`flatten_tree`], [`find_node`], [`map_tree`]);
//! - the drop pipeline: [`classify`] turns a pointer position into a
//!   [`DropZone`], [`resolve`] turns a drag/target/zone triple into a
//!   [`MoveOperation`] and [`apply`] performs it on a copy of the tree;
//! - [`TreeStore`], which owns the current snapshot, applies edits and
//!   notifies subscribers with [`TreeEvent`]s.
//!
//! # Quick Example
//!
//! ```
//! use kreme_tree::{
//!     DragItem, DropTarget, DropZone, NodeId, TreeConfig, TreeNode,
//!     TreeStore,
//! };
//!
//! let nodes = vec![
//!     TreeNode::folder(1, "src", vec![TreeNode::file(2, "main.rs")]),
//!     TreeNode::folder(3, "docs", vec![]),
//! ];
//! let mut store = TreeStore::new(nodes, TreeConfig::default()).unwrap();
//!
//! let source = DragItem::from_tree(store.nodes(), &NodeId::Int(2)).unwrap();
//! let target = DropTarget::from_tree(store.nodes(), &NodeId::Int(3)).unwrap();
//! let summary = store.drop_item(&source, &target, DropZone::Middle).unwrap();
//!
//! assert_eq!(summary.target_parent.name, "docs");
//! assert!(store.find(&NodeId::Int(1)).unwrap().children().unwrap().is_empty());
//! ```

mod config;
mod drag;
mod error;
mod mutator;
mod node;
mod rename;
mod resolver;
mod store;
mod tree;
mod zone;

pub use config::TreeConfig;
pub use drag::{DragItem, DropTarget};
pub use error::{Error, Result};
pub use mutator::{DropSummary, apply};
pub use node::{File, Folder, NodeId, NodeKind, ROOT_ID, ROOT_NAME, TreeNode};
pub use rename::{RenameCommit, RenameTrigger, begin_rename, commit_rename};
pub use resolver::{
    MoveOperation, RejectReason, Resolution, resolve, resolve_background_drop,
};
pub use store::{ForeignDrop, SubscriptionId, TreeEvent, TreeStore};
pub use tree::{
    FlattenedNode, ancestry_path, clone_and_replace, collect_ids,
    find_duplicate_id, find_node, flatten_tree, is_descendant, map_tree,
    remove_node, update_node,
};
pub use zone::{DropZone, RowBounds, ZoneThresholds, classify};
