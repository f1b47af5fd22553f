use crate::node::{NodeId, NodeKind, ROOT_ID, TreeNode};
use crate::tree::{FlattenedNode, ancestry_path, find_node};

/// Node captured at drag start.
#[derive(Debug, Clone, PartialEq)]
pub struct DragItem {
    pub id: NodeId,
    pub kind: NodeKind,
    pub name: String,
    /// Children as they were when the drag began.
    pub children: Vec<TreeNode>,
    pub index: usize,
    pub depth: usize,
    pub parent_id: NodeId,
}

impl DragItem {
    pub fn from_row(row: &FlattenedNode<'_>) -> Self {
        Self {
            id: row.node.id().clone(),
            kind: row.node.kind(),
            name: row.node.name().to_owned(),
            children: row.node.children().map(<[_]>::to_vec).unwrap_or_default(),
            index: row.index,
            depth: row.depth,
            parent_id: row.parent_id.clone(),
        }
    }

    /// Capture a node by id, whether or not it is currently visible.
    pub fn from_tree(nodes: &[TreeNode], id: &NodeId) -> Option<Self> {
        let placement = Placement::locate(nodes, id)?;
        let node = find_node(nodes, id)?;
        Some(Self {
            id: id.clone(),
            kind: node.kind(),
            name: node.name().to_owned(),
            children: node.children().map(<[_]>::to_vec).unwrap_or_default(),
            index: placement.index,
            depth: placement.ancestry.len(),
            parent_id: placement.parent_id,
        })
    }
}

/// Row the pointer is released over.
#[derive(Debug, Clone, PartialEq)]
pub struct DropTarget {
    pub id: NodeId,
    pub kind: NodeKind,
    pub index: usize,
    pub depth: usize,
    pub parent_id: NodeId,
    /// Folder ids from the top level down to the target's parent.
    pub ancestry: Vec<NodeId>,
}

impl DropTarget {
    pub fn from_row(row: &FlattenedNode<'_>) -> Self {
        Self {
            id: row.node.id().clone(),
            kind: row.node.kind(),
            index: row.index,
            depth: row.depth,
            parent_id: row.parent_id.clone(),
            ancestry: row.ancestry.clone(),
        }
    }

    pub fn from_tree(nodes: &[TreeNode], id: &NodeId) -> Option<Self> {
        let placement = Placement::locate(nodes, id)?;
        let node = find_node(nodes, id)?;
        Some(Self {
            id: id.clone(),
            kind: node.kind(),
            index: placement.index,
            depth: placement.ancestry.len(),
            parent_id: placement.parent_id,
            ancestry: placement.ancestry,
        })
    }
}

struct Placement {
    index: usize,
    parent_id: NodeId,
    ancestry: Vec<NodeId>,
}

impl Placement {
    fn locate(nodes: &[TreeNode], id: &NodeId) -> Option<Self> {
        let ancestry = ancestry_path(nodes, id)?;
        let siblings = match ancestry.last() {
            Some(parent) => find_node(nodes, parent)?.children()?,
            None => nodes,
        };
        let index = siblings.iter().position(|node| node.id() == id)?;
        let parent_id = ancestry.last().cloned().unwrap_or(ROOT_ID);
        Some(Self {
            index,
            parent_id,
            ancestry,
        })
    }
}
