//! Pure helpers over a top-level node list.
//!
//! None of these functions modify their input: edits return a new list.
//! Nodes are matched by [`NodeId`] only, never by value.

use std::collections::HashSet;

use crate::node::{Folder, NodeId, ROOT_ID, TreeNode};

/// Flattened representation of a visible tree row.
#[derive(Debug, Clone)]
pub struct FlattenedNode<'a> {
    /// Zero-based tree depth (`0` for top-level rows).
    pub depth: usize,
    /// Position within the parent's children.
    pub index: usize,
    /// Owning folder id, [`ROOT_ID`] for top-level rows.
    pub parent_id: NodeId,
    /// Folder ids from the top level down to the parent.
    pub ancestry: Vec<NodeId>,
    /// Borrowed source node.
    pub node: &'a TreeNode,
}

/// Flatten a tree into a depth-first list of visible rows.
///
/// Children are included only for open folders. Sibling order is kept as is,
/// since it is what drag-and-drop reorders.
pub fn flatten_tree(nodes: &[TreeNode]) -> Vec<FlattenedNode<'_>> {
    let mut entries = Vec::new();
    let mut ancestry = Vec::new();
    for (index, node) in nodes.iter().enumerate() {
        push_node(node, index, 0, &ROOT_ID, &mut ancestry, &mut entries);
    }
    entries
}

fn push_node<'a>(
    node: &'a TreeNode,
    index: usize,
    depth: usize,
    parent_id: &NodeId,
    ancestry: &mut Vec<NodeId>,
    entries: &mut Vec<FlattenedNode<'a>>,
) {
    entries.push(FlattenedNode {
        depth,
        index,
        parent_id: parent_id.clone(),
        ancestry: ancestry.clone(),
        node,
    });

    if let TreeNode::Folder(folder) = node
        && folder.is_open
    {
        ancestry.push(folder.id.clone());
        for (child_index, child) in folder.children.iter().enumerate() {
            push_node(
                child,
                child_index,
                depth + 1,
                &folder.id,
                ancestry,
                entries,
            );
        }
        ancestry.pop();
    }
}

/// Find a node anywhere in the tree.
pub fn find_node<'a>(nodes: &'a [TreeNode], id: &NodeId) -> Option<&'a TreeNode> {
    for node in nodes {
        if node.id() == id {
            return Some(node);
        }
        if let Some(found) = node.children().and_then(|c| find_node(c, id)) {
            return Some(found);
        }
    }
    None
}

pub(crate) fn find_node_mut<'a>(
    nodes: &'a mut [TreeNode],
    id: &NodeId,
) -> Option<&'a mut TreeNode> {
    for node in nodes.iter_mut() {
        if node.id() == id {
            return Some(node);
        }
        if let TreeNode::Folder(folder) = node
            && let Some(found) = find_node_mut(&mut folder.children, id)
        {
            return Some(found);
        }
    }
    None
}

/// Resolve a folder id below `root`, including the root sentinel itself.
pub(crate) fn folder<'a>(root: &'a Folder, id: &NodeId) -> Option<&'a Folder> {
    if root.id == *id {
        return Some(root);
    }
    find_node(&root.children, id).and_then(TreeNode::as_folder)
}

pub(crate) fn folder_mut<'a>(
    root: &'a mut Folder,
    id: &NodeId,
) -> Option<&'a mut Folder> {
    if root.id == *id {
        return Some(root);
    }
    find_node_mut(&mut root.children, id).and_then(TreeNode::as_folder_mut)
}

/// Detach a node wherever it lives, returning it with its former parent id.
pub(crate) fn detach(
    folder: &mut Folder,
    id: &NodeId,
) -> Option<(TreeNode, NodeId)> {
    if let Some(index) = folder.position(id) {
        let node = folder.children.remove(index);
        return Some((node, folder.id.clone()));
    }

    for child in folder.children.iter_mut() {
        if let TreeNode::Folder(inner) = child
            && let Some(found) = detach(inner, id)
        {
            return Some(found);
        }
    }
    None
}

/// Rebuild the tree depth-first in pre-order.
///
/// `visitor` returns `Some(replacement)` to swap a node or `None` to keep it.
/// Children of the resulting node are visited afterwards.
pub fn map_tree<F>(nodes: &[TreeNode], visitor: &mut F) -> Vec<TreeNode>
where
    F: FnMut(&TreeNode) -> Option<TreeNode>,
{
    nodes
        .iter()
        .map(|node| {
            let replaced = visitor(node);
            match replaced.as_ref().unwrap_or(node) {
                TreeNode::Folder(folder) => TreeNode::Folder(
                    folder.rebuilt(map_tree(&folder.children, visitor)),
                ),
                file @ TreeNode::File(_) => file.clone(),
            }
        })
        .collect()
}

/// Replace every node matching `predicate` with `transform(node)`.
pub fn clone_and_replace<P, T>(
    nodes: &[TreeNode],
    predicate: P,
    mut transform: T,
) -> Vec<TreeNode>
where
    P: Fn(&TreeNode) -> bool,
    T: FnMut(&TreeNode) -> TreeNode,
{
    map_tree(nodes, &mut |node| {
        if predicate(node) {
            Some(transform(node))
        } else {
            None
        }
    })
}

/// Copy the tree and edit a single node in the copy.
///
/// Returns `None` when `id` is absent.
pub fn update_node<F>(
    nodes: &[TreeNode],
    id: &NodeId,
    edit: F,
) -> Option<Vec<TreeNode>>
where
    F: FnOnce(&mut TreeNode),
{
    let mut copy = nodes.to_vec();
    let node = find_node_mut(&mut copy, id)?;
    edit(node);
    Some(copy)
}

/// Remove a node wherever it is found. Absent ids leave the tree as is.
pub fn remove_node(nodes: &[TreeNode], id: &NodeId) -> Vec<TreeNode> {
    nodes
        .iter()
        .filter(|node| node.id() != id)
        .map(|node| match node {
            TreeNode::Folder(folder) => {
                TreeNode::Folder(folder.rebuilt(remove_node(&folder.children, id)))
            },
            TreeNode::File(_) => node.clone(),
        })
        .collect()
}

/// Folder ids from the top level down to the parent of `id`.
///
/// Returns `None` when `id` is not in the tree; top-level nodes yield an empty
/// path.
pub fn ancestry_path(nodes: &[TreeNode], id: &NodeId) -> Option<Vec<NodeId>> {
    let mut path = Vec::new();
    if walk_ancestry(nodes, id, &mut path) {
        Some(path)
    } else {
        None
    }
}

fn walk_ancestry(
    nodes: &[TreeNode],
    id: &NodeId,
    path: &mut Vec<NodeId>,
) -> bool {
    for node in nodes {
        if node.id() == id {
            return true;
        }
        if let Some(children) = node.children() {
            path.push(node.id().clone());
            if walk_ancestry(children, id, path) {
                return true;
            }
            path.pop();
        }
    }
    false
}

/// Whether `id` lives somewhere below `ancestor`.
pub fn is_descendant(nodes: &[TreeNode], ancestor: &NodeId, id: &NodeId) -> bool {
    ancestry_path(nodes, id)
        .map(|path| path.contains(ancestor))
        .unwrap_or(false)
}

/// All node ids in pre-order.
pub fn collect_ids(nodes: &[TreeNode]) -> Vec<NodeId> {
    let mut ids = Vec::new();
    push_ids(nodes, &mut ids);
    ids
}

fn push_ids(nodes: &[TreeNode], ids: &mut Vec<NodeId>) {
    for node in nodes {
        ids.push(node.id().clone());
        if let Some(children) = node.children() {
            push_ids(children, ids);
        }
    }
}

/// First id that appears twice, or collides with the root sentinel.
pub fn find_duplicate_id(nodes: &[TreeNode]) -> Option<NodeId> {
    let mut seen = HashSet::from([ROOT_ID]);
    collect_ids(nodes).into_iter().find(|id| !seen.insert(id.clone()))
}
