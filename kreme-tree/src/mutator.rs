use std::sync::Arc;

use crate::drag::DragItem;
use crate::error::{Error, Result};
use crate::node::{Folder, NodeId, TreeNode};
use crate::resolver::MoveOperation;
use crate::tree::{detach, find_node, folder, folder_mut, is_descendant};

/// Result of a successful move, built from the post-move tree.
#[derive(Debug, Clone, PartialEq)]
pub struct DropSummary {
    pub source_id: NodeId,
    pub source_index: usize,
    pub target_id: NodeId,
    /// Slot the source ended up at inside `target_parent`.
    pub target_index: usize,
    pub source_parent: Folder,
    pub target_parent: Folder,
    pub tree: Arc<Vec<TreeNode>>,
}

/// Apply `operation` to a copy of `nodes`.
///
/// The copy is edited in one pass (remove, then insert) and both parent
/// folders in the summary are read back from the edited copy.
pub fn apply(
    nodes: &[TreeNode],
    operation: &MoveOperation,
    open_on_drop: bool,
) -> Result<DropSummary> {
    let mut root = Folder::root(nodes.to_vec());

    match operation {
        MoveOperation::Horizontal {
            source,
            target_id,
            target_index,
        } => {
            let parent = folder_mut(&mut root, &source.parent_id)
                .ok_or_else(|| Error::NodeNotFound(source.parent_id.clone()))?;
            let from = source_position(parent, source)?;
            let node = parent.children.remove(from);
            let to = (*target_index).min(parent.children.len());
            parent.children.insert(to, node);

            let parent = parent.clone();
            Ok(DropSummary {
                source_id: source.id.clone(),
                source_index: source.index,
                target_id: target_id.clone(),
                target_index: to,
                source_parent: parent.clone(),
                target_parent: parent,
                tree: Arc::new(root.children),
            })
        },
        MoveOperation::Insert {
            source,
            target_id,
            target_index,
        } => transplant(
            root,
            source,
            target_id,
            target_id,
            *target_index,
            open_on_drop,
        ),
        MoveOperation::Reparent {
            source,
            target_parent_id,
            target_index,
            ..
        } => transplant(
            root,
            source,
            target_parent_id,
            target_parent_id,
            Some(*target_index),
            open_on_drop,
        ),
    }
}

fn transplant(
    mut root: Folder,
    source: &DragItem,
    destination: &NodeId,
    reported_target: &NodeId,
    slot: Option<usize>,
    open_on_drop: bool,
) -> Result<DropSummary> {
    if *destination == source.id
        || is_descendant(&root.children, &source.id, destination)
    {
        return Err(Error::Cycle {
            moved: source.id.clone(),
            target: destination.clone(),
        });
    }

    match folder(&root, destination) {
        Some(_) => {},
        None if find_node(&root.children, destination).is_some() => {
            return Err(Error::NotAFolder(destination.clone()));
        },
        None => return Err(Error::NodeNotFound(destination.clone())),
    }

    let (node, source_parent_id) = take_source(&mut root, source)?;

    let target_parent = folder_mut(&mut root, destination)
        .ok_or_else(|| Error::NodeNotFound(destination.clone()))?;
    let index = slot
        .unwrap_or(target_parent.children.len())
        .min(target_parent.children.len());
    target_parent.children.insert(index, node);
    if open_on_drop && !target_parent.is_root() {
        target_parent.is_open = true;
    }
    let target_parent = target_parent.clone();

    let source_parent = folder(&root, &source_parent_id)
        .cloned()
        .ok_or_else(|| Error::NodeNotFound(source_parent_id.clone()))?;

    Ok(DropSummary {
        source_id: source.id.clone(),
        source_index: source.index,
        target_id: reported_target.clone(),
        target_index: index,
        source_parent,
        target_parent,
        tree: Arc::new(root.children),
    })
}

/// Remove the source from its recorded parent, or from wherever it moved to.
fn take_source(
    root: &mut Folder,
    source: &DragItem,
) -> Result<(TreeNode, NodeId)> {
    if let Some(parent) = folder_mut(root, &source.parent_id)
        && let Ok(index) = source_position(parent, source)
    {
        return Ok((parent.children.remove(index), parent.id.clone()));
    }

    detach(root, &source.id).ok_or_else(|| Error::SourceNotFound {
        id: source.id.clone(),
        parent_id: source.parent_id.clone(),
    })
}

/// Index of the source in `parent`, trusting the drag-start index first.
fn source_position(parent: &Folder, source: &DragItem) -> Result<usize> {
    let at_recorded = parent
        .children
        .get(source.index)
        .is_some_and(|node| node.id() == &source.id);
    if at_recorded {
        return Ok(source.index);
    }

    parent.position(&source.id).ok_or_else(|| Error::SourceNotFound {
        id: source.id.clone(),
        parent_id: parent.id.clone(),
    })
}
