//! Drop gesture resolution.
//!
//! The three-zone model overlays two gestures: reordering among siblings
//! (top/bottom on a sibling) and nesting (middle, or top of a non-first row).
//! [`resolve`] checks its rules in a fixed order and the first match wins, so
//! the order below is part of the contract:
//!
//! 1. the target is inside the dragged subtree: rejected;
//! 2. the target is the dragged row itself: rejected;
//! 3. the target is the source's own parent, hit on `middle` or on `top` of a
//!    non-first row: rejected;
//! 4. dropping row 1 just below row 0 of the same list: rejected;
//! 5. `top` of a first row: insert at slot 0 of the target's list;
//! 6. `bottom` across parents: insert right after the target;
//! 7. `middle` or `top`: nest inside the target folder;
//! 8. and 9. `bottom` within one list: reorder after the target;
//! 10. anything left over reorders to the target index.

use crate::drag::{DragItem, DropTarget};
use crate::node::{NodeId, NodeKind, ROOT_ID};
use crate::zone::DropZone;

/// Structural edit applied by the mutator.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOperation {
    /// Reorder within the source's own parent.
    Horizontal {
        source: DragItem,
        target_id: NodeId,
        target_index: usize,
    },
    /// Make the source a child of `target_id`; `None` appends.
    Insert {
        source: DragItem,
        target_id: NodeId,
        target_index: Option<usize>,
    },
    /// Move the source into `target_parent_id` at `target_index`.
    Reparent {
        source: DragItem,
        target_id: NodeId,
        target_parent_id: NodeId,
        target_index: usize,
    },
}

impl MoveOperation {
    pub fn source(&self) -> &DragItem {
        match self {
            MoveOperation::Horizontal { source, .. }
            | MoveOperation::Insert { source, .. }
            | MoveOperation::Reparent { source, .. } => source,
        }
    }

    pub fn target_id(&self) -> &NodeId {
        match self {
            MoveOperation::Horizontal { target_id, .. }
            | MoveOperation::Insert { target_id, .. }
            | MoveOperation::Reparent { target_id, .. } => target_id,
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, MoveOperation::Horizontal { .. })
    }

    /// Whether the move crosses into another folder.
    pub fn is_changing_depth(&self) -> bool {
        matches!(self, MoveOperation::Reparent { .. })
    }
}

/// Why a drop gesture produced no operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The pointer was not over a usable row.
    NoZone,
    /// The target lives inside the dragged subtree.
    Cycle,
    /// The target is the dragged row.
    SelfDrop,
    /// Dropping onto the source's own parent is meaningless there.
    SameParentZone,
    /// The move would leave the tree unchanged.
    SamePosition,
    /// Only folders accept children.
    NotAFolder,
}

/// Outcome of resolving a drop gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Move(MoveOperation),
    Rejected(RejectReason),
}

impl Resolution {
    pub fn operation(self) -> Option<MoveOperation> {
        match self {
            Resolution::Move(operation) => Some(operation),
            Resolution::Rejected(_) => None,
        }
    }
}

/// Decide what dropping `source` on `target` within `zone` means.
pub fn resolve(
    source: &DragItem,
    target: &DropTarget,
    zone: DropZone,
) -> Resolution {
    use Resolution::{Move, Rejected};

    if zone == DropZone::None {
        return Rejected(RejectReason::NoZone);
    }

    if target.ancestry.contains(&source.id) {
        return Rejected(RejectReason::Cycle);
    }

    let same_parent = source.parent_id == target.parent_id;
    let crosses_parent = source.depth != target.depth || !same_parent;

    if source.id == target.id
        || (source.index == target.index
            && source.depth == target.depth
            && same_parent)
    {
        return Rejected(RejectReason::SelfDrop);
    }

    if target.id == source.parent_id
        && ((zone == DropZone::Top && target.index != 0)
            || zone == DropZone::Middle)
    {
        return Rejected(RejectReason::SameParentZone);
    }

    if target.index == 0
        && zone == DropZone::Bottom
        && source.index == 1
        && !crosses_parent
    {
        return Rejected(RejectReason::SamePosition);
    }

    if target.index == 0 && zone == DropZone::Top {
        if crosses_parent {
            return Move(reparent(source, target, 0));
        }
        return Move(horizontal(source, target, 0));
    }

    if crosses_parent && zone == DropZone::Bottom {
        return Move(reparent(source, target, target.index + 1));
    }

    if matches!(zone, DropZone::Middle | DropZone::Top) {
        if target.kind != NodeKind::Folder {
            return Rejected(RejectReason::NotAFolder);
        }
        return Move(MoveOperation::Insert {
            source: source.clone(),
            target_id: target.id.clone(),
            target_index: None,
        });
    }

    if source.index < target.index {
        return Move(horizontal(source, target, target.index));
    }

    if source.index > target.index {
        return Move(horizontal(source, target, target.index + 1));
    }

    Move(horizontal(source, target, target.index))
}

/// Resolve a release over empty space below the rows.
///
/// The source moves to the end of the top-level list.
pub fn resolve_background_drop(source: &DragItem, root_len: usize) -> Resolution {
    if source.parent_id.is_root() && source.index + 1 >= root_len {
        return Resolution::Rejected(RejectReason::SamePosition);
    }

    Resolution::Move(MoveOperation::Insert {
        source: source.clone(),
        target_id: ROOT_ID,
        target_index: None,
    })
}

fn horizontal(
    source: &DragItem,
    target: &DropTarget,
    target_index: usize,
) -> MoveOperation {
    MoveOperation::Horizontal {
        source: source.clone(),
        target_id: target.id.clone(),
        target_index,
    }
}

fn reparent(
    source: &DragItem,
    target: &DropTarget,
    target_index: usize,
) -> MoveOperation {
    MoveOperation::Reparent {
        source: source.clone(),
        target_id: target.id.clone(),
        target_parent_id: target.parent_id.clone(),
        target_index,
    }
}
