//! Property-based invariant tests for drop resolution and tree moves.
//!
//! 1. Valid moves keep the id set intact (no loss, no duplication)
//! 2. A moved node never ends up inside its own subtree
//! 3. Rejected or failed drops leave the published snapshot untouched
//! 4. Every resolved operation applies cleanly

use std::sync::Arc;

use kreme_tree::{
    DragItem, DropTarget, DropZone, Folder, NodeId, Resolution, TreeConfig,
    TreeNode, TreeStore, ancestry_path, collect_ids, find_duplicate_id,
    resolve,
};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

/// One generated node: a parent selector and whether it is a folder.
type Shape = Vec<(usize, bool)>;

fn shape_strategy() -> impl Strategy<Value = Shape> {
    prop::collection::vec((0usize..64, any::<bool>()), 2..40)
}

fn zone_strategy() -> impl Strategy<Value = DropZone> {
    prop_oneof![
        Just(DropZone::Top),
        Just(DropZone::Middle),
        Just(DropZone::Bottom),
        Just(DropZone::None),
    ]
}

struct Entry {
    id: i64,
    parent: Option<i64>,
    is_folder: bool,
}

/// Build a tree with sequential ids where every folder is open.
fn build(shape: &[(usize, bool)]) -> Vec<TreeNode> {
    let mut folders: Vec<i64> = Vec::new();
    let mut entries = Vec::with_capacity(shape.len());
    for (id, (selector, is_folder)) in shape.iter().enumerate() {
        let id = id as i64;
        let slot = selector % (folders.len() + 1);
        let parent = (slot > 0).then(|| folders[slot - 1]);
        entries.push(Entry {
            id,
            parent,
            is_folder: *is_folder,
        });
        if *is_folder {
            folders.push(id);
        }
    }
    children_of(None, &entries)
}

fn children_of(parent: Option<i64>, entries: &[Entry]) -> Vec<TreeNode> {
    entries
        .iter()
        .filter(|entry| entry.parent == parent)
        .map(|entry| {
            let name = format!("node-{}", entry.id);
            if entry.is_folder {
                TreeNode::Folder(
                    Folder::new(entry.id, name)
                        .open(true)
                        .with_children(children_of(Some(entry.id), entries)),
                )
            } else {
                TreeNode::file(entry.id, name)
            }
        })
        .collect()
}

fn sorted_ids(nodes: &[TreeNode]) -> Vec<NodeId> {
    let mut ids = collect_ids(nodes);
    ids.sort_by_key(ToString::to_string);
    ids
}

// ═══════════════════════════════════════════════════════════════════════
// 1. and 2. Valid moves preserve ids and never create cycles
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn moves_preserve_ids_and_never_nest_into_self(
        shape in shape_strategy(),
        source_pick in any::<prop::sample::Index>(),
        target_pick in any::<prop::sample::Index>(),
        zone in zone_strategy(),
        open_on_drop in any::<bool>(),
    ) {
        let nodes = build(&shape);
        let ids = sorted_ids(&nodes);
        let source_id = source_pick.get(&ids).clone();
        let target_id = target_pick.get(&ids).clone();

        let config = TreeConfig::default().with_open_on_drop(open_on_drop);
        let mut store = TreeStore::new(nodes, config).unwrap();
        let source = DragItem::from_tree(store.nodes(), &source_id).unwrap();
        let target = DropTarget::from_tree(store.nodes(), &target_id).unwrap();

        if let Some(summary) = store.drop_item(&source, &target, zone) {
            prop_assert_eq!(sorted_ids(&summary.tree), ids);
            prop_assert!(find_duplicate_id(&summary.tree).is_none());

            let ancestry = ancestry_path(&summary.tree, &source_id).unwrap();
            prop_assert!(!ancestry.contains(&source_id));
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Rejections are identity
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rejected_drops_keep_snapshot(
        shape in shape_strategy(),
        source_pick in any::<prop::sample::Index>(),
        target_pick in any::<prop::sample::Index>(),
        zone in zone_strategy(),
    ) {
        let nodes = build(&shape);
        let ids = sorted_ids(&nodes);
        let source_id = source_pick.get(&ids).clone();
        let target_id = target_pick.get(&ids).clone();

        let mut store = TreeStore::new(nodes, TreeConfig::default()).unwrap();
        let before = store.snapshot();
        let source = DragItem::from_tree(store.nodes(), &source_id).unwrap();
        let target = DropTarget::from_tree(store.nodes(), &target_id).unwrap();

        if store.drop_item(&source, &target, zone).is_none() {
            prop_assert!(Arc::ptr_eq(&before, &store.snapshot()));
        }
    }

    #[test]
    fn dropping_a_node_onto_itself_is_always_rejected(
        shape in shape_strategy(),
        pick in any::<prop::sample::Index>(),
        zone in zone_strategy(),
    ) {
        let nodes = build(&shape);
        let ids = sorted_ids(&nodes);
        let id = pick.get(&ids).clone();

        let source = DragItem::from_tree(&nodes, &id).unwrap();
        let target = DropTarget::from_tree(&nodes, &id).unwrap();

        prop_assert!(matches!(
            resolve(&source, &target, zone),
            Resolution::Rejected(_)
        ));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Resolved operations always apply
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn resolved_operations_apply_cleanly(
        shape in shape_strategy(),
        source_pick in any::<prop::sample::Index>(),
        target_pick in any::<prop::sample::Index>(),
        zone in zone_strategy(),
    ) {
        let nodes = build(&shape);
        let ids = sorted_ids(&nodes);
        let source_id = source_pick.get(&ids).clone();
        let target_id = target_pick.get(&ids).clone();
        let source = DragItem::from_tree(&nodes, &source_id).unwrap();
        let target = DropTarget::from_tree(&nodes, &target_id).unwrap();

        if let Resolution::Move(operation) = resolve(&source, &target, zone) {
            let applied = kreme_tree::apply(&nodes, &operation, false);
            prop_assert!(applied.is_ok(), "{operation:?} failed: {applied:?}");
        }
    }
}
