use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::TreeConfig;
use crate::drag::{DragItem, DropTarget};
use crate::error::{Error, Result};
use crate::mutator::{self, DropSummary};
use crate::node::{Folder, NodeId, TreeNode};
use crate::rename::{self, RenameCommit, RenameTrigger};
use crate::resolver::{
    MoveOperation, Resolution, resolve, resolve_background_drop,
};
use crate::tree::{
    FlattenedNode, find_duplicate_id, find_node, flatten_tree, folder_mut,
    remove_node, update_node,
};
use crate::zone::{DropZone, RowBounds, classify};

/// Notification published by [`TreeStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum TreeEvent {
    /// A new snapshot replaced the previous one.
    SnapshotChanged(Arc<Vec<TreeNode>>),
    /// A drop produced a move.
    Dropped(DropSummary),
    RenameCommitted(RenameCommit),
    Toggled { id: NodeId, is_open: bool },
    /// Folder label click, when label clicks do not toggle.
    LabelClicked(NodeId),
    FileClicked(NodeId),
}

/// Non-tree item dropped onto a folder.
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignDrop {
    pub kind: String,
    pub payload: serde_json::Value,
    pub target_id: NodeId,
}

/// Handle returned by [`TreeStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&TreeEvent)>;
type DropHandler = Box<dyn FnMut(&ForeignDrop) -> bool>;

/// Owner of the current tree snapshot.
///
/// Every edit builds a new snapshot and publishes it wholesale, so readers
/// holding an earlier [`Arc`] keep a consistent tree.
pub struct TreeStore {
    snapshot: Arc<Vec<TreeNode>>,
    config: TreeConfig,
    source_parent: Folder,
    target_parent: Folder,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
    drop_handlers: HashMap<String, DropHandler>,
}

impl fmt::Debug for TreeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeStore")
            .field("snapshot", &self.snapshot)
            .field("config", &self.config)
            .field("subscribers", &self.subscribers.len())
            .field("drop_handlers", &self.drop_handlers.keys())
            .finish()
    }
}

impl TreeStore {
    pub fn new(nodes: Vec<TreeNode>, config: TreeConfig) -> Result<Self> {
        config.validate()?;
        if let Some(id) = find_duplicate_id(&nodes) {
            return Err(Error::DuplicateId(id));
        }

        let root = Folder::root(nodes.clone());
        Ok(Self {
            snapshot: Arc::new(nodes),
            config,
            source_parent: root.clone(),
            target_parent: root,
            subscribers: Vec::new(),
            next_subscription: 1,
            drop_handlers: HashMap::new(),
        })
    }

    /// Build a store from a JSON array of nodes.
    pub fn from_json(json: &str, config: TreeConfig) -> Result<Self> {
        let nodes: Vec<TreeNode> = serde_json::from_str(json)?;
        Self::new(nodes, config)
    }

    pub fn snapshot(&self) -> Arc<Vec<TreeNode>> {
        Arc::clone(&self.snapshot)
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.snapshot
    }

    pub fn find(&self, id: &NodeId) -> Option<&TreeNode> {
        find_node(&self.snapshot, id)
    }

    /// Visible rows of the current snapshot.
    pub fn rows(&self) -> Vec<FlattenedNode<'_>> {
        flatten_tree(&self.snapshot)
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: TreeConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Parent the last moved node came from, read after the move.
    pub fn source_parent(&self) -> &Folder {
        &self.source_parent
    }

    /// Parent the last moved node landed in.
    pub fn target_parent(&self) -> &Folder {
        &self.target_parent
    }

    pub fn subscribe(
        &mut self,
        subscriber: impl FnMut(&TreeEvent) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    /// Route drops of `kind` items to `handler`, bypassing move resolution.
    ///
    /// The handler returns whether it accepted the drop.
    pub fn register_drop_handler(
        &mut self,
        kind: impl Into<String>,
        handler: impl FnMut(&ForeignDrop) -> bool + 'static,
    ) {
        self.drop_handlers.insert(kind.into(), Box::new(handler));
    }

    pub fn accepts_foreign(&self, kind: &str) -> bool {
        self.drop_handlers.contains_key(kind)
    }

    /// Replace the whole snapshot, e.g. when the caller's data changed.
    pub fn replace_snapshot(&mut self, nodes: Vec<TreeNode>) -> Result<()> {
        if let Some(id) = find_duplicate_id(&nodes) {
            return Err(Error::DuplicateId(id));
        }
        self.publish(nodes);
        Ok(())
    }

    /// Flip a folder between open and closed. Returns the new state.
    pub fn toggle(&mut self, id: &NodeId) -> Option<bool> {
        let mut is_open = None;
        let updated = update_node(&self.snapshot, id, |node| {
            if let Some(folder) = node.as_folder_mut() {
                folder.is_open = !folder.is_open;
                is_open = Some(folder.is_open);
            }
        })?;
        let is_open = is_open?;

        self.publish(updated);
        self.notify(&TreeEvent::Toggled {
            id: id.clone(),
            is_open,
        });
        Some(is_open)
    }

    /// Open or close a folder; a no-op when it is already in that state.
    pub fn set_open(&mut self, id: &NodeId, is_open: bool) -> Option<bool> {
        let current = self.find(id)?.as_folder()?.is_open;
        if current == is_open {
            return Some(is_open);
        }
        self.toggle(id)
    }

    pub fn click_chevron(&mut self, id: &NodeId) -> Option<bool> {
        self.toggle(id)
    }

    /// Folder label click: toggles, or is reported to subscribers.
    pub fn click_label(&mut self, id: &NodeId) -> Option<bool> {
        if !self.find(id)?.is_folder() {
            return None;
        }

        if self.config.label_click_toggles {
            self.toggle(id)
        } else {
            self.notify(&TreeEvent::LabelClicked(id.clone()));
            None
        }
    }

    pub fn click_file(&mut self, id: &NodeId) -> bool {
        let is_file = self.find(id).is_some_and(|node| !node.is_folder());
        if is_file {
            self.notify(&TreeEvent::FileClicked(id.clone()));
        }
        is_file
    }

    pub fn begin_rename(&mut self, id: &NodeId) -> bool {
        match rename::begin_rename(&self.snapshot, id) {
            Some(updated) => {
                self.publish(updated);
                true
            },
            None => false,
        }
    }

    /// Commit an inline rename; blank names keep the previous name.
    pub fn commit_rename(
        &mut self,
        id: &NodeId,
        proposed: &str,
        trigger: RenameTrigger,
    ) -> Option<RenameCommit> {
        let (updated, commit) =
            rename::commit_rename(&self.snapshot, id, proposed, trigger)?;

        self.publish(updated);
        self.notify(&TreeEvent::RenameCommitted(commit.clone()));
        Some(commit)
    }

    /// Resolve and apply a drop of `source` on `target`.
    pub fn drop_item(
        &mut self,
        source: &DragItem,
        target: &DropTarget,
        zone: DropZone,
    ) -> Option<DropSummary> {
        match resolve(source, target, zone) {
            Resolution::Move(operation) => self.apply_move(&operation),
            Resolution::Rejected(reason) => {
                log::debug!(
                    "drop of {} on {} ({zone:?}) rejected: {reason:?}",
                    source.id,
                    target.id
                );
                None
            },
        }
    }

    /// Classify the pointer against the target row, then drop.
    pub fn drop_at_pointer(
        &mut self,
        source: &DragItem,
        target: &DropTarget,
        bounds: Option<RowBounds>,
        pointer_y: f32,
    ) -> Option<DropSummary> {
        let zone = classify(bounds, pointer_y, self.config.zones);
        self.drop_item(source, target, zone)
    }

    /// Drop over empty space: move the source to the end of the top level.
    pub fn drop_on_background(
        &mut self,
        source: &DragItem,
    ) -> Option<DropSummary> {
        match resolve_background_drop(source, self.snapshot.len()) {
            Resolution::Move(operation) => self.apply_move(&operation),
            Resolution::Rejected(reason) => {
                log::debug!(
                    "background drop of {} rejected: {reason:?}",
                    source.id
                );
                None
            },
        }
    }

    /// Apply an already resolved operation.
    ///
    /// Malformed operations are logged and leave the snapshot untouched.
    pub fn apply_move(
        &mut self,
        operation: &MoveOperation,
    ) -> Option<DropSummary> {
        let summary = match mutator::apply(
            &self.snapshot,
            operation,
            self.config.open_on_drop,
        ) {
            Ok(summary) => summary,
            Err(err) => {
                log::warn!("tree move failed: {err}");
                return None;
            },
        };

        log::debug!(
            "moved {} into {} at {}",
            summary.source_id,
            summary.target_parent.id,
            summary.target_index
        );
        self.source_parent = summary.source_parent.clone();
        self.target_parent = summary.target_parent.clone();
        self.snapshot = Arc::clone(&summary.tree);
        self.notify(&TreeEvent::SnapshotChanged(Arc::clone(&summary.tree)));
        self.notify(&TreeEvent::Dropped(summary.clone()));
        Some(summary)
    }

    /// Hand a foreign item to the handler registered for its kind.
    ///
    /// Only folders and the root accept foreign drops.
    pub fn drop_foreign(
        &mut self,
        kind: &str,
        payload: serde_json::Value,
        target_id: &NodeId,
    ) -> bool {
        let is_container = target_id.is_root()
            || self.find(target_id).is_some_and(TreeNode::is_folder);
        if !is_container {
            log::debug!("foreign {kind} drop on {target_id} ignored");
            return false;
        }

        let Some(handler) = self.drop_handlers.get_mut(kind) else {
            log::warn!("no drop handler registered for {kind}");
            return false;
        };

        handler(&ForeignDrop {
            kind: kind.to_owned(),
            payload,
            target_id: target_id.clone(),
        })
    }

    /// Insert a new node under `parent_id`; `None` appends.
    pub fn insert_node(
        &mut self,
        parent_id: &NodeId,
        index: Option<usize>,
        node: TreeNode,
    ) -> Result<()> {
        let mut root = Folder::root(self.snapshot.to_vec());
        let parent = editable_folder(&mut root, parent_id)?;
        let index = index
            .unwrap_or(parent.children.len())
            .min(parent.children.len());
        parent.children.insert(index, node);

        self.commit_edit(root.children)
    }

    /// Swap the children of a folder.
    pub fn replace_children(
        &mut self,
        folder_id: &NodeId,
        children: Vec<TreeNode>,
    ) -> Result<()> {
        let mut root = Folder::root(self.snapshot.to_vec());
        editable_folder(&mut root, folder_id)?.children = children;

        self.commit_edit(root.children)
    }

    /// Remove a node wherever it is; returns the removed subtree.
    pub fn remove(&mut self, id: &NodeId) -> Option<TreeNode> {
        let removed = self.find(id)?.clone();
        let updated = remove_node(&self.snapshot, id);
        self.publish(updated);
        Some(removed)
    }

    fn commit_edit(&mut self, nodes: Vec<TreeNode>) -> Result<()> {
        if let Some(id) = find_duplicate_id(&nodes) {
            return Err(Error::DuplicateId(id));
        }
        self.publish(nodes);
        Ok(())
    }

    fn publish(&mut self, nodes: Vec<TreeNode>) {
        self.snapshot = Arc::new(nodes);
        log::trace!(
            "tree snapshot replaced ({} top-level nodes)",
            self.snapshot.len()
        );
        self.notify(&TreeEvent::SnapshotChanged(Arc::clone(&self.snapshot)));
    }

    fn notify(&mut self, event: &TreeEvent) {
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(event);
        }
    }
}

fn editable_folder<'a>(
    root: &'a mut Folder,
    id: &NodeId,
) -> Result<&'a mut Folder> {
    if find_node(&root.children, id).is_some_and(|node| !node.is_folder()) {
        return Err(Error::NotAFolder(id.clone()));
    }
    folder_mut(root, id).ok_or_else(|| Error::NodeNotFound(id.clone()))
}
