use crate::node::{NodeId, TreeNode};
use crate::tree::{find_node, map_tree, update_node};

/// What ended an inline rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameTrigger {
    /// Confirm key (Enter).
    Confirm,
    /// Focus left the input.
    Blur,
}

/// Committed rename, reported to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameCommit {
    pub id: NodeId,
    pub new_name: String,
    pub old_name: String,
    pub trigger: RenameTrigger,
}

/// Put a node into rename-edit mode. Only one node edits at a time.
pub fn begin_rename(nodes: &[TreeNode], id: &NodeId) -> Option<Vec<TreeNode>> {
    find_node(nodes, id)?;
    Some(map_tree(nodes, &mut |node| {
        let editing = node.id() == id;
        (node.is_input() != editing).then(|| {
            let mut node = node.clone();
            node.set_input(editing);
            node
        })
    }))
}

/// Commit a rename. Blank names keep the previous name.
pub fn commit_rename(
    nodes: &[TreeNode],
    id: &NodeId,
    proposed: &str,
    trigger: RenameTrigger,
) -> Option<(Vec<TreeNode>, RenameCommit)> {
    let old_name = find_node(nodes, id)?.name().to_owned();
    let new_name = normalize_name(proposed).unwrap_or_else(|| old_name.clone());

    let updated = update_node(nodes, id, |node| {
        *node.name_mut() = new_name.clone();
        node.set_input(false);
    })?;

    Some((
        updated,
        RenameCommit {
            id: id.clone(),
            new_name,
            old_name,
            trigger,
        },
    ))
}

fn normalize_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes() -> Vec<TreeNode> {
        vec![TreeNode::folder(
            1,
            "docs",
            vec![TreeNode::file(5, "draft.md")],
        )]
    }

    #[test]
    fn begin_rename_marks_node_as_input() {
        let updated = begin_rename(&nodes(), &NodeId::Int(5)).unwrap();

        assert!(find_node(&updated, &NodeId::Int(5)).unwrap().is_input());
        assert!(!find_node(&updated, &NodeId::Int(1)).unwrap().is_input());
    }

    #[test]
    fn begin_rename_ends_previous_edit() {
        let first = begin_rename(&nodes(), &NodeId::Int(5)).unwrap();

        let second = begin_rename(&first, &NodeId::Int(1)).unwrap();

        assert!(find_node(&second, &NodeId::Int(1)).unwrap().is_input());
        assert!(!find_node(&second, &NodeId::Int(5)).unwrap().is_input());
    }

    #[test]
    fn commit_replaces_name_and_clears_input() {
        let editing = begin_rename(&nodes(), &NodeId::Int(5)).unwrap();

        let (updated, commit) = commit_rename(
            &editing,
            &NodeId::Int(5),
            "x",
            RenameTrigger::Confirm,
        )
        .unwrap();

        let node = find_node(&updated, &NodeId::Int(5)).unwrap();
        assert_eq!(node.name(), "x");
        assert!(!node.is_input());
        assert_eq!(commit.old_name, "draft.md");
        assert_eq!(commit.new_name, "x");
    }

    #[test]
    fn blank_name_keeps_previous_name() {
        let (updated, commit) =
            commit_rename(&nodes(), &NodeId::Int(5), "   ", RenameTrigger::Blur)
                .unwrap();

        assert_eq!(find_node(&updated, &NodeId::Int(5)).unwrap().name(), "draft.md");
        assert_eq!(commit.new_name, commit.old_name);
        assert_eq!(commit.trigger, RenameTrigger::Blur);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let (_, commit) =
            commit_rename(&nodes(), &NodeId::Int(1), "  guides ", RenameTrigger::Confirm)
                .unwrap();

        assert_eq!(commit.new_name, "guides");
    }

    #[test]
    fn unknown_node_is_ignored() {
        assert!(begin_rename(&nodes(), &NodeId::Int(9)).is_none());
        assert!(
            commit_rename(&nodes(), &NodeId::Int(9), "x", RenameTrigger::Confirm)
                .is_none()
        );
    }
}
