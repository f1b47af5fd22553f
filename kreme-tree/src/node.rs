use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of the synthetic root folder that owns the top-level list.
pub const ROOT_ID: NodeId = NodeId::Int(-1);

pub const ROOT_NAME: &str = "root";

/// Opaque node identifier, unique across the whole tree.
///
/// Callers may use integers or strings; both forms serialize untagged so a
/// snapshot like `{"id": 3}` or `{"id": "readme"}` round-trips as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Int(i64),
    Str(String),
}

impl NodeId {
    /// Fresh string id for nodes created at runtime.
    pub fn unique() -> Self {
        NodeId::Str(uuid::Uuid::new_v4().to_string())
    }

    pub fn is_root(&self) -> bool {
        *self == ROOT_ID
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Int(value) => write!(f, "{value}"),
            NodeId::Str(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for NodeId {
    fn from(value: i64) -> Self {
        NodeId::Int(value)
    }
}

impl From<i32> for NodeId {
    fn from(value: i32) -> Self {
        NodeId::Int(i64::from(value))
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        NodeId::Str(value.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        NodeId::Str(value)
    }
}

/// Kind discriminator shared by nodes and drag payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Folder,
    File,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NodeKind::Folder => "folder",
            NodeKind::File => "file",
        };
        write!(f, "{label}")
    }
}

/// Folder node: the only kind that owns children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: NodeId,
    pub name: String,
    #[serde(default)]
    pub is_open: bool,
    #[serde(default)]
    pub is_input: bool,
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

impl Folder {
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_open: false,
            is_input: false,
            children: Vec::new(),
        }
    }

    pub fn open(mut self, is_open: bool) -> Self {
        self.is_open = is_open;
        self
    }

    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    /// Synthetic root folder wrapping a top-level list.
    pub fn root(children: Vec<TreeNode>) -> Self {
        Self {
            id: ROOT_ID,
            name: String::from(ROOT_NAME),
            is_open: true,
            is_input: false,
            children,
        }
    }

    pub fn is_root(&self) -> bool {
        self.id.is_root()
    }

    /// Copy of the folder header with a different child list.
    pub(crate) fn rebuilt(&self, children: Vec<TreeNode>) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            is_open: self.is_open,
            is_input: self.is_input,
            children,
        }
    }

    pub(crate) fn position(&self, id: &NodeId) -> Option<usize> {
        self.children.iter().position(|child| child.id() == id)
    }
}

/// Leaf node. Files carry no `children` field at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    pub id: NodeId,
    pub name: String,
    #[serde(default)]
    pub is_input: bool,
}

impl File {
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_input: false,
        }
    }
}

/// Tree node representing either a folder or a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    Folder(Folder),
    File(File),
}

impl TreeNode {
    /// Closed folder with the given children.
    pub fn folder(
        id: impl Into<NodeId>,
        name: impl Into<String>,
        children: Vec<TreeNode>,
    ) -> Self {
        TreeNode::Folder(Folder::new(id, name).with_children(children))
    }

    pub fn file(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        TreeNode::File(File::new(id, name))
    }

    pub fn id(&self) -> &NodeId {
        match self {
            TreeNode::Folder(folder) => &folder.id,
            TreeNode::File(file) => &file.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TreeNode::Folder(folder) => &folder.name,
            TreeNode::File(file) => &file.name,
        }
    }

    pub fn name_mut(&mut self) -> &mut String {
        match self {
            TreeNode::Folder(folder) => &mut folder.name,
            TreeNode::File(file) => &mut file.name,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            TreeNode::Folder(_) => NodeKind::Folder,
            TreeNode::File(_) => NodeKind::File,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, TreeNode::Folder(_))
    }

    /// Whether the node is an expanded folder. Files are never open.
    pub fn is_open(&self) -> bool {
        matches!(self, TreeNode::Folder(Folder { is_open: true, .. }))
    }

    pub fn is_input(&self) -> bool {
        match self {
            TreeNode::Folder(folder) => folder.is_input,
            TreeNode::File(file) => file.is_input,
        }
    }

    pub fn set_input(&mut self, is_input: bool) {
        match self {
            TreeNode::Folder(folder) => folder.is_input = is_input,
            TreeNode::File(file) => file.is_input = is_input,
        }
    }

    /// Children for the node (folders only).
    pub fn children(&self) -> Option<&[TreeNode]> {
        match self {
            TreeNode::Folder(folder) => Some(&folder.children),
            TreeNode::File(_) => None,
        }
    }

    pub fn as_folder(&self) -> Option<&Folder> {
        match self {
            TreeNode::Folder(folder) => Some(folder),
            TreeNode::File(_) => None,
        }
    }

    pub(crate) fn as_folder_mut(&mut self) -> Option<&mut Folder> {
        match self {
            TreeNode::Folder(folder) => Some(folder),
            TreeNode::File(_) => None,
        }
    }
}

impl From<Folder> for TreeNode {
    fn from(folder: Folder) -> Self {
        TreeNode::Folder(folder)
    }
}

impl From<File> for TreeNode {
    fn from(file: File) -> Self {
        TreeNode::File(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_deserializes_integers_and_strings() {
        let ids: Vec<NodeId> =
            serde_json::from_str(r#"[3, "readme", -1]"#).unwrap();

        assert_eq!(ids[0], NodeId::Int(3));
        assert_eq!(ids[1], NodeId::from("readme"));
        assert!(ids[2].is_root());
    }

    #[test]
    fn unique_ids_do_not_collide() {
        assert_ne!(NodeId::unique(), NodeId::unique());
        assert!(!NodeId::unique().is_root());
    }

    #[test]
    fn tree_node_uses_type_tag_and_camel_case_fields() {
        let json = r#"[
            {"type": "folder", "id": 1, "name": "src", "isOpen": true,
             "children": [{"type": "file", "id": 2, "name": "main.rs"}]},
            {"type": "folder", "id": 3, "name": "empty"}
        ]"#;

        let nodes: Vec<TreeNode> = serde_json::from_str(json).unwrap();

        assert!(nodes[0].is_open());
        assert_eq!(nodes[0].children().map(<[TreeNode]>::len), Some(1));
        assert_eq!(nodes[1].children().map(<[TreeNode]>::len), Some(0));
        assert!(!nodes[1].is_open());
    }

    #[test]
    fn file_nodes_serialize_without_children_field() {
        let value = serde_json::to_value(TreeNode::file(7, "notes")).unwrap();

        assert_eq!(value["type"], "file");
        assert_eq!(value["id"], 7);
        assert!(value.get("children").is_none());
        assert!(value.get("isOpen").is_none());
    }

    #[test]
    fn files_are_never_open_or_containers() {
        let mut file = TreeNode::file("a", "a.txt");

        assert!(!file.is_open());
        assert!(file.children().is_none());
        assert!(file.as_folder_mut().is_none());

        file.set_input(true);
        assert!(file.is_input());
        assert_eq!(file.kind(), NodeKind::File);
    }

    #[test]
    fn root_folder_uses_sentinel_id() {
        let root = Folder::root(vec![TreeNode::file(1, "a")]);

        assert!(root.is_root());
        assert!(root.is_open);
        assert_eq!(root.position(&NodeId::Int(1)), Some(0));
        assert_eq!(root.position(&NodeId::Int(2)), None);
    }
}
