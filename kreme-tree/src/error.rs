use thiserror::Error;

use crate::node::NodeId;

/// Errors raised by structural tree edits.
///
/// Rejected drag-and-drop gestures are not errors, see
/// [`Resolution`](crate::Resolution).
#[derive(Debug, Error)]
pub enum Error {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("node {0} is not a folder")]
    NotAFolder(NodeId),

    #[error("node {id} is not a child of {parent_id}")]
    SourceNotFound { id: NodeId, parent_id: NodeId },

    #[error("cannot move {moved} into its own subtree at {target}")]
    Cycle { moved: NodeId, target: NodeId },

    #[error("node id {0} is already used in the tree")]
    DuplicateId(NodeId),

    #[error("invalid drop zone thresholds: top {top}, bottom {bottom}")]
    InvalidThresholds { top: f32, bottom: f32 },

    #[error("tree JSON failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenient result alias for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;
