use serde::{Deserialize, Serialize};

use crate::shared::SharedStr;

/// Identity of a node inside one structure. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

/// Highlight state of a node after the most recent operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeState {
    #[default]
    Default,
    Root,
    /// On the path walked by the last operation.
    Visiting,
    Inserted,
    Found,
}

/// A node in a stack or a queue. Order is the position in the node list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub value: i32,
    pub state: NodeState,
}

/// A singly linked list node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListNode {
    pub id: NodeId,
    pub value: i32,
    pub state: NodeState,
    pub next: Option<NodeId>,
}

/// A binary search tree node with its layout position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: NodeId,
    pub value: i32,
    pub state: NodeState,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub parent: Option<NodeId>,
    /// Depth from the root (root = 0).
    pub level: u32,
    /// In-order rank; a left-to-right column for rendering.
    pub column: u32,
}

/// How a structure operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OpStatus {
    Applied,
    /// The structure was empty; nothing changed.
    Empty,
    /// The structure reached its capacity; nothing changed.
    Full,
    /// No node holds the requested value; nothing changed.
    Missing,
}

/// Result of a single structure operation: a fresh snapshot plus a message
/// the caller can show as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome<T> {
    pub state: T,
    pub message: SharedStr,
    /// Value produced by the operation (popped, dequeued, peeked, found).
    pub value: Option<i32>,
    pub status: OpStatus,
}

impl<T> Outcome<T> {
    pub fn applied(state: T, message: impl Into<SharedStr>) -> Self {
        Self {
            state,
            message: message.into(),
            value: None,
            status: OpStatus::Applied,
        }
    }

    pub fn rejected(state: T, status: OpStatus, message: impl Into<SharedStr>) -> Self {
        Self {
            state,
            message: message.into(),
            value: None,
            status,
        }
    }

    pub fn with_value(mut self, value: i32) -> Self {
        self.value = Some(value);
        self
    }

    pub fn is_applied(&self) -> bool {
        self.status == OpStatus::Applied
    }
}
