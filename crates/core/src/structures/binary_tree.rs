use std::collections::HashSet;

use algoscope_protocol::{NodeId, NodeState, OpStatus, Outcome, TreeNode};
use serde::{Deserialize, Serialize};

use super::{IDS_EXHAUSTED, SnapshotError, allocate, check_ids};

/// A binary search tree stored as a flat node list with id links.
///
/// Values `<=` a node go to its left subtree. `level` and `column` on every
/// node are recomputed after each mutation: level is the depth, column the
/// in-order rank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBinaryTree")]
pub struct BinaryTree {
    nodes: Vec<TreeNode>,
    root: Option<NodeId>,
    next_id: u32,
}

#[derive(Deserialize)]
struct RawBinaryTree {
    nodes: Vec<TreeNode>,
    root: Option<NodeId>,
    next_id: u32,
}

impl TryFrom<RawBinaryTree> for BinaryTree {
    type Error = SnapshotError;

    fn try_from(raw: RawBinaryTree) -> Result<Self, Self::Error> {
        let tree = Self {
            nodes: raw.nodes,
            root: raw.root,
            next_id: raw.next_id,
        };
        tree.validate()?;
        Ok(tree)
    }
}

impl BinaryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert values one by one, keeping only the final snapshot.
    pub fn from_values(values: &[i32]) -> Self {
        values
            .iter()
            .fold(Self::new(), |tree, &v| tree.insert(v).state)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check that the links form one tree rooted at `root` with matching
    /// parent links, and that every value sits on the correct side of each
    /// ancestor.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        check_ids(self.nodes.iter().map(|n| n.id), self.next_id)?;
        let mut seen = HashSet::with_capacity(self.nodes.len());
        // (node, expected parent, exclusive lower bound, inclusive upper bound)
        let mut pending: Vec<(NodeId, Option<NodeId>, Option<i32>, Option<i32>)> = Vec::new();
        if let Some(root) = self.root {
            pending.push((root, None, None, None));
        }
        while let Some((id, parent, above, at_most)) = pending.pop() {
            let node = self.node(id).ok_or(SnapshotError::MissingNode(id.0))?;
            if !seen.insert(id) {
                return Err(SnapshotError::Cycle(id.0));
            }
            if node.parent != parent {
                return Err(SnapshotError::WrongParent(id.0));
            }
            let too_low = above.is_some_and(|lo| node.value <= lo);
            let too_high = at_most.is_some_and(|hi| node.value > hi);
            if too_low || too_high {
                return Err(SnapshotError::OutOfOrder {
                    node: id.0,
                    value: node.value,
                });
            }
            if let Some(left) = node.left {
                pending.push((left, Some(id), above, Some(node.value)));
            }
            if let Some(right) = node.right {
                pending.push((right, Some(id), Some(node.value), at_most));
            }
        }
        match self.nodes.iter().find(|n| !seen.contains(&n.id)) {
            Some(stray) => Err(SnapshotError::Unreachable(stray.id.0)),
            None => Ok(()),
        }
    }

    /// Number of levels; an empty tree has height 0.
    pub fn height(&self) -> u32 {
        self.nodes.iter().map(|n| n.level + 1).max().unwrap_or(0)
    }

    pub fn insert(&self, value: i32) -> Outcome<BinaryTree> {
        let mut next = self.cleared();
        let Some(id) = allocate(&mut next.next_id) else {
            return Outcome::rejected(self.clone(), OpStatus::Full, IDS_EXHAUSTED);
        };

        let mut parent: Option<NodeId> = None;
        let mut went_left = false;
        let mut cursor = next.root;
        while let Some(current) = cursor.and_then(|c| next.node(c)) {
            parent = Some(current.id);
            went_left = value <= current.value;
            cursor = if went_left { current.left } else { current.right };
        }

        next.nodes.push(TreeNode {
            id,
            value,
            state: NodeState::Inserted,
            left: None,
            right: None,
            parent,
            level: 0,
            column: 0,
        });
        let message = match parent.and_then(|p| next.node_mut(p)) {
            Some(p) => {
                let side = if went_left {
                    p.left = Some(id);
                    "left"
                } else {
                    p.right = Some(id);
                    "right"
                };
                format!("Inserted {value} as the {side} child of {}", p.value)
            }
            None => {
                next.root = Some(id);
                format!("Inserted {value} as the root")
            }
        };
        next.finish_mutation();
        log::trace!("tree insert {value}: {} nodes", next.nodes.len());
        Outcome::applied(next, message)
    }

    /// Look for `value`; only the matching node is highlighted.
    pub fn search(&self, value: i32) -> Outcome<BinaryTree> {
        if self.is_empty() {
            return Outcome::rejected(self.clone(), OpStatus::Empty, "The tree is empty");
        }
        let (path, found) = self.walk(value);
        let Some(found) = found else {
            return Outcome::rejected(
                self.clone(),
                OpStatus::Missing,
                format!("{value} is not in the tree"),
            );
        };

        let mut next = self.cleared();
        next.mark_roles();
        if let Some(node) = next.node_mut(found) {
            node.state = NodeState::Found;
        }
        let route = path
            .iter()
            .filter_map(|id| self.node(*id))
            .map(|n| n.value.to_string())
            .collect::<Vec<_>>()
            .join(" -> ");
        Outcome::applied(next, format!("Found {value} via {route}")).with_value(value)
    }

    /// Remove the first node holding `value` on the search path.
    ///
    /// A node with two children takes its in-order predecessor's value and
    /// the predecessor node is unlinked instead. Taking it from the left keeps
    /// equal values left of the node that now holds them.
    pub fn delete(&self, value: i32) -> Outcome<BinaryTree> {
        if self.is_empty() {
            return Outcome::rejected(
                self.clone(),
                OpStatus::Empty,
                "Cannot delete from an empty tree",
            );
        }
        let Some(target) = self.walk(value).1 else {
            return Outcome::rejected(
                self.clone(),
                OpStatus::Missing,
                format!("{value} is not in the tree"),
            );
        };

        let mut next = self.cleared();
        let Some(node) = next.node(target).copied() else {
            return Outcome::rejected(
                self.clone(),
                OpStatus::Missing,
                format!("{value} is not in the tree"),
            );
        };

        let message = match (node.left, node.right) {
            (Some(left), Some(_)) => {
                let predecessor = next.max_of(left);
                let predecessor_value = next.node(predecessor).map_or(value, |n| n.value);
                next.unlink(predecessor);
                if let Some(n) = next.node_mut(target) {
                    n.value = predecessor_value;
                }
                format!("Deleted {value}; replaced by its predecessor {predecessor_value}")
            }
            (Some(_), None) | (None, Some(_)) => {
                next.unlink(target);
                format!("Deleted {value}; its child moved up")
            }
            (None, None) => {
                next.unlink(target);
                format!("Deleted leaf {value}")
            }
        };
        next.finish_mutation();
        log::trace!("tree delete {value}: {} nodes", next.nodes.len());
        Outcome::applied(next, message).with_value(value)
    }

    pub fn clear(&self) -> Outcome<BinaryTree> {
        let next = BinaryTree {
            nodes: Vec::new(),
            root: None,
            next_id: self.next_id,
        };
        Outcome::applied(next, "Cleared the tree")
    }

    pub fn in_order(&self) -> Vec<i32> {
        let mut out = Vec::with_capacity(self.len());
        self.visit(self.root, Order::In, &mut out);
        out
    }

    pub fn pre_order(&self) -> Vec<i32> {
        let mut out = Vec::with_capacity(self.len());
        self.visit(self.root, Order::Pre, &mut out);
        out
    }

    pub fn post_order(&self) -> Vec<i32> {
        let mut out = Vec::with_capacity(self.len());
        self.visit(self.root, Order::Post, &mut out);
        out
    }

    fn visit(&self, id: Option<NodeId>, order: Order, out: &mut Vec<i32>) {
        let Some(node) = id.and_then(|id| self.node(id)) else {
            return;
        };
        if order == Order::Pre {
            out.push(node.value);
        }
        self.visit(node.left, order, out);
        if order == Order::In {
            out.push(node.value);
        }
        self.visit(node.right, order, out);
        if order == Order::Post {
            out.push(node.value);
        }
    }

    /// Search path from the root and the matching node, if any.
    fn walk(&self, value: i32) -> (Vec<NodeId>, Option<NodeId>) {
        let mut path = Vec::new();
        let mut cursor = self.root.and_then(|id| self.node(id));
        while let Some(node) = cursor {
            path.push(node.id);
            if node.value == value {
                return (path, Some(node.id));
            }
            let child = if value < node.value {
                node.left
            } else {
                node.right
            };
            cursor = child.and_then(|id| self.node(id));
        }
        (path, None)
    }

    fn max_of(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.node(id).and_then(|n| n.right) {
            id = right;
        }
        id
    }

    /// Remove a node with at most one child, lifting that child into its place.
    fn unlink(&mut self, id: NodeId) {
        let Some(node) = self.node(id).copied() else {
            return;
        };
        let child = node.left.or(node.right);
        if let Some(c) = child.and_then(|c| self.node_mut(c)) {
            c.parent = node.parent;
        }
        match node.parent.and_then(|p| self.node_mut(p)) {
            Some(parent) if parent.left == Some(id) => parent.left = child,
            Some(parent) => parent.right = child,
            None => self.root = child,
        }
        self.nodes.retain(|n| n.id != id);
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut TreeNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    fn cleared(&self) -> BinaryTree {
        let mut next = self.clone();
        next.nodes
            .iter_mut()
            .for_each(|n| n.state = NodeState::Default);
        next
    }

    /// Give the root its role marker unless it already carries a highlight.
    fn mark_roles(&mut self) {
        if let Some(root) = self.root.and_then(|r| self.node_mut(r))
            && root.state == NodeState::Default
        {
            root.state = NodeState::Root;
        }
    }

    fn finish_mutation(&mut self) {
        self.layout();
        self.mark_roles();
    }

    fn layout(&mut self) {
        let mut placed: Vec<(NodeId, u32, u32)> = Vec::with_capacity(self.nodes.len());
        let mut column = 0;
        self.place(self.root, 0, &mut column, &mut placed);
        for (id, level, col) in placed {
            if let Some(node) = self.node_mut(id) {
                node.level = level;
                node.column = col;
            }
        }
    }

    fn place(
        &self,
        id: Option<NodeId>,
        level: u32,
        column: &mut u32,
        placed: &mut Vec<(NodeId, u32, u32)>,
    ) {
        let Some(node) = id.and_then(|id| self.node(id)) else {
            return;
        };
        self.place(node.left, level + 1, column, placed);
        placed.push((node.id, level, *column));
        *column += 1;
        self.place(node.right, level + 1, column, placed);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Order {
    Pre,
    In,
    Post,
}
