use algoscope_protocol::{Node, NodeState, OpStatus, Outcome};
use serde::{Deserialize, Serialize};

use super::{IDS_EXHAUSTED, SnapshotError, allocate, check_capacity, check_ids};

/// A LIFO stack. The top is the last node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStack")]
pub struct Stack {
    nodes: Vec<Node>,
    next_id: u32,
    capacity: Option<usize>,
}

#[derive(Deserialize)]
struct RawStack {
    nodes: Vec<Node>,
    next_id: u32,
    capacity: Option<usize>,
}

impl TryFrom<RawStack> for Stack {
    type Error = SnapshotError;

    fn try_from(raw: RawStack) -> Result<Self, Self::Error> {
        let stack = Self {
            nodes: raw.nodes,
            next_id: raw.next_id,
            capacity: raw.capacity,
        };
        stack.validate()?;
        Ok(stack)
    }
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stack that rejects pushes once it holds `capacity` nodes.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Values from bottom to top.
    pub fn values(&self) -> Vec<i32> {
        self.nodes.iter().map(|n| n.value).collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn top(&self) -> Option<&Node> {
        self.nodes.last()
    }

    pub fn validate(&self) -> Result<(), SnapshotError> {
        check_ids(self.nodes.iter().map(|n| n.id), self.next_id)?;
        check_capacity(self.nodes.len(), self.capacity)
    }

    pub fn push(&self, value: i32) -> Outcome<Stack> {
        if self.capacity.is_some_and(|cap| self.nodes.len() >= cap) {
            return Outcome::rejected(
                self.clone(),
                OpStatus::Full,
                format!("Stack overflow: cannot push {value} onto a full stack"),
            );
        }
        let mut next = self.cleared();
        let Some(id) = allocate(&mut next.next_id) else {
            return Outcome::rejected(self.clone(), OpStatus::Full, IDS_EXHAUSTED);
        };
        next.nodes.push(Node {
            id,
            value,
            state: NodeState::Inserted,
        });
        log::trace!("stack push {value}: {} nodes", next.nodes.len());
        Outcome::applied(next, format!("Pushed {value} onto the stack"))
    }

    pub fn pop(&self) -> Outcome<Stack> {
        let mut next = self.cleared();
        let Some(node) = next.nodes.pop() else {
            return Outcome::rejected(
                self.clone(),
                OpStatus::Empty,
                "Cannot pop from an empty stack",
            );
        };
        log::trace!("stack pop {}: {} nodes", node.value, next.nodes.len());
        Outcome::applied(next, format!("Popped {} from the stack", node.value))
            .with_value(node.value)
    }

    pub fn peek(&self) -> Outcome<Stack> {
        let mut next = self.cleared();
        let Some(top) = next.nodes.last_mut() else {
            return Outcome::rejected(
                self.clone(),
                OpStatus::Empty,
                "Cannot peek at an empty stack",
            );
        };
        top.state = NodeState::Found;
        let value = top.value;
        Outcome::applied(next, format!("Top of the stack is {value}")).with_value(value)
    }

    pub fn clear(&self) -> Outcome<Stack> {
        let next = Stack {
            nodes: Vec::new(),
            ..self.clone()
        };
        Outcome::applied(next, "Cleared the stack")
    }

    /// Copy with highlights from the previous operation removed.
    fn cleared(&self) -> Stack {
        let mut next = self.clone();
        next.nodes
            .iter_mut()
            .for_each(|n| n.state = NodeState::Default);
        next
    }
}
