use algoscope_protocol::{Node, NodeState, OpStatus, Outcome};
use serde::{Deserialize, Serialize};

use super::{IDS_EXHAUSTED, SnapshotError, allocate, check_capacity, check_ids};

/// A FIFO queue. The front is the first node, the rear the last.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawQueue")]
pub struct Queue {
    nodes: Vec<Node>,
    next_id: u32,
    capacity: Option<usize>,
}

#[derive(Deserialize)]
struct RawQueue {
    nodes: Vec<Node>,
    next_id: u32,
    capacity: Option<usize>,
}

impl TryFrom<RawQueue> for Queue {
    type Error = SnapshotError;

    fn try_from(raw: RawQueue) -> Result<Self, Self::Error> {
        let queue = Self {
            nodes: raw.nodes,
            next_id: raw.next_id,
            capacity: raw.capacity,
        };
        queue.validate()?;
        Ok(queue)
    }
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounded(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Values from front to rear.
    pub fn values(&self) -> Vec<i32> {
        self.nodes.iter().map(|n| n.value).collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn front(&self) -> Option<&Node> {
        self.nodes.first()
    }

    pub fn rear(&self) -> Option<&Node> {
        self.nodes.last()
    }

    pub fn validate(&self) -> Result<(), SnapshotError> {
        check_ids(self.nodes.iter().map(|n| n.id), self.next_id)?;
        check_capacity(self.nodes.len(), self.capacity)
    }

    pub fn enqueue(&self, value: i32) -> Outcome<Queue> {
        if self.capacity.is_some_and(|cap| self.nodes.len() >= cap) {
            return Outcome::rejected(
                self.clone(),
                OpStatus::Full,
                format!("Queue is full: cannot enqueue {value}"),
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
        log::trace!("queue enqueue {value}: {} nodes", next.nodes.len());
        Outcome::applied(next, format!("Enqueued {value} at the rear"))
    }

    pub fn dequeue(&self) -> Outcome<Queue> {
        if self.nodes.is_empty() {
            return Outcome::rejected(
                self.clone(),
                OpStatus::Empty,
                "Cannot dequeue from an empty queue",
            );
        }
        let mut next = self.cleared();
        let node = next.nodes.remove(0);
        log::trace!("queue dequeue {}: {} nodes", node.value, next.nodes.len());
        Outcome::applied(next, format!("Dequeued {} from the front", node.value))
            .with_value(node.value)
    }

    pub fn peek(&self) -> Outcome<Queue> {
        let mut next = self.cleared();
        let Some(front) = next.nodes.first_mut() else {
            return Outcome::rejected(
                self.clone(),
                OpStatus::Empty,
                "Cannot peek at an empty queue",
            );
        };
        front.state = NodeState::Found;
        let value = front.value;
        Outcome::applied(next, format!("Front of the queue is {value}")).with_value(value)
    }

    pub fn clear(&self) -> Outcome<Queue> {
        let next = Queue {
            nodes: Vec::new(),
            ..self.clone()
        };
        Outcome::applied(next, "Cleared the queue")
    }

    fn cleared(&self) -> Queue {
        let mut next = self.clone();
        next.nodes
            .iter_mut()
            .for_each(|n| n.state = NodeState::Default);
        next
    }
}
