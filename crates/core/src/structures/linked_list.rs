use std::collections::HashSet;

use algoscope_protocol::{ListNode, NodeId, NodeState, OpStatus, Outcome};
use serde::{Deserialize, Serialize};

use super::{IDS_EXHAUSTED, SnapshotError, allocate, check_ids};

/// A singly linked list kept as a flat node list with `next` references.
///
/// `nodes` is in allocation order; list order is found by walking from
/// `head`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLinkedList")]
pub struct LinkedList {
    nodes: Vec<ListNode>,
    head: Option<NodeId>,
    next_id: u32,
}

#[derive(Deserialize)]
struct RawLinkedList {
    nodes: Vec<ListNode>,
    head: Option<NodeId>,
    next_id: u32,
}

impl TryFrom<RawLinkedList> for LinkedList {
    type Error = SnapshotError;

    fn try_from(raw: RawLinkedList) -> Result<Self, Self::Error> {
        let list = Self {
            nodes: raw.nodes,
            head: raw.head,
            next_id: raw.next_id,
        };
        list.validate()?;
        Ok(list)
    }
}

impl LinkedList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn head(&self) -> Option<NodeId> {
        self.head
    }

    pub fn node(&self, id: NodeId) -> Option<&ListNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in list order, head first.
    pub fn iter(&self) -> impl Iterator<Item = &ListNode> + '_ {
        std::iter::successors(self.head.and_then(|id| self.node(id)), |node| {
            node.next.and_then(|id| self.node(id))
        })
    }

    pub fn values(&self) -> Vec<i32> {
        self.iter().map(|n| n.value).collect()
    }

    /// The chain from `head` must resolve, end, and cover every node once.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        check_ids(self.nodes.iter().map(|n| n.id), self.next_id)?;
        let mut seen = HashSet::with_capacity(self.nodes.len());
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let node = self.node(id).ok_or(SnapshotError::MissingNode(id.0))?;
            if !seen.insert(id) {
                return Err(SnapshotError::Cycle(id.0));
            }
            cursor = node.next;
        }
        match self.nodes.iter().find(|n| !seen.contains(&n.id)) {
            Some(stray) => Err(SnapshotError::Unreachable(stray.id.0)),
            None => Ok(()),
        }
    }

    pub fn insert_head(&self, value: i32) -> Outcome<LinkedList> {
        let mut next = self.cleared();
        let Some(id) = allocate(&mut next.next_id) else {
            return Outcome::rejected(self.clone(), OpStatus::Full, IDS_EXHAUSTED);
        };
        next.nodes.push(ListNode {
            id,
            value,
            state: NodeState::Inserted,
            next: self.head,
        });
        next.head = Some(id);
        log::trace!("list insert head {value}: {} nodes", next.nodes.len());
        Outcome::applied(next, format!("Inserted {value} at the head"))
    }

    pub fn insert_tail(&self, value: i32) -> Outcome<LinkedList> {
        let tail = self.iter().last().map(|n| n.id);
        let mut next = self.cleared();
        let Some(id) = allocate(&mut next.next_id) else {
            return Outcome::rejected(self.clone(), OpStatus::Full, IDS_EXHAUSTED);
        };
        next.nodes.push(ListNode {
            id,
            value,
            state: NodeState::Inserted,
            next: None,
        });
        match tail.and_then(|t| next.node_mut(t)) {
            Some(tail) => tail.next = Some(id),
            None => next.head = Some(id),
        }
        log::trace!("list insert tail {value}: {} nodes", next.nodes.len());
        Outcome::applied(next, format!("Inserted {value} at the tail"))
    }

    /// Remove the first node holding `value`.
    pub fn delete(&self, value: i32) -> Outcome<LinkedList> {
        if self.is_empty() {
            return Outcome::rejected(
                self.clone(),
                OpStatus::Empty,
                "Cannot delete from an empty list",
            );
        }
        let mut prev: Option<NodeId> = None;
        let mut target: Option<&ListNode> = None;
        for node in self.iter() {
            if node.value == value {
                target = Some(node);
                break;
            }
            prev = Some(node.id);
        }
        let Some(target) = target else {
            return Outcome::rejected(
                self.clone(),
                OpStatus::Missing,
                format!("{value} is not in the list"),
            );
        };

        let mut next = self.cleared();
        match prev.and_then(|p| next.node_mut(p)) {
            Some(prev) => prev.next = target.next,
            None => next.head = target.next,
        }
        next.nodes.retain(|n| n.id != target.id);
        log::trace!("list delete {value}: {} nodes", next.nodes.len());
        Outcome::applied(next, format!("Deleted {value} from the list")).with_value(value)
    }

    /// Walk from the head; visited nodes are marked until the match.
    pub fn search(&self, value: i32) -> Outcome<LinkedList> {
        if self.is_empty() {
            return Outcome::rejected(
                self.clone(),
                OpStatus::Empty,
                "Cannot search an empty list",
            );
        }
        let path: Vec<NodeId> = self.iter().map(|n| n.id).collect();
        let Some(position) = self.iter().position(|n| n.value == value) else {
            return Outcome::rejected(
                self.clone(),
                OpStatus::Missing,
                format!("{value} is not in the list"),
            );
        };

        let mut next = self.cleared();
        for (i, id) in path.iter().take(position + 1).enumerate() {
            if let Some(node) = next.node_mut(*id) {
                node.state = if i == position {
                    NodeState::Found
                } else {
                    NodeState::Visiting
                };
            }
        }
        Outcome::applied(next, format!("Found {value} at position {position}")).with_value(value)
    }

    pub fn clear(&self) -> Outcome<LinkedList> {
        let next = LinkedList {
            nodes: Vec::new(),
            head: None,
            next_id: self.next_id,
        };
        Outcome::applied(next, "Cleared the list")
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut ListNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    fn cleared(&self) -> LinkedList {
        let mut next = self.clone();
        next.nodes
            .iter_mut()
            .for_each(|n| n.state = NodeState::Default);
        next
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn list(values: &[i32]) -> LinkedList {
        values
            .iter()
            .fold(LinkedList::new(), |l, &v| l.insert_tail(v).state)
    }

    #[test]
    fn insert_head_and_tail() {
        let l = LinkedList::new().insert_tail(2).state;
        let l = l.insert_head(1).state.insert_tail(3).state;
        assert_eq!(l.values(), vec![1, 2, 3]);
        assert_eq!(l.len(), 3);
    }

    #[test]
    fn delete_relinks_neighbours() {
        let l = list(&[1, 2, 3]).delete(2);
        assert!(l.is_applied());
        assert_eq!(l.state.values(), vec![1, 3]);
        let head = l.state.head().and_then(|id| l.state.node(id));
        assert_eq!(head.map(|n| n.value), Some(1));
    }

    #[test]
    fn delete_head_moves_head() {
        let l = list(&[1, 2]).delete(1);
        assert_eq!(l.state.values(), vec![2]);
    }

    #[test]
    fn delete_first_of_duplicates() {
        let l = list(&[5, 6, 5]).delete(5).state;
        assert_eq!(l.values(), vec![6, 5]);
    }

    #[test]
    fn delete_missing_is_rejected() {
        let original = list(&[1, 2]);
        let outcome = original.delete(9);
        assert_eq!(outcome.status, OpStatus::Missing);
        assert_eq!(outcome.state, original);
    }

    #[test]
    fn delete_on_empty_is_rejected() {
        assert_eq!(LinkedList::new().delete(1).status, OpStatus::Empty);
    }

    #[test]
    fn search_marks_path() {
        let outcome = list(&[4, 5, 6]).search(5);
        let states: Vec<NodeState> = outcome.state.iter().map(|n| n.state).collect();
        assert_eq!(
            states,
            vec![NodeState::Visiting, NodeState::Found, NodeState::Default]
        );
        assert_eq!(outcome.message, "Found 5 at position 1");
    }

    #[test]
    fn search_missing_is_rejected() {
        let outcome = list(&[4]).search(7);
        assert_eq!(outcome.status, OpStatus::Missing);
        assert_eq!(outcome.value, None);
    }

    #[test]
    fn highlights_reset_between_operations() {
        let l = list(&[1, 2]).search(2).state.insert_head(0).state;
        let states: Vec<NodeState> = l.iter().map(|n| n.state).collect();
        assert_eq!(
            states,
            vec![NodeState::Inserted, NodeState::Default, NodeState::Default]
        );
    }

    #[test]
    fn valid_snapshot_round_trips() {
        let l = list(&[4, 5, 6]).delete(5).state;
        let json = serde_json::to_string(&l).unwrap();
        let back: LinkedList = serde_json::from_str(&json).unwrap();
        assert_eq!(back.values(), vec![4, 6]);
    }

    fn node(id: u32, next: Option<u32>) -> serde_json::Value {
        json!({"id": id, "value": 1, "state": "default", "next": next})
    }

    #[test]
    fn self_loop_is_refused() {
        let raw = json!({"nodes": [node(0, Some(0))], "head": 0, "next_id": 1});
        assert!(serde_json::from_value::<LinkedList>(raw).is_err());
    }

    #[test]
    fn broken_chains_are_refused() {
        let dangling = json!({"nodes": [node(0, Some(7))], "head": 0, "next_id": 8});
        assert!(serde_json::from_value::<LinkedList>(dangling).is_err());
        let orphan = json!({"nodes": [node(0, None), node(1, None)], "head": 0, "next_id": 2});
        assert!(serde_json::from_value::<LinkedList>(orphan).is_err());
        let headless = json!({"nodes": [node(0, None)], "head": null, "next_id": 1});
        assert!(serde_json::from_value::<LinkedList>(headless).is_err());
    }

    #[test]
    fn cycle_reports_the_revisited_node() {
        let l = list(&[1, 2]);
        let mut cyclic = l.clone();
        if let Some(second) = cyclic.nodes.iter_mut().find(|n| n.value == 2) {
            second.next = l.head();
        }
        assert_eq!(cyclic.validate(), Err(SnapshotError::Cycle(0)));
    }

    #[test]
    fn insert_with_ids_exhausted_is_rejected() {
        let raw = json!({"nodes": [], "head": null, "next_id": u32::MAX});
        let l: LinkedList = serde_json::from_value(raw).unwrap();
        assert_eq!(l.insert_head(1).status, OpStatus::Full);
        assert_eq!(l.insert_tail(1).status, OpStatus::Full);
    }
}
