//! Stack, queue, linked list, and binary search tree operations.
//!
//! Every structure is a plain value. Operations take `&self` and return an
//! [`Outcome`](algoscope_protocol::Outcome) holding a fresh snapshot, so the
//! caller's copy is never touched. Invalid operations come back as an
//! unchanged snapshot with a non-`Applied` status and a message, never as an
//! error.
//!
//! Snapshots coming back in through serde are checked before use: a
//! deserialized structure always has unique ids below its `next_id`, links
//! that resolve, and no cycles.

pub mod binary_tree;
pub mod linked_list;
pub mod queue;
pub mod stack;

use std::collections::HashSet;

use algoscope_protocol::NodeId;
use thiserror::Error;

pub use binary_tree::BinaryTree;
pub use linked_list::LinkedList;
pub use queue::Queue;
pub use stack::Stack;

/// Why a deserialized snapshot was refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("node id {0} appears more than once")]
    DuplicateId(u32),
    #[error("node id {id} was never allocated (next id is {next_id})")]
    UnallocatedId { id: u32, next_id: u32 },
    #[error("link to missing node {0}")]
    MissingNode(u32),
    #[error("node {0} is linked more than once")]
    Cycle(u32),
    #[error("node {0} cannot be reached")]
    Unreachable(u32),
    #[error("node {0} has the wrong parent")]
    WrongParent(u32),
    #[error("value {value} at node {node} is out of search tree order")]
    OutOfOrder { node: u32, value: i32 },
    #[error("{len} nodes exceed the capacity of {capacity}")]
    OverCapacity { len: usize, capacity: usize },
}

/// Every id must be unique and below `next_id`.
fn check_ids(ids: impl Iterator<Item = NodeId>, next_id: u32) -> Result<(), SnapshotError> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.0 >= next_id {
            return Err(SnapshotError::UnallocatedId { id: id.0, next_id });
        }
        if !seen.insert(id) {
            return Err(SnapshotError::DuplicateId(id.0));
        }
    }
    Ok(())
}

fn check_capacity(len: usize, capacity: Option<usize>) -> Result<(), SnapshotError> {
    match capacity {
        Some(capacity) if len > capacity => Err(SnapshotError::OverCapacity { len, capacity }),
        _ => Ok(()),
    }
}

/// Hand out `next_id` and advance it. `None` once the id space is spent.
fn allocate(next_id: &mut u32) -> Option<NodeId> {
    let id = *next_id;
    *next_id = id.checked_add(1)?;
    Some(NodeId(id))
}

const IDS_EXHAUSTED: &str = "No node ids left in this structure";
