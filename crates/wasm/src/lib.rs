//! JSON bridge over the core crate.
//!
//! Every call is stateless: the caller keeps traces and structure snapshots
//! on its side and hands a snapshot back in for the next operation.

use algoscope_core::input::{DEFAULT_VALUE_RANGE, elements_from_values, validate_values};
use algoscope_core::model::Algorithm;
use algoscope_core::structures::{BinaryTree, LinkedList, Queue, Stack};
use algoscope_protocol::Outcome;
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

fn js_err(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(js_err)
}

/// An empty string means "start from an empty structure". Malformed
/// snapshots (broken links, cycles, reused ids) fail here.
fn load<T: DeserializeOwned + Default>(state_json: &str) -> serde_json::Result<T> {
    if state_json.trim().is_empty() {
        Ok(T::default())
    } else {
        serde_json::from_str(state_json)
    }
}

fn require(op: &str, value: Option<i32>) -> Result<i32, JsError> {
    value.ok_or_else(|| JsError::new(&format!("{op} requires a value")))
}

fn unknown(op: &str) -> JsError {
    JsError::new(&format!("unknown operation: {op}"))
}

/// Generate the full trace for `algorithm` over a JSON array of values.
///
/// `target` is ignored by the sorts.
#[wasm_bindgen]
pub fn generate_trace(algorithm: &str, values_json: &str, target: i32) -> Result<String, JsError> {
    let algorithm: Algorithm = algorithm.parse().map_err(js_err)?;
    let values: Vec<i32> = serde_json::from_str(values_json).map_err(js_err)?;
    validate_values(&values, &DEFAULT_VALUE_RANGE).map_err(js_err)?;
    let trace = algorithm
        .trace(&elements_from_values(&values), target)
        .map_err(js_err)?;
    to_json(&trace)
}

/// Slugs accepted by [`generate_trace`], as a JSON array.
#[wasm_bindgen]
pub fn algorithms() -> Result<String, JsError> {
    let slugs: Vec<&str> = Algorithm::ALL.iter().map(|a| a.slug()).collect();
    to_json(&slugs)
}

fn apply_stack(stack: &Stack, op: &str, value: Option<i32>) -> Result<Outcome<Stack>, JsError> {
    Ok(match op {
        "push" => stack.push(require(op, value)?),
        "pop" => stack.pop(),
        "peek" => stack.peek(),
        "clear" => stack.clear(),
        _ => return Err(unknown(op)),
    })
}

fn apply_queue(queue: &Queue, op: &str, value: Option<i32>) -> Result<Outcome<Queue>, JsError> {
    Ok(match op {
        "enqueue" => queue.enqueue(require(op, value)?),
        "dequeue" => queue.dequeue(),
        "peek" => queue.peek(),
        "clear" => queue.clear(),
        _ => return Err(unknown(op)),
    })
}

fn apply_list(
    list: &LinkedList,
    op: &str,
    value: Option<i32>,
) -> Result<Outcome<LinkedList>, JsError> {
    Ok(match op {
        "insert-head" => list.insert_head(require(op, value)?),
        "insert-tail" => list.insert_tail(require(op, value)?),
        "delete" => list.delete(require(op, value)?),
        "search" => list.search(require(op, value)?),
        "clear" => list.clear(),
        _ => return Err(unknown(op)),
    })
}

fn apply_tree(
    tree: &BinaryTree,
    op: &str,
    value: Option<i32>,
) -> Result<Outcome<BinaryTree>, JsError> {
    Ok(match op {
        "insert" => tree.insert(require(op, value)?),
        "search" => tree.search(require(op, value)?),
        "delete" => tree.delete(require(op, value)?),
        "clear" => tree.clear(),
        _ => return Err(unknown(op)),
    })
}

/// `push`, `pop`, `peek` or `clear` on a stack snapshot.
#[wasm_bindgen]
pub fn stack_apply(state_json: &str, op: &str, value: Option<i32>) -> Result<String, JsError> {
    let stack: Stack = load(state_json).map_err(js_err)?;
    to_json(&apply_stack(&stack, op, value)?)
}

/// `enqueue`, `dequeue`, `peek` or `clear` on a queue snapshot.
#[wasm_bindgen]
pub fn queue_apply(state_json: &str, op: &str, value: Option<i32>) -> Result<String, JsError> {
    let queue: Queue = load(state_json).map_err(js_err)?;
    to_json(&apply_queue(&queue, op, value)?)
}

/// `insert-head`, `insert-tail`, `delete`, `search` or `clear` on a list.
#[wasm_bindgen]
pub fn list_apply(state_json: &str, op: &str, value: Option<i32>) -> Result<String, JsError> {
    let list: LinkedList = load(state_json).map_err(js_err)?;
    to_json(&apply_list(&list, op, value)?)
}

/// `insert`, `search`, `delete` or `clear` on a binary search tree.
#[wasm_bindgen]
pub fn tree_apply(state_json: &str, op: &str, value: Option<i32>) -> Result<String, JsError> {
    let tree: BinaryTree = load(state_json).map_err(js_err)?;
    to_json(&apply_tree(&tree, op, value)?)
}

/// In-, pre- and post-order values of a tree snapshot.
#[wasm_bindgen]
pub fn tree_traversals(state_json: &str) -> Result<String, JsError> {
    #[derive(Serialize)]
    struct Traversals {
        in_order: Vec<i32>,
        pre_order: Vec<i32>,
        post_order: Vec<i32>,
    }

    let tree: BinaryTree = load(state_json).map_err(js_err)?;
    to_json(&Traversals {
        in_order: tree.in_order(),
        pre_order: tree.pre_order(),
        post_order: tree.post_order(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoscope_protocol::OpStatus;

    // Avoids needing `Debug` on `JsError`.
    fn ok<T>(result: Result<T, JsError>) -> T {
        match result {
            Ok(value) => value,
            Err(_) => panic!("bridge call failed"),
        }
    }

    #[test]
    fn stack_ops_chain_through_snapshots() {
        let pushed = ok(apply_stack(&Stack::new(), "push", Some(1)));
        let pushed = ok(apply_stack(&pushed.state, "push", Some(2)));
        let popped = ok(apply_stack(&pushed.state, "pop", None));
        assert_eq!(popped.state.values(), vec![1]);
        assert_eq!(popped.value, Some(2));
    }

    #[test]
    fn empty_queue_dequeue_is_rejected_not_an_error() {
        let outcome = ok(apply_queue(&Queue::new(), "dequeue", None));
        assert_eq!(outcome.status, OpStatus::Empty);
    }

    #[test]
    fn tree_snapshot_survives_json() {
        let tree = BinaryTree::from_values(&[5, 3, 8]);
        let json = serde_json::to_string(&tree).unwrap();
        let back: BinaryTree = load(&json).unwrap();
        assert_eq!(back.in_order(), vec![3, 5, 8]);
        let found = ok(apply_tree(&back, "search", Some(3)));
        assert!(found.is_applied());
    }

    #[test]
    fn list_insert_and_delete() {
        let list: LinkedList = load("").unwrap();
        let list = ok(apply_list(&list, "insert-tail", Some(4))).state;
        let list = ok(apply_list(&list, "insert-head", Some(2))).state;
        assert_eq!(list.values(), vec![2, 4]);
        let outcome = ok(apply_list(&list, "delete", Some(9)));
        assert_eq!(outcome.status, OpStatus::Missing);
        assert_eq!(outcome.state.values(), vec![2, 4]);
    }

    #[test]
    fn malformed_snapshots_do_not_load() {
        let looped = serde_json::json!({
            "nodes": [{"id": 0, "value": 1, "state": "default", "next": 0}],
            "head": 0,
            "next_id": 1
        });
        assert!(load::<LinkedList>(&looped.to_string()).is_err());
        let reused = serde_json::json!({
            "nodes": [{"id": 0, "value": 1, "state": "default"}],
            "next_id": 0,
            "capacity": null
        })
        .to_string();
        assert!(load::<Stack>(&reused).is_err());
        assert!(load::<Queue>(&reused).is_err());
        let cyclic = serde_json::json!({
            "nodes": [
                {"id": 0, "value": 5, "state": "default", "left": 1, "right": null,
                 "parent": null, "level": 0, "column": 1},
                {"id": 1, "value": 3, "state": "default", "left": 0, "right": null,
                 "parent": 0, "level": 1, "column": 0}
            ],
            "root": 0,
            "next_id": 2
        });
        assert!(load::<BinaryTree>(&cyclic.to_string()).is_err());
    }
}
