use algoscope_core::input::elements_from_values;
use algoscope_core::search::{binary, linear};
use algoscope_core::sort::{bubble, heap, insertion, merge, quick, selection};
use algoscope_core::structures::{BinaryTree, LinkedList, Queue, Stack};
use algoscope_protocol::{Element, ElementId, NodeState, SearchState, SortState, SortStep};
use proptest::prelude::*;

type SortFn = fn(&[Element]) -> Vec<SortStep>;

const SORTS: [(&str, SortFn); 6] = [
    ("bubble", bubble::generate_steps),
    ("selection", selection::generate_steps),
    ("insertion", insertion::generate_steps),
    ("merge", merge::generate_steps),
    ("quick", quick::generate_steps),
    ("heap", heap::generate_steps),
];

const STABLE_SORTS: [SortFn; 3] = [
    bubble::generate_steps,
    insertion::generate_steps,
    merge::generate_steps,
];

fn sorted_multiset(values: impl Iterator<Item = i32>) -> Vec<i32> {
    let mut v: Vec<i32> = values.collect();
    v.sort_unstable();
    v
}

/// `ceil(log2(n)) + 1`, the most probes a binary search may make.
fn binary_probe_bound(n: usize) -> u32 {
    if n == 0 {
        0
    } else {
        n.next_power_of_two().trailing_zeros() + 1
    }
}

proptest! {
    #[test]
    fn sorts_end_sorted_and_resolved(values in prop::collection::vec(-50i32..50, 0..=20)) {
        let input = elements_from_values(&values);
        let mut expected = values.clone();
        expected.sort_unstable();

        for (name, sort) in SORTS {
            let steps = sort(&input);
            prop_assert!(!steps.is_empty(), "{} produced no steps", name);
            let first = &steps[0];
            prop_assert_eq!(first.values().collect::<Vec<_>>(), values.clone());
            prop_assert!(first.states.iter().all(|s| *s == SortState::Default));
            let last = &steps[steps.len() - 1];
            prop_assert_eq!(last.values().collect::<Vec<_>>(), expected.clone(), "{}", name);
            prop_assert!(last.is_resolved(), "{} left elements unresolved", name);
        }
    }

    #[test]
    fn every_step_keeps_the_multiset(values in prop::collection::vec(0i32..10, 0..=20)) {
        let input = elements_from_values(&values);
        let expected = sorted_multiset(values.iter().copied());
        for (name, sort) in SORTS {
            for (i, step) in sort(&input).iter().enumerate() {
                prop_assert_eq!(step.states.len(), step.len());
                prop_assert_eq!(
                    sorted_multiset(step.values()),
                    expected.clone(),
                    "{} step {}", name, i
                );
            }
        }
    }

    #[test]
    fn counters_never_decrease(values in prop::collection::vec(0i32..30, 0..=16)) {
        let input = elements_from_values(&values);
        for (_, sort) in SORTS {
            let steps = sort(&input);
            for pair in steps.windows(2) {
                let (a, b) = (pair[0].meta.counters, pair[1].meta.counters);
                prop_assert!(b.comparisons >= a.comparisons);
                prop_assert!(b.swaps >= a.swaps);
                prop_assert!(b.writes >= a.writes);
                prop_assert_eq!(pair[1].meta.swapped, b.swaps == a.swaps + 1);
            }
        }
    }

    #[test]
    fn stable_sorts_keep_equal_values_in_order(values in prop::collection::vec(0i32..4, 0..=20)) {
        let input = elements_from_values(&values);
        for sort in STABLE_SORTS {
            let steps = sort(&input);
            let last = &steps[steps.len() - 1];
            for pair in last.elements.windows(2) {
                if pair[0].value == pair[1].value {
                    prop_assert!(pair[0].id.0 < pair[1].id.0);
                }
            }
        }
    }

    #[test]
    fn generation_is_deterministic_and_ignores_ids(
        values in prop::collection::vec(0i32..100, 0..=12),
    ) {
        let input = elements_from_values(&values);
        let renumbered: Vec<Element> = input
            .iter()
            .map(|e| Element::new(ElementId(e.id.0 + 1000), e.value))
            .collect();
        for (_, sort) in SORTS {
            let a = sort(&input);
            prop_assert_eq!(&a, &sort(&input));
            let b = sort(&renumbered);
            prop_assert_eq!(a.len(), b.len());
            for (x, y) in a.iter().zip(&b) {
                prop_assert_eq!(x.values().collect::<Vec<_>>(), y.values().collect::<Vec<_>>());
                prop_assert_eq!(&x.states, &y.states);
                prop_assert_eq!(&x.meta, &y.meta);
            }
        }
    }

    #[test]
    fn binary_search_is_bounded_and_exact(
        mut values in prop::collection::vec(0i32..40, 0..=20),
        target in 0i32..40,
    ) {
        values.sort_unstable();
        let steps = binary::generate_steps(&elements_from_values(&values), target);
        let last = &steps[steps.len() - 1];
        prop_assert!(last.meta.comparisons <= binary_probe_bound(values.len()));
        prop_assert_eq!(last.meta.found, values.contains(&target));
        if last.meta.found {
            prop_assert_eq!(values[last.meta.current], target);
        }
        prop_assert!(last.is_resolved());
    }

    #[test]
    fn linear_search_stops_at_first_match(
        values in prop::collection::vec(0i32..10, 0..=20),
        target in 0i32..10,
    ) {
        let steps = linear::generate_steps(&elements_from_values(&values), target);
        let last = &steps[steps.len() - 1];
        match values.iter().position(|&v| v == target) {
            Some(first) => {
                prop_assert!(last.meta.found);
                prop_assert_eq!(last.meta.current, first);
                prop_assert_eq!(last.state(first), Some(SearchState::Found));
            }
            None => {
                prop_assert!(!last.meta.found);
                prop_assert_eq!(last.meta.current, values.len());
            }
        }
        prop_assert!(steps[0].states.iter().all(|s| *s == SearchState::Default));
    }

    #[test]
    fn stack_is_lifo(values in prop::collection::vec(any::<i32>(), 1..10)) {
        let mut stack = Stack::new();
        for &v in &values {
            stack = stack.push(v).state;
        }
        for &v in values.iter().rev() {
            let outcome = stack.pop();
            prop_assert_eq!(outcome.value, Some(v));
            stack = outcome.state;
        }
        prop_assert!(stack.is_empty());
    }

    #[test]
    fn bst_stays_valid_through_deletes(
        values in prop::collection::vec(0i32..8, 0..=20),
        deletes in prop::collection::vec(0i32..8, 0..10),
    ) {
        let mut tree = BinaryTree::from_values(&values);
        let mut expected = values.clone();
        for value in deletes {
            tree = tree.delete(value).state;
            if let Some(i) = expected.iter().position(|&v| v == value) {
                expected.remove(i);
            }
            prop_assert_eq!(tree.validate(), Ok(()));
        }
        expected.sort_unstable();
        prop_assert_eq!(tree.in_order(), expected);
    }

    #[test]
    fn list_snapshots_reload_unchanged(values in prop::collection::vec(any::<i32>(), 0..12)) {
        let list = values
            .iter()
            .fold(LinkedList::new(), |l, &v| l.insert_tail(v).state);
        let json = serde_json::to_string(&list).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let back: LinkedList =
            serde_json::from_str(&json).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(back.values(), values);
    }

    #[test]
    fn bst_in_order_is_sorted(values in prop::collection::vec(0i32..50, 0..=20)) {
        let tree = BinaryTree::from_values(&values);
        let mut expected = values.clone();
        expected.sort_unstable();
        prop_assert_eq!(tree.in_order(), expected);
    }
}

#[test]
fn empty_input_is_one_terminal_step() {
    for (name, sort) in SORTS {
        let steps = sort(&[]);
        assert_eq!(steps.len(), 1, "{name}");
        assert!(steps[0].is_resolved());
    }
    assert_eq!(linear::generate_steps(&[], 3).len(), 1);
    assert_eq!(binary::generate_steps(&[], 3).len(), 1);
}

#[test]
fn single_element_needs_no_comparison() {
    let input = elements_from_values(&[7]);
    for (name, sort) in SORTS {
        let steps = sort(&input);
        let last = &steps[steps.len() - 1];
        assert_eq!(last.meta.counters.comparisons, 0, "{name}");
        assert!(last.is_resolved());
    }
}

#[test]
fn stack_push_push_pop() {
    let stack = Stack::new().push(1).state.push(2).state;
    let outcome = stack.pop();
    assert_eq!(outcome.state.values(), vec![1]);
    assert_eq!(outcome.value, Some(2));
}

#[test]
fn queue_enqueue_enqueue_dequeue() {
    let queue = Queue::new().enqueue(1).state.enqueue(2).state;
    let outcome = queue.dequeue();
    assert_eq!(outcome.state.values(), vec![2]);
    assert_eq!(outcome.value, Some(1));
}

#[test]
fn bst_search_highlights_one_node() {
    let outcome = BinaryTree::from_values(&[5, 3, 8]).search(3);
    let nodes = outcome.state.nodes();
    let found: Vec<i32> = nodes
        .iter()
        .filter(|n| n.state == NodeState::Found)
        .map(|n| n.value)
        .collect();
    assert_eq!(found, vec![3]);
    assert!(
        nodes
            .iter()
            .filter(|n| n.value != 3)
            .all(|n| matches!(n.state, NodeState::Default | NodeState::Root))
    );
}
