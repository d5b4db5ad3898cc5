use std::cmp::Ordering;

use algoscope_protocol::{Element, SortStep};

use super::Recorder;

/// Heap sort over an array-embedded max-heap.
///
/// Children of `i` live at `2i + 1` and `2i + 2`. After the heap is built,
/// the root is swapped to the end of the shrinking heap and resolved.
pub fn generate_steps(input: &[Element]) -> Vec<SortStep> {
    let mut rec = Recorder::new(input);
    let n = rec.len();

    for root in (0..n / 2).rev() {
        sift_down(&mut rec, root, n);
    }

    for end in (1..n).rev() {
        rec.swap(0, end);
        rec.resolve(end);
        sift_down(&mut rec, 0, end);
    }
    if n > 0 {
        rec.resolve(0);
    }

    rec.finish()
}

fn sift_down(rec: &mut Recorder, root: usize, size: usize) {
    rec.heapify(root, size);

    let mut largest = root;
    for child in [2 * root + 1, 2 * root + 2] {
        if child < size && rec.compare(child, largest) == Ordering::Greater {
            largest = child;
        }
    }
    if largest != root {
        rec.swap(root, largest);
        sift_down(rec, largest, size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::test_util::{count, final_values, input};
    use algoscope_protocol::SortEvent;

    #[test]
    fn sorts_values() {
        let steps = generate_steps(&input(&[12, 11, 13, 5, 6, 7]));
        assert_eq!(final_values(&steps), vec![5, 6, 7, 11, 12, 13]);
    }

    #[test]
    fn builds_max_heap_first() {
        let steps = generate_steps(&input(&[1, 5, 3, 9]));
        // The first extraction swaps the maximum out of the root.
        let first_extract = steps
            .iter()
            .position(|s| matches!(s.meta.event, SortEvent::Swap { left: 0, right: 3 }));
        let heap = first_extract
            .and_then(|i| steps.get(i - 1))
            .map(|s| s.values().collect::<Vec<_>>());
        assert_eq!(heap.as_ref().map(|h| h[0]), Some(9));
    }

    #[test]
    fn swaps_are_counted_explicitly() {
        let steps = generate_steps(&input(&[3, 1, 2]));
        let swaps = count(&steps, |e| matches!(e, SortEvent::Swap { .. }));
        let flagged = steps.iter().filter(|s| s.meta.swapped).count();
        assert_eq!(swaps, flagged);
        assert_eq!(
            steps.last().map(|s| s.meta.counters.swaps as usize),
            Some(swaps)
        );
    }

    #[test]
    fn single_element_resolves_immediately() {
        let steps = generate_steps(&input(&[42]));
        assert_eq!(steps.len(), 3);
        assert!(matches!(steps[1].meta.event, SortEvent::Resolve { index: 0 }));
        assert!(steps[2].is_resolved());
    }
}
