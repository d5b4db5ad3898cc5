use std::cmp::Ordering;

use algoscope_protocol::{Element, SortStep};

use super::Recorder;

/// Quicksort with the Lomuto partition scheme and the last element as pivot.
///
/// Elements `<=` the pivot go to the left side. Swaps of an index with
/// itself are skipped rather than recorded.
pub fn generate_steps(input: &[Element]) -> Vec<SortStep> {
    let mut rec = Recorder::new(input);
    let n = rec.len();
    if n > 0 {
        sort_range(&mut rec, 0, n - 1);
    }
    rec.finish()
}

fn sort_range(rec: &mut Recorder, low: usize, high: usize) {
    if low == high {
        rec.resolve(low);
        return;
    }
    let p = partition(rec, low, high);
    if p > low {
        sort_range(rec, low, p - 1);
    }
    if p < high {
        sort_range(rec, p + 1, high);
    }
}

fn partition(rec: &mut Recorder, low: usize, high: usize) -> usize {
    rec.pivot(high, low, high);

    let mut i = low;
    for j in low..high {
        if rec.compare(j, high) != Ordering::Greater {
            if i != j {
                rec.swap(i, j);
            }
            i += 1;
        }
    }
    if i != high {
        rec.set_pivot(Some(i));
        rec.swap(i, high);
    }
    rec.resolve(i);
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::test_util::{count, final_values, input};
    use algoscope_protocol::{SortEvent, SortState};

    #[test]
    fn sorts_values() {
        let steps = generate_steps(&input(&[10, 80, 30, 90, 40, 50, 70]));
        assert_eq!(final_values(&steps), vec![10, 30, 40, 50, 70, 80, 90]);
    }

    #[test]
    fn last_element_is_first_pivot() {
        let steps = generate_steps(&input(&[3, 9, 1, 5]));
        let first_pivot = steps.iter().find_map(|s| match s.meta.event {
            SortEvent::Pivot { index, low, high } => Some((index, low, high)),
            _ => None,
        });
        assert_eq!(first_pivot, Some((3, 0, 3)));
        let pivot_step = steps.iter().find(|s| s.meta.pivot == Some(3));
        assert_eq!(pivot_step.and_then(|s| s.state(3)), Some(SortState::Pivot));
    }

    #[test]
    fn equal_to_pivot_goes_left() {
        // Pivot 2: the first 2 stays left, so the pivot lands at index 1.
        let steps = generate_steps(&input(&[2, 3, 2]));
        let first_resolve = steps.iter().find_map(|s| match s.meta.event {
            SortEvent::Resolve { index } => Some(index),
            _ => None,
        });
        assert_eq!(first_resolve, Some(1));
    }

    #[test]
    fn every_index_resolved_once() {
        let steps = generate_steps(&input(&[5, 2, 8, 1, 9, 3]));
        assert_eq!(count(&steps, |e| matches!(e, SortEvent::Resolve { .. })), 6);
    }

    #[test]
    fn self_swaps_are_skipped() {
        let steps = generate_steps(&input(&[1, 2, 3]));
        assert_eq!(count(&steps, |e| matches!(e, SortEvent::Swap { .. })), 0);
    }
}
