use std::cmp::Ordering;

use algoscope_protocol::{Element, SortStep};

use super::Recorder;

/// Top-down merge sort.
///
/// Merges happen in place: when the right run's head is smaller it is moved
/// in front of the left run's head, so snapshots never hold a duplicated or
/// missing value. The left head wins ties, keeping the sort stable.
pub fn generate_steps(input: &[Element]) -> Vec<SortStep> {
    let mut rec = Recorder::new(input);
    let n = rec.len();
    if n > 1 {
        sort_range(&mut rec, 0, n - 1);
    }
    rec.finish()
}

fn sort_range(rec: &mut Recorder, low: usize, high: usize) {
    if low >= high {
        return;
    }
    let mid = low + (high - low) / 2;
    sort_range(rec, low, mid);
    sort_range(rec, mid + 1, high);
    merge(rec, low, mid, high);
}

fn merge(rec: &mut Recorder, low: usize, mid: usize, high: usize) {
    rec.merge(low, mid, high);

    // Left run is `left..=left_end`, right run is `right..=high`.
    let mut left = low;
    let mut left_end = mid;
    let mut right = mid + 1;
    while left <= left_end && right <= high {
        if rec.compare(left, right) == Ordering::Greater {
            rec.move_to(right, left);
            left_end += 1;
            right += 1;
        }
        left += 1;
    }
}
