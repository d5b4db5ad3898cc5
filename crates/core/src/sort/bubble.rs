use std::cmp::Ordering;

use algoscope_protocol::{Element, SortStep};

use super::Recorder;

/// Bubble sort with the early exit on a pass that makes no swap.
///
/// Each pass resolves the largest remaining element at the end of the
/// unsorted region. Equal neighbours are never swapped, so the sort is stable.
pub fn generate_steps(input: &[Element]) -> Vec<SortStep> {
    let mut rec = Recorder::new(input);
    let n = rec.len();

    for pass in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..n - 1 - pass {
            if rec.compare(j, j + 1) == Ordering::Greater {
                rec.swap(j, j + 1);
                swapped = true;
            }
        }
        rec.resolve(n - 1 - pass);
        if !swapped {
            break;
        }
    }

    rec.finish()
}
