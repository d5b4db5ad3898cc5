use std::cmp::Ordering;

use algoscope_protocol::{Element, SortStep};

use super::Recorder;

/// Insertion sort.
///
/// The key travels left one slot per shift while larger elements move right,
/// so every snapshot still holds exactly the input values. Shifting stops on
/// an equal element, keeping the sort stable.
pub fn generate_steps(input: &[Element]) -> Vec<SortStep> {
    let mut rec = Recorder::new(input);
    let n = rec.len();

    for i in 1..n {
        let mut j = i;
        rec.set_pivot(Some(j));
        while j > 0 {
            if rec.compare(j - 1, j) != Ordering::Greater {
                break;
            }
            rec.shift(j - 1, j);
            j -= 1;
            rec.set_pivot(Some(j));
        }
        rec.set_pivot(None);
        rec.place(j);
    }

    rec.finish()
}
