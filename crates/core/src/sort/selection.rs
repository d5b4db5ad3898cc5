use std::cmp::Ordering;

use algoscope_protocol::{Element, SortStep};

use super::Recorder;

/// Selection sort. The running minimum is shown as the pivot marker.
pub fn generate_steps(input: &[Element]) -> Vec<SortStep> {
    let mut rec = Recorder::new(input);
    let n = rec.len();

    for i in 0..n.saturating_sub(1) {
        let mut min = i;
        rec.set_pivot(Some(min));
        for j in i + 1..n {
            if rec.compare(j, min) == Ordering::Less {
                min = j;
                rec.set_pivot(Some(min));
            }
        }
        if min != i {
            rec.swap(i, min);
        }
        rec.set_pivot(None);
        rec.resolve(i);
    }

    rec.finish()
}
