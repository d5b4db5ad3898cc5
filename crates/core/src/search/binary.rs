use algoscope_protocol::{Bounds, Element, SearchEvent, SearchState, SearchStep};

use super::Recorder;

/// Binary search over ascending input with `mid = (left + right) / 2`.
///
/// Each probe is one comparison step; each window change that leaves a
/// non-empty window is one narrowing step. Unsorted input still yields a
/// finite trace, but the result is meaningless; see [`super::check_sorted`].
pub fn generate_steps(input: &[Element], target: i32) -> Vec<SearchStep> {
    let mut rec = Recorder::new(input, target);
    let n = rec.len();
    if n == 0 {
        return rec.finish();
    }

    let (mut left, mut right) = (0usize, n - 1);
    loop {
        let mid = left + (right - left) / 2;
        let bounds = Bounds {
            left,
            right,
            mid: Some(mid),
        };
        let mut states = window_states(n, left, right);
        states[mid] = SearchState::Checking;
        if rec.check(mid, Some(bounds), states) {
            return rec.found(mid, Some(bounds));
        }

        if rec.value(mid) < target {
            left = mid + 1;
        } else if mid == 0 {
            break;
        } else {
            right = mid - 1;
        }
        if left > right {
            break;
        }

        let message = format!("Narrowing the window to {left}..={right}");
        rec.record(
            SearchEvent::Narrow { left, right },
            mid,
            Some(Bounds {
                left,
                right,
                mid: None,
            }),
            false,
            window_states(n, left, right),
            message,
        );
    }

    rec.not_found()
}

fn window_states(n: usize, left: usize, right: usize) -> Vec<SearchState> {
    (0..n)
        .map(|i| {
            if (left..=right).contains(&i) {
                SearchState::Default
            } else {
                SearchState::Eliminated
            }
        })
        .collect()
}
