use algoscope_protocol::{Element, SearchState, SearchStep};

use super::Recorder;

/// Linear search from the left; stops at the first match.
pub fn generate_steps(input: &[Element], target: i32) -> Vec<SearchStep> {
    let mut rec = Recorder::new(input, target);
    let n = rec.len();

    for i in 0..n {
        let mut states = vec![SearchState::Default; n];
        states[..i].fill(SearchState::Eliminated);
        states[i] = SearchState::Checking;
        if rec.check(i, None, states) {
            return rec.found(i, None);
        }
    }

    rec.not_found()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::elements_from_values;
    use algoscope_protocol::SearchEvent;

    #[test]
    fn finds_first_occurrence() {
        let steps = generate_steps(&elements_from_values(&[4, 7, 1, 7]), 7);
        let last = steps.last().map(|s| s.meta);
        assert_eq!(last.map(|m| m.current), Some(1));
        assert_eq!(last.map(|m| m.found), Some(true));
        assert_eq!(last.map(|m| m.comparisons), Some(2));
        assert_eq!(
            steps.last().and_then(|s| s.state(1)),
            Some(SearchState::Found)
        );
    }

    #[test]
    fn missing_target_ends_past_the_end() {
        let steps = generate_steps(&elements_from_values(&[4, 7, 1]), 9);
        let last = steps.last().map(|s| s.meta);
        assert_eq!(last.map(|m| m.current), Some(3));
        assert_eq!(last.map(|m| m.found), Some(false));
        assert_eq!(last.map(|m| m.event), Some(SearchEvent::NotFound));
        assert!(steps.last().is_some_and(|s| s.is_resolved()));
    }

    #[test]
    fn checked_elements_are_eliminated() {
        let steps = generate_steps(&elements_from_values(&[1, 2, 3]), 3);
        let third_check = &steps[3];
        assert_eq!(
            third_check.states,
            vec![
                SearchState::Eliminated,
                SearchState::Eliminated,
                SearchState::Checking
            ]
        );
    }

    #[test]
    fn empty_input_is_one_step() {
        let steps = generate_steps(&[], 5);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].meta.current, 0);
        assert!(!steps[0].meta.found);
    }
}
