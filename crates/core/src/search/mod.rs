//! Searching step generators.

pub mod binary;
pub mod linear;

use algoscope_protocol::{
    Arrangement, Bounds, Element, SearchEvent, SearchMeta, SearchState, SearchStep, Step,
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("binary search needs ascending input; index {index} breaks the order")]
    Unsorted { index: usize },
}

/// Returns an error naming the first element smaller than its predecessor.
pub fn check_sorted(input: &[Element]) -> Result<(), SearchError> {
    match input.windows(2).position(|w| w[0].value > w[1].value) {
        Some(i) => Err(SearchError::Unsorted { index: i + 1 }),
        None => Ok(()),
    }
}

/// Searches never move elements, so every step shares one arrangement.
struct Recorder {
    elements: Arrangement,
    target: i32,
    comparisons: u32,
    steps: Vec<SearchStep>,
}

impl Recorder {
    fn new(input: &[Element], target: i32) -> Self {
        let mut recorder = Self {
            elements: Arrangement::from(input),
            target,
            comparisons: 0,
            steps: Vec::new(),
        };
        let states = vec![SearchState::Default; input.len()];
        let message = if input.is_empty() {
            format!("Nothing to search for {target}")
        } else {
            format!("Searching for {target}")
        };
        recorder.record(SearchEvent::Start, 0, None, false, states, message);
        recorder
    }

    fn len(&self) -> usize {
        self.elements.len()
    }

    fn value(&self, index: usize) -> i32 {
        self.elements[index].value
    }

    /// Record a comparison of `index` against the target.
    fn check(&mut self, index: usize, bounds: Option<Bounds>, states: Vec<SearchState>) -> bool {
        self.comparisons += 1;
        let value = self.value(index);
        let message = format!("Checking index {index}: {value} vs {}", self.target);
        self.record(
            SearchEvent::Check { index },
            index,
            bounds,
            false,
            states,
            message,
        );
        value == self.target
    }

    fn found(mut self, index: usize, bounds: Option<Bounds>) -> Vec<SearchStep> {
        let mut states = vec![SearchState::NotFound; self.len()];
        states[index] = SearchState::Found;
        let message = format!("Found {} at index {index}", self.target);
        self.record(
            SearchEvent::Found { index },
            index,
            bounds,
            true,
            states,
            message,
        );
        self.finish()
    }

    /// Terminal failure; `current` moves past the end.
    fn not_found(mut self) -> Vec<SearchStep> {
        if self.len() > 0 {
            let states = vec![SearchState::NotFound; self.len()];
            let message = format!("{} is not in the array", self.target);
            self.record(
                SearchEvent::NotFound,
                self.len(),
                None,
                false,
                states,
                message,
            );
        }
        self.finish()
    }

    fn finish(self) -> Vec<SearchStep> {
        log::debug!(
            "search trace: target {}, {} elements, {} steps, {} comparisons",
            self.target,
            self.elements.len(),
            self.steps.len(),
            self.comparisons
        );
        self.steps
    }

    fn record(
        &mut self,
        event: SearchEvent,
        current: usize,
        bounds: Option<Bounds>,
        found: bool,
        states: Vec<SearchState>,
        message: String,
    ) {
        self.steps.push(Step {
            elements: self.elements.clone(),
            states,
            meta: SearchMeta {
                event,
                target: self.target,
                current,
                bounds,
                found,
                comparisons: self.comparisons,
            },
            message: message.into(),
        });
    }
}
