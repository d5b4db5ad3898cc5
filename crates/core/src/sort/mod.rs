//! Sorting step generators.
//!
//! Each generator runs the textbook algorithm against a [`Recorder`], which
//! owns the working array and appends one step per observable event. The
//! recorder is passed by `&mut` through recursive helpers, so no generator
//! closes over shared state.

pub mod bubble;
pub mod heap;
pub mod insertion;
pub mod merge;
pub mod quick;
pub mod selection;

use std::cmp::Ordering;

use algoscope_protocol::{
    Arrangement, Counters, Element, SortEvent, SortMeta, SortState, SortStep, Step,
};

/// Accumulates the steps of one sort run.
///
/// Moves go to `working`; the shared [`Arrangement`] is rebuilt lazily on the
/// next recorded step, so runs of comparisons reuse one allocation.
pub(crate) struct Recorder {
    working: Vec<Element>,
    snapshot: Arrangement,
    dirty: bool,
    resolved: Vec<bool>,
    pivot: Option<usize>,
    range: Option<(usize, usize)>,
    highlight_range: bool,
    counters: Counters,
    steps: Vec<SortStep>,
}

impl Recorder {
    /// Start a run; records step 0 with every element in its default state.
    pub(crate) fn new(input: &[Element]) -> Self {
        let mut recorder = Self {
            working: input.to_vec(),
            snapshot: Arrangement::from(input),
            dirty: false,
            resolved: vec![false; input.len()],
            pivot: None,
            range: None,
            highlight_range: false,
            counters: Counters::default(),
            steps: Vec::new(),
        };
        let message = if input.is_empty() {
            "Nothing to sort".to_string()
        } else {
            format!("Starting with {} elements", input.len())
        };
        recorder.record(SortMeta::new(SortEvent::Start, Counters::default()), &[], message);
        recorder
    }

    pub(crate) fn len(&self) -> usize {
        self.working.len()
    }

    pub(crate) fn value(&self, index: usize) -> i32 {
        self.working[index].value
    }

    /// Mark the pivot (or current minimum) shown between events.
    pub(crate) fn set_pivot(&mut self, pivot: Option<usize>) {
        self.pivot = pivot;
    }

    /// Set the active sub-range; `highlight` paints it as [`SortState::Merging`].
    fn set_range(&mut self, range: Option<(usize, usize)>, highlight: bool) {
        self.range = range;
        self.highlight_range = highlight;
    }

    /// Compare `working[left]` with `working[right]`.
    pub(crate) fn compare(&mut self, left: usize, right: usize) -> Ordering {
        self.counters.comparisons += 1;
        let (a, b) = (self.value(left), self.value(right));
        let mut meta = self.meta(SortEvent::Compare { left, right });
        meta.compared = Some((left, right));
        self.record(
            meta,
            &[(left, SortState::Comparing), (right, SortState::Comparing)],
            format!("Comparing {a} and {b}"),
        );
        a.cmp(&b)
    }

    pub(crate) fn swap(&mut self, left: usize, right: usize) {
        self.working.swap(left, right);
        self.dirty = true;
        self.counters.swaps += 1;
        let (a, b) = (self.value(right), self.value(left));
        let mut meta = self.meta(SortEvent::Swap { left, right });
        meta.swapped = true;
        self.record(
            meta,
            &[(left, SortState::Swapping), (right, SortState::Swapping)],
            format!("Swapping {a} and {b}"),
        );
    }

    /// Move the element at `from` into the adjacent slot `to`, carrying the
    /// held element at `to` back into `from`.
    pub(crate) fn shift(&mut self, from: usize, to: usize) {
        self.working.swap(from, to);
        self.dirty = true;
        self.counters.writes += 1;
        let moved = self.value(to);
        self.record(
            self.meta(SortEvent::Shift { from, to }),
            &[(to, SortState::Swapping), (from, SortState::Comparing)],
            format!("Shifting {moved} right to index {to}"),
        );
    }

    /// Move the element at `from` back to `to` (`to < from`), sliding
    /// everything in between one slot right.
    pub(crate) fn move_to(&mut self, from: usize, to: usize) {
        self.working[to..=from].rotate_right(1);
        self.dirty = true;
        self.counters.writes += 1;
        let value = self.value(to);
        self.record(
            self.meta(SortEvent::Write { index: to }),
            &[(to, SortState::Swapping)],
            format!("Writing {value} to index {to}"),
        );
    }

    /// Record that the held value now sits at `index`.
    pub(crate) fn place(&mut self, index: usize) {
        let value = self.value(index);
        self.record(
            self.meta(SortEvent::Write { index }),
            &[(index, SortState::Swapping)],
            format!("Inserting {value} at index {index}"),
        );
    }

    pub(crate) fn pivot(&mut self, index: usize, low: usize, high: usize) {
        self.pivot = Some(index);
        self.range = Some((low, high));
        self.highlight_range = false;
        let value = self.value(index);
        self.record(
            self.meta(SortEvent::Pivot { index, low, high }),
            &[],
            format!("Pivot {value} chosen for indices {low}..={high}"),
        );
    }

    pub(crate) fn merge(&mut self, low: usize, mid: usize, high: usize) {
        self.set_range(Some((low, high)), true);
        self.record(
            self.meta(SortEvent::Merge { low, mid, high }),
            &[],
            format!("Merging {low}..={mid} with {}..={high}", mid + 1),
        );
    }

    pub(crate) fn heapify(&mut self, root: usize, size: usize) {
        self.range = Some((0, size.saturating_sub(1)));
        self.highlight_range = false;
        let value = self.value(root);
        self.record(
            self.meta(SortEvent::Heapify { root, size }),
            &[(root, SortState::Pivot)],
            format!("Heapifying from {value} at index {root}"),
        );
    }

    /// Mark `index` as being in its final position.
    pub(crate) fn resolve(&mut self, index: usize) {
        self.resolved[index] = true;
        if self.pivot == Some(index) {
            self.pivot = None;
        }
        let value = self.value(index);
        self.record(
            self.meta(SortEvent::Resolve { index }),
            &[],
            format!("{value} is in its final position"),
        );
    }

    /// Resolve everything and return the trace. An empty input keeps only
    /// its first step, which is already terminal.
    pub(crate) fn finish(mut self) -> Vec<SortStep> {
        if !self.working.is_empty() {
            self.resolved.iter_mut().for_each(|r| *r = true);
            self.pivot = None;
            self.range = None;
            self.highlight_range = false;
            self.record(self.meta(SortEvent::Done), &[], "Array sorted".to_string());
        }
        log::debug!(
            "sort trace: {} elements, {} steps, {:?}",
            self.working.len(),
            self.steps.len(),
            self.counters
        );
        self.steps
    }

    fn meta(&self, event: SortEvent) -> SortMeta {
        SortMeta {
            pivot: self.pivot,
            range: self.range,
            ..SortMeta::new(event, self.counters)
        }
    }

    fn record(&mut self, meta: SortMeta, focus: &[(usize, SortState)], message: String) {
        if self.dirty {
            self.snapshot = Arrangement::from(self.working.as_slice());
            self.dirty = false;
        }

        let mut states: Vec<SortState> = self
            .resolved
            .iter()
            .map(|&done| {
                if done {
                    SortState::Sorted
                } else {
                    SortState::Default
                }
            })
            .collect();
        if self.highlight_range
            && let Some((low, high)) = self.range
        {
            for state in &mut states[low..=high] {
                if *state == SortState::Default {
                    *state = SortState::Merging;
                }
            }
        }
        if let Some(pivot) = self.pivot
            && !self.resolved[pivot]
        {
            states[pivot] = SortState::Pivot;
        }
        for &(index, state) in focus {
            states[index] = state;
        }

        self.steps.push(Step {
            elements: self.snapshot.clone(),
            states,
            meta,
            message: message.into(),
        });
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use algoscope_protocol::{Element, SortEvent, SortStep};

    use crate::input::elements_from_values;

    pub(crate) fn input(values: &[i32]) -> Vec<Element> {
        elements_from_values(values)
    }

    pub(crate) fn final_values(steps: &[SortStep]) -> Vec<i32> {
        steps.last().map(|s| s.values().collect()).unwrap_or_default()
    }

    pub(crate) fn count(steps: &[SortStep], pred: impl Fn(&SortEvent) -> bool) -> usize {
        steps.iter().filter(|s| pred(&s.meta.event)).count()
    }
}
