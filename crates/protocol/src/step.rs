use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementState, SearchState, SortState};
use crate::shared::{Arrangement, SharedStr};

/// One immutable snapshot of an algorithm run.
///
/// A trace is a `Vec<Step<..>>` produced in full before playback. Steps are
/// independent: each carries the complete arrangement, a state for every
/// element, and the metadata for the single event that produced it.
///
/// ```text
///   input ──▶ generator ──▶ [Step 0, Step 1, …, Step n] ──▶ playback ──▶ renderer
///                            (all Default)     (all resolved)
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step<S, M> {
    pub elements: Arrangement,
    pub states: Vec<S>,
    pub meta: M,
    /// Human-readable description of the event.
    pub message: SharedStr,
}

impl<S: ElementState, M> Step<S, M> {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = i32> + '_ {
        self.elements.values()
    }

    pub fn state(&self, index: usize) -> Option<S> {
        self.states.get(index).copied()
    }

    /// Elements paired with their state for this instant.
    pub fn iter(&self) -> impl Iterator<Item = (&Element, S)> + '_ {
        self.elements.iter().zip(self.states.iter().copied())
    }

    /// Whether every element is in a terminal state.
    pub fn is_resolved(&self) -> bool {
        self.states.iter().copied().all(ElementState::is_resolved)
    }

    /// Indices currently in the given state.
    pub fn indices_in(&self, state: S) -> Vec<usize>
    where
        S: PartialEq,
    {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == state)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Running totals carried by every sort step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub comparisons: u32,
    pub swaps: u32,
    /// Element moves that are not swaps (insertion shifts, merge writes).
    pub writes: u32,
}

/// The event a sort step records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SortEvent {
    Start,
    Compare { left: usize, right: usize },
    Swap { left: usize, right: usize },
    /// Insertion sort moved the element at `from` one slot right to `to`.
    Shift { from: usize, to: usize },
    /// A held value was written into `index` (insertion key, merge output).
    Write { index: usize },
    /// Quicksort chose the pivot for `low..=high`.
    Pivot { index: usize, low: usize, high: usize },
    /// Merge sort starts combining `low..=mid` with `mid+1..=high`.
    Merge { low: usize, mid: usize, high: usize },
    /// Heap sort sifts down from `root` within the first `size` slots.
    Heapify { root: usize, size: usize },
    /// `index` reached its final position.
    Resolve { index: usize },
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortMeta {
    pub event: SortEvent,
    pub compared: Option<(usize, usize)>,
    pub pivot: Option<usize>,
    /// Inclusive sub-range the algorithm is working on.
    pub range: Option<(usize, usize)>,
    /// True only on the step that performed a swap.
    pub swapped: bool,
    pub counters: Counters,
}

impl SortMeta {
    pub fn new(event: SortEvent, counters: Counters) -> Self {
        Self {
            event,
            compared: None,
            pivot: None,
            range: None,
            swapped: false,
            counters,
        }
    }
}

/// Window of a binary search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: usize,
    pub right: usize,
    pub mid: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SearchEvent {
    Start,
    Check { index: usize },
    Narrow { left: usize, right: usize },
    Found { index: usize },
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMeta {
    pub event: SearchEvent,
    pub target: i32,
    /// Index under inspection; equals the input length once a search fails.
    pub current: usize,
    pub bounds: Option<Bounds>,
    pub found: bool,
    pub comparisons: u32,
}

pub type SortStep = Step<SortState, SortMeta>;
pub type SearchStep = Step<SearchState, SearchMeta>;
