use std::str::FromStr;

use algoscope_protocol::Element;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Trace;
use crate::search::{self, SearchError};
use crate::sort;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown algorithm `{0}`")]
pub struct AlgorithmParseError(pub String);

/// Every algorithm that produces an array trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    BubbleSort,
    SelectionSort,
    InsertionSort,
    MergeSort,
    QuickSort,
    HeapSort,
    LinearSearch,
    BinarySearch,
}

impl Algorithm {
    pub const ALL: [Algorithm; 8] = [
        Self::BubbleSort,
        Self::SelectionSort,
        Self::InsertionSort,
        Self::MergeSort,
        Self::QuickSort,
        Self::HeapSort,
        Self::LinearSearch,
        Self::BinarySearch,
    ];

    /// Identifier used on the command line and across the WASM boundary.
    pub fn slug(self) -> &'static str {
        match self {
            Self::BubbleSort => "bubble",
            Self::SelectionSort => "selection",
            Self::InsertionSort => "insertion",
            Self::MergeSort => "merge",
            Self::QuickSort => "quick",
            Self::HeapSort => "heap",
            Self::LinearSearch => "linear-search",
            Self::BinarySearch => "binary-search",
        }
    }

    pub fn is_search(self) -> bool {
        matches!(self, Self::LinearSearch | Self::BinarySearch)
    }

    /// Whether the algorithm needs ascending input.
    pub fn needs_sorted_input(self) -> bool {
        self == Self::BinarySearch
    }

    /// Generate the full trace. `target` is only read by searches.
    pub fn trace(self, input: &[Element], target: i32) -> Result<Trace, SearchError> {
        let trace = match self {
            Self::BubbleSort => Trace::Sort(sort::bubble::generate_steps(input)),
            Self::SelectionSort => Trace::Sort(sort::selection::generate_steps(input)),
            Self::InsertionSort => Trace::Sort(sort::insertion::generate_steps(input)),
            Self::MergeSort => Trace::Sort(sort::merge::generate_steps(input)),
            Self::QuickSort => Trace::Sort(sort::quick::generate_steps(input)),
            Self::HeapSort => Trace::Sort(sort::heap::generate_steps(input)),
            Self::LinearSearch => Trace::Search(search::linear::generate_steps(input, target)),
            Self::BinarySearch => {
                search::check_sorted(input)?;
                Trace::Search(search::binary::generate_steps(input, target))
            }
        };
        log::debug!(
            "{self}: {} elements -> {} steps",
            input.len(),
            trace.len()
        );
        Ok(trace)
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BubbleSort => write!(f, "Bubble Sort"),
            Self::SelectionSort => write!(f, "Selection Sort"),
            Self::InsertionSort => write!(f, "Insertion Sort"),
            Self::MergeSort => write!(f, "Merge Sort"),
            Self::QuickSort => write!(f, "Quick Sort"),
            Self::HeapSort => write!(f, "Heap Sort"),
            Self::LinearSearch => write!(f, "Linear Search"),
            Self::BinarySearch => write!(f, "Binary Search"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = AlgorithmParseError;

    /// Accepts the slug, with or without a `-sort` suffix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let name = name.strip_suffix("-sort").unwrap_or(&name);
        Self::ALL
            .into_iter()
            .find(|a| a.slug() == name)
            .ok_or_else(|| AlgorithmParseError(s.to_string()))
    }
}
