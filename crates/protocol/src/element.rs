use serde::{Deserialize, Serialize};

/// Stable identity of an element, assigned once when the input is built.
///
/// Generators carry ids along unchanged; they exist so a renderer can follow
/// an element as it moves and play no part in any algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u32);

/// A single value in an array trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub value: i32,
}

impl Element {
    pub fn new(id: ElementId, value: i32) -> Self {
        Self { id, value }
    }
}

/// Per-element display state used by a family of algorithms.
pub trait ElementState: Copy + Default {
    /// Whether this state is terminal: no later step can change it.
    fn is_resolved(self) -> bool;
}

/// Display state of an element during a sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortState {
    #[default]
    Default,
    Comparing,
    Swapping,
    Pivot,
    /// Inside the sub-range currently being merged or heapified.
    Merging,
    Sorted,
}

impl ElementState for SortState {
    fn is_resolved(self) -> bool {
        self == Self::Sorted
    }
}

/// Display state of an element during a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchState {
    #[default]
    Default,
    Checking,
    /// Ruled out: already visited, or outside the remaining bounds.
    Eliminated,
    Found,
    NotFound,
}

impl ElementState for SearchState {
    fn is_resolved(self) -> bool {
        matches!(self, Self::Found | Self::NotFound)
    }
}
