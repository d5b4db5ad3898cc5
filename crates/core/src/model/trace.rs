use algoscope_protocol::{RenderCommand, SearchStep, SharedStr, SortStep, Viewport};
use serde::{Deserialize, Serialize};

use crate::views::bars;

/// A finished step sequence of either family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", content = "steps", rename_all = "kebab-case")]
pub enum Trace {
    Sort(Vec<SortStep>),
    Search(Vec<SearchStep>),
}

impl Trace {
    pub fn len(&self) -> usize {
        match self {
            Self::Sort(steps) => steps.len(),
            Self::Search(steps) => steps.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn message(&self, index: usize) -> Option<&SharedStr> {
        match self {
            Self::Sort(steps) => steps.get(index).map(|s| &s.message),
            Self::Search(steps) => steps.get(index).map(|s| &s.message),
        }
    }

    pub fn values(&self, index: usize) -> Option<Vec<i32>> {
        match self {
            Self::Sort(steps) => steps.get(index).map(|s| s.values().collect()),
            Self::Search(steps) => steps.get(index).map(|s| s.values().collect()),
        }
    }

    /// One-line counters for a status bar.
    pub fn summary(&self, index: usize) -> Option<String> {
        match self {
            Self::Sort(steps) => steps.get(index).map(|s| {
                let c = s.meta.counters;
                format!(
                    "comparisons {} | swaps {} | writes {}",
                    c.comparisons, c.swaps, c.writes
                )
            }),
            Self::Search(steps) => steps.get(index).map(|s| {
                format!(
                    "target {} | comparisons {}",
                    s.meta.target, s.meta.comparisons
                )
            }),
        }
    }

    pub fn render(&self, index: usize, viewport: &Viewport) -> Vec<RenderCommand> {
        match self {
            Self::Sort(steps) => steps
                .get(index)
                .map(|s| bars::render_bars(s, viewport))
                .unwrap_or_default(),
            Self::Search(steps) => steps
                .get(index)
                .map(|s| bars::render_bars(s, viewport))
                .unwrap_or_default(),
        }
    }
}
