use serde::{Deserialize, Serialize};

use crate::element::{SearchState, SortState};

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    BarDefault,
    BarComparing,
    BarSwapping,
    BarPivot,
    BarActiveRange,
    BarResolved,
    BarFound,
    BarNotFound,
    BarEliminated,

    TextPrimary,
    TextSecondary,
    TextMuted,

    Background,
    StatusBar,
}

impl From<SortState> for ThemeToken {
    fn from(state: SortState) -> Self {
        match state {
            SortState::Default => Self::BarDefault,
            SortState::Comparing => Self::BarComparing,
            SortState::Swapping => Self::BarSwapping,
            SortState::Pivot => Self::BarPivot,
            SortState::Merging => Self::BarActiveRange,
            SortState::Sorted => Self::BarResolved,
        }
    }
}

impl From<SearchState> for ThemeToken {
    fn from(state: SearchState) -> Self {
        match state {
            SearchState::Default => Self::BarDefault,
            SearchState::Checking => Self::BarComparing,
            SearchState::Eliminated => Self::BarEliminated,
            SearchState::Found => Self::BarFound,
            SearchState::NotFound => Self::BarNotFound,
        }
    }
}
