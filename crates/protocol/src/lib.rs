pub mod commands;
pub mod element;
pub mod shared;
pub mod step;
pub mod structure;
pub mod theme;
pub mod types;

pub use commands::RenderCommand;
pub use element::{Element, ElementId, ElementState, SearchState, SortState};
pub use shared::{Arrangement, SharedStr};
pub use step::{
    Bounds, Counters, SearchEvent, SearchMeta, SearchStep, SortEvent, SortMeta, SortStep, Step,
};
pub use structure::{ListNode, Node, NodeId, NodeState, OpStatus, Outcome, TreeNode};
pub use theme::ThemeToken;
pub use types::{Rect, Viewport};
