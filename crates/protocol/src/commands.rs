use serde::{Deserialize, Serialize};

use crate::element::ElementId;
use crate::shared::SharedStr;
use crate::theme::ThemeToken;
use crate::types::Rect;

/// A single, stateless render instruction.
///
/// The core emits a `Vec<RenderCommand>` for each step. Renderers consume
/// this list sequentially; each command carries all the data it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Draw a filled rectangle, optionally labelled and tied to the element
    /// it represents.
    DrawRect {
        rect: Rect,
        color: ThemeToken,
        label: Option<SharedStr>,
        element_id: Option<ElementId>,
    },

    /// Begin a logical group. Renderers may use this for layer separation.
    BeginGroup {
        id: SharedStr,
        label: Option<SharedStr>,
    },

    /// End the current group.
    EndGroup,
}
