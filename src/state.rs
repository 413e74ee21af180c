//! Gesture state machine of the edit session.
//!
//! ```text
//!            start (pencil/eraser)          end / cancel
//!   ┌──────┐ ─────────────────────► ┌───────────┐ ─────────► Idle
//!   │      │                        │ Stroking  │ ◄─┐ move: paint
//!   │ Idle │                        └───────────┘ ──┘
//!   │      │ start (line/rectangle) ┌───────────┐ end: commit
//!   │      │ ─────────────────────► │ Shaping   │ ─────────► Idle
//!   └──────┘                        └───────────┘ cancel: drop
//!     ▲  │ start (fill/eyedropper)        ▲  │ move: track
//!     └──┘ edit immediately               └──┘
//! ```
//!
//! Anchor data only exists while a shape is being dragged, so a pencil
//! stroke can never carry a stale anchor.

use crate::grid::CellPos;
use crate::raster::Shape;

/// What a free-hand stroke writes into each visited cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeMode {
    Paint,
    Erase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorState {
    /// No gesture in progress
    #[default]
    Idle,
    /// Pencil or eraser held down
    Stroking { mode: StrokeMode, last: CellPos },
    /// Line or rectangle being dragged; nothing is written until commit
    Shaping {
        shape: Shape,
        anchor: CellPos,
        last: CellPos,
    },
}

impl EditorState {
    pub fn is_idle(&self) -> bool {
        matches!(self, EditorState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        !self.is_idle()
    }

    /// Start cell of the shape being dragged
    pub fn anchor(&self) -> Option<CellPos> {
        match self {
            EditorState::Shaping { anchor, .. } => Some(*anchor),
            _ => None,
        }
    }

    /// Most recent in-bounds cell of the current drag
    pub fn last_cell(&self) -> Option<CellPos> {
        match self {
            EditorState::Idle => None,
            EditorState::Stroking { last, .. } | EditorState::Shaping { last, .. } => Some(*last),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EditorState::Idle => "Idle",
            EditorState::Stroking { .. } => "Stroking",
            EditorState::Shaping { .. } => "Shaping",
        }
    }
}
