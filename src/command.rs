use egui::Color32;

use crate::document::Document;
use crate::error::EditResult;
use crate::grid::CellPos;
use crate::layer::LayerId;

/// A pixel mutation produced by a tool, applied to the document in one step.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Paint or erase a single cell (pencil, eraser)
    SetCell {
        layer_id: LayerId,
        pos: CellPos,
        color: Option<Color32>,
    },
    /// Region fill from a start cell (bucket)
    FloodFill {
        layer_id: LayerId,
        start: CellPos,
        color: Option<Color32>,
    },
    /// Paint a rasterized shape as one batch
    PaintCells {
        layer_id: LayerId,
        cells: Vec<CellPos>,
        color: Option<Color32>,
    },
    /// Empty every cell of a layer
    ClearLayer { layer_id: LayerId },
}

impl Command {
    /// Target layer of the command
    pub fn layer_id(&self) -> LayerId {
        match self {
            Command::SetCell { layer_id, .. }
            | Command::FloodFill { layer_id, .. }
            | Command::PaintCells { layer_id, .. }
            | Command::ClearLayer { layer_id } => *layer_id,
        }
    }

    /// Applies the command. Returns the number of cells that changed.
    ///
    /// On error nothing has been written.
    pub fn execute(&self, document: &mut Document) -> EditResult<usize> {
        match self {
            Command::SetCell { layer_id, pos, color } => {
                let changed = document.set_cell(*layer_id, *pos, *color)?;
                Ok(usize::from(changed))
            }
            Command::FloodFill { layer_id, start, color } => document.flood_fill(*layer_id, *start, *color),
            Command::PaintCells { layer_id, cells, color } => document.paint_cells(*layer_id, cells, *color),
            Command::ClearLayer { layer_id } => {
                let before = document.layer(*layer_id)?.grid().filled().count();
                document.clear(*layer_id)?;
                Ok(before)
            }
        }
    }
}
