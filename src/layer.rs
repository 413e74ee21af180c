use egui::Color32;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::EditResult;
use crate::fill;
use crate::grid::{CellPos, Grid};

/// A unique identifier for a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(Uuid);

impl LayerId {
    /// Generates a fresh random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named, independently visible owner of one pixel grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    id: LayerId,
    name: String,
    visible: bool,
    grid: Grid,
    /// Bumped on every content change
    version: u64,
}

impl Layer {
    pub fn new(name: &str, grid_size: usize) -> Self {
        Self {
            id: LayerId::new(),
            name: name.to_string(),
            visible: true,
            grid: Grid::new(grid_size),
            version: 0,
        }
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Content version, for callers caching anything derived from the pixels
    pub fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn toggle_visibility(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    /// Writes one cell; returns whether the content changed.
    pub(crate) fn set_cell(&mut self, pos: CellPos, color: Option<Color32>) -> EditResult<bool> {
        let changed = self.grid.set(pos, color)?;
        if changed {
            self.version += 1;
        }
        Ok(changed)
    }

    /// Writes every in-bounds cell of `cells`, skipping the rest.
    /// Returns the number of cells whose value changed.
    pub(crate) fn paint_cells(&mut self, cells: &[CellPos], color: Option<Color32>) -> usize {
        let changed = cells
            .iter()
            .filter(|pos| self.grid.set(**pos, color).unwrap_or(false))
            .count();
        if changed > 0 {
            self.version += 1;
        }
        changed
    }

    pub(crate) fn flood_fill(&mut self, start: CellPos, color: Option<Color32>) -> usize {
        let filled = fill::flood_fill(&mut self.grid, start, color);
        if filled > 0 {
            self.version += 1;
        }
        filled
    }

    pub(crate) fn clear(&mut self) {
        if !self.grid.is_empty() {
            self.grid.clear();
            self.version += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_layer() {
        let layer = Layer::new("Layer 1", 8);
        assert_eq!(layer.name(), "Layer 1");
        assert!(layer.is_visible());
        assert!(layer.grid().is_empty());
        assert_eq!(layer.grid().size(), 8);
        assert_eq!(layer.version(), 0);
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(Layer::new("a", 1).id(), Layer::new("a", 1).id());
    }

    #[test]
    fn test_version_tracks_content_changes() {
        let mut layer = Layer::new("Layer 1", 4);
        let pos = CellPos::new(1, 2);

        layer.set_cell(pos, Some(Color32::RED)).unwrap();
        assert_eq!(layer.version(), 1);

        // Writing the same value is not a change
        layer.set_cell(pos, Some(Color32::RED)).unwrap();
        assert_eq!(layer.version(), 1);

        layer.clear();
        assert_eq!(layer.version(), 2);
        layer.clear();
        assert_eq!(layer.version(), 2);
    }

    #[test]
    fn test_paint_cells_skips_out_of_bounds() {
        let mut layer = Layer::new("Layer 1", 2);
        let cells = [CellPos::new(0, 0), CellPos::new(5, 5), CellPos::new(1, 1)];
        assert_eq!(layer.paint_cells(&cells, Some(Color32::BLUE)), 2);
        assert_eq!(layer.grid().get(CellPos::new(1, 1)), Some(Color32::BLUE));
        assert_eq!(layer.version(), 1);
    }
}
