use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::{EditError, EditResult};

/// Side length used when no configuration says otherwise
pub const DEFAULT_GRID_SIZE: usize = 32;

/// Integer cell coordinate. Signed so shape math and pointer resolution can
/// produce positions left of or above the canvas; the grid rejects those.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPos {
    pub x: i32,
    pub y: i32,
}

impl CellPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for CellPos {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// A square `size × size` matrix of optional colors.
///
/// `None` is an empty cell. The dimensions are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Color32>>,
}

impl Grid {
    /// Creates a grid with every cell empty
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major index of `pos`, or `None` when it lies outside the grid
    pub fn index_of(&self, pos: CellPos) -> Option<usize> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        (x < self.size && y < self.size).then(|| y * self.size + x)
    }

    pub fn contains(&self, pos: CellPos) -> bool {
        self.index_of(pos).is_some()
    }

    /// Color at `pos`; empty cells and positions outside the grid both read as `None`.
    pub fn get(&self, pos: CellPos) -> Option<Color32> {
        self.index_of(pos).and_then(|index| self.cells[index])
    }

    /// Overwrites one cell. Returns whether the stored value changed.
    pub fn set(&mut self, pos: CellPos, color: Option<Color32>) -> EditResult<bool> {
        let index = self
            .index_of(pos)
            .ok_or(EditError::OutOfBounds { x: pos.x, y: pos.y })?;
        Ok(self.set_index(index, color))
    }

    pub(crate) fn set_index(&mut self, index: usize, color: Option<Color32>) -> bool {
        let changed = self.cells[index] != color;
        self.cells[index] = color;
        changed
    }

    pub(crate) fn get_index(&self, index: usize) -> Option<Color32> {
        self.cells[index]
    }

    /// Resets every cell to empty
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Every cell with its coordinate, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (CellPos, Option<Color32>)> + '_ {
        let size = self.size;
        self.cells.iter().enumerate().map(move |(index, color)| {
            let pos = CellPos::new((index % size) as i32, (index / size) as i32);
            (pos, *color)
        })
    }

    /// Only the cells holding a color
    pub fn filled(&self) -> impl Iterator<Item = (CellPos, Color32)> + '_ {
        self.iter().filter_map(|(pos, color)| color.map(|color| (pos, color)))
    }
}
