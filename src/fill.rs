//! Region fill (bucket tool).

use egui::Color32;

use crate::grid::{CellPos, Grid};

/// Replaces the 4-connected region of cells sharing the start cell's color.
///
/// Returns the number of cells filled. See [`flood_fill_with`].
pub fn flood_fill(grid: &mut Grid, start: CellPos, fill: Option<Color32>) -> usize {
    flood_fill_with(grid, start, fill, |_| {})
}

/// Flood fill that reports every filled cell to `on_fill`.
///
/// Nothing happens when `start` lies outside the grid or already holds
/// `fill`. `fill` may be `None`, which erases the region. Each cell is
/// pushed at most once, so the traversal is bounded by the cell count.
pub fn flood_fill_with<F>(grid: &mut Grid, start: CellPos, fill: Option<Color32>, mut on_fill: F) -> usize
where
    F: FnMut(CellPos),
{
    let Some(start_index) = grid.index_of(start) else {
        return 0;
    };
    let target = grid.get_index(start_index);
    if target == fill {
        return 0;
    }

    let size = grid.size();
    let mut visited = vec![false; size * size];
    let mut stack = vec![start];
    visited[start_index] = true;
    let mut filled = 0;

    while let Some(pos) = stack.pop() {
        if let Some(index) = grid.index_of(pos) {
            grid.set_index(index, fill);
        }
        on_fill(pos);
        filled += 1;

        let neighbors = [
            CellPos::new(pos.x + 1, pos.y),
            CellPos::new(pos.x - 1, pos.y),
            CellPos::new(pos.x, pos.y + 1),
            CellPos::new(pos.x, pos.y - 1),
        ];
        for next in neighbors {
            let Some(index) = grid.index_of(next) else {
                continue;
            };
            if visited[index] || grid.get_index(index) != target {
                continue;
            }
            visited[index] = true;
            stack.push(next);
        }
    }

    filled
}
