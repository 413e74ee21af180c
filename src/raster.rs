//! Line and rectangle-outline rasterization on integer cells.

use serde::{Deserialize, Serialize};

use crate::grid::CellPos;

/// Shapes drawn by dragging from an anchor to the current cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Line,
    Rectangle,
}

/// Cells covered by `shape` spanned between `anchor` and `current`.
pub fn shape_cells(shape: Shape, anchor: CellPos, current: CellPos) -> Vec<CellPos> {
    match shape {
        Shape::Line => line(anchor, current),
        Shape::Rectangle => rectangle_outline(anchor, current),
    }
}

/// Bresenham line from `from` to `to`, both endpoints included.
///
/// The set of cells does not depend on which endpoint comes first: stepping
/// always starts from the lexicographically smaller endpoint and the result
/// is reversed when needed so it runs from `from` to `to`.
pub fn line(from: CellPos, to: CellPos) -> Vec<CellPos> {
    if to < from {
        let mut cells = bresenham(to, from);
        cells.reverse();
        cells
    } else {
        bresenham(from, to)
    }
}

fn bresenham(from: CellPos, to: CellPos) -> Vec<CellPos> {
    let dx = (to.x - from.x).abs();
    let dy = (to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx - dy;
    let (mut x, mut y) = (from.x, from.y);

    let mut cells = Vec::with_capacity((dx.max(dy) + 1) as usize);
    loop {
        cells.push(CellPos::new(x, y));
        if x == to.x && y == to.y {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
    cells
}

/// Border cells of the rectangle with opposite corners `a` and `b`.
///
/// Corners may come in any order. Each border cell appears once and the
/// interior is never included.
pub fn rectangle_outline(a: CellPos, b: CellPos) -> Vec<CellPos> {
    let (min_x, max_x) = (a.x.min(b.x), a.x.max(b.x));
    let (min_y, max_y) = (a.y.min(b.y), a.y.max(b.y));

    let mut cells = Vec::new();
    cells.extend((min_x..=max_x).map(|x| CellPos::new(x, min_y)));
    if max_y > min_y {
        cells.extend((min_x..=max_x).map(|x| CellPos::new(x, max_y)));
    }
    cells.extend((min_y + 1..max_y).map(|y| CellPos::new(min_x, y)));
    if max_x > min_x {
        cells.extend((min_y + 1..max_y).map(|y| CellPos::new(max_x, y)));
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn p(x: i32, y: i32) -> CellPos {
        CellPos::new(x, y)
    }

    fn set(cells: Vec<CellPos>) -> BTreeSet<CellPos> {
        cells.into_iter().collect()
    }

    #[test]
    fn test_horizontal_line() {
        assert_eq!(line(p(0, 0), p(3, 0)), vec![p(0, 0), p(1, 0), p(2, 0), p(3, 0)]);
    }

    #[test]
    fn test_diagonal_line() {
        assert_eq!(line(p(0, 0), p(2, 2)), vec![p(0, 0), p(1, 1), p(2, 2)]);
    }

    #[test]
    fn test_single_cell_line() {
        assert_eq!(line(p(4, 4), p(4, 4)), vec![p(4, 4)]);
    }

    #[test]
    fn test_line_runs_from_first_endpoint() {
        let cells = line(p(3, 1), p(0, 0));
        assert_eq!(cells.first(), Some(&p(3, 1)));
        assert_eq!(cells.last(), Some(&p(0, 0)));
    }

    #[test]
    fn test_line_is_symmetric() {
        let endpoints = [
            (p(0, 0), p(2, 1)),
            (p(0, 0), p(5, 3)),
            (p(1, 7), p(6, 2)),
            (p(3, 0), p(0, 9)),
            (p(0, 5), p(0, 0)),
            (p(9, 4), p(2, 4)),
        ];
        for (a, b) in endpoints {
            let forward = set(line(a, b));
            assert_eq!(forward, set(line(b, a)), "{a:?} <-> {b:?}");
            assert!(forward.contains(&a) && forward.contains(&b));
        }
    }

    #[test]
    fn test_line_is_connected() {
        let cells = line(p(0, 0), p(7, 3));
        for pair in cells.windows(2) {
            assert!((pair[0].x - pair[1].x).abs() <= 1);
            assert!((pair[0].y - pair[1].y).abs() <= 1);
        }
    }

    #[test]
    fn test_rectangle_outline() {
        let cells = rectangle_outline(p(1, 1), p(3, 3));
        assert_eq!(cells.len(), 8);
        let expected = set(vec![
            p(1, 1), p(2, 1), p(3, 1),
            p(1, 2), p(3, 2),
            p(1, 3), p(2, 3), p(3, 3),
        ]);
        assert_eq!(set(cells), expected);
    }

    #[test]
    fn test_rectangle_corner_order_does_not_matter() {
        assert_eq!(set(rectangle_outline(p(5, 0), p(1, 4))), set(rectangle_outline(p(1, 0), p(5, 4))));
    }

    #[test]
    fn test_degenerate_rectangles() {
        assert_eq!(rectangle_outline(p(2, 2), p(2, 2)), vec![p(2, 2)]);
        assert_eq!(set(rectangle_outline(p(0, 3), p(4, 3))), set(line(p(0, 3), p(4, 3))));
        assert_eq!(set(rectangle_outline(p(3, 0), p(3, 4))), set(line(p(3, 0), p(3, 4))));
        assert_eq!(rectangle_outline(p(3, 0), p(3, 4)).len(), 5);
    }

    #[test]
    fn test_shape_cells_dispatch() {
        assert_eq!(shape_cells(Shape::Line, p(0, 0), p(3, 0)), line(p(0, 0), p(3, 0)));
        assert_eq!(shape_cells(Shape::Rectangle, p(1, 1), p(3, 3)).len(), 8);
    }
}
