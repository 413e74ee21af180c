use egui::{Color32, Painter, Rect, Stroke, pos2, vec2};

use crate::grid::{CellPos, Grid};

const BACKGROUND: Color32 = Color32::from_rgb(0x1a, 0x1a, 0x2e);
const GRID_LINE: Color32 = Color32::from_rgba_premultiplied(0, 26, 25, 26);
const PREVIEW_OPACITY: f32 = 0.6;

/// Paints the pulled raster and the shape preview onto an egui canvas.
///
/// Holds no pixel data of its own: every frame draws whatever the session
/// hands it.
#[derive(Debug, Clone)]
pub struct CanvasRenderer {
    show_grid: bool,
}

impl Default for CanvasRenderer {
    fn default() -> Self {
        Self { show_grid: true }
    }
}

impl CanvasRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.show_grid = show;
    }

    /// Screen rectangle covered by `pos` on a canvas split into `grid_size` cells per side
    pub fn cell_rect(canvas: Rect, grid_size: usize, pos: CellPos) -> Rect {
        let cell = canvas.width() / grid_size.max(1) as f32;
        Rect::from_min_size(
            pos2(canvas.min.x + pos.x as f32 * cell, canvas.min.y + pos.y as f32 * cell),
            vec2(cell, cell),
        )
    }

    /// Draws the raster, then the preview cells in `preview_color`, then grid lines.
    pub fn render(&self, painter: &Painter, canvas: Rect, raster: &Grid, preview: &[CellPos], preview_color: Color32) {
        let size = raster.size();
        painter.rect_filled(canvas, 0.0, BACKGROUND);

        for (pos, color) in raster.filled() {
            painter.rect_filled(Self::cell_rect(canvas, size, pos), 0.0, color);
        }

        for &pos in preview.iter().filter(|pos| raster.contains(**pos)) {
            // Over empty cells the preview is drawn translucent
            let color = match raster.get(pos) {
                Some(_) => preview_color,
                None => preview_color.gamma_multiply(PREVIEW_OPACITY),
            };
            painter.rect_filled(Self::cell_rect(canvas, size, pos), 0.0, color);
        }

        if self.show_grid && size > 0 {
            let step = canvas.width() / size as f32;
            let stroke = Stroke::new(1.0, GRID_LINE);
            for i in 1..size {
                let offset = i as f32 * step;
                painter.line_segment(
                    [pos2(canvas.min.x + offset, canvas.min.y), pos2(canvas.min.x + offset, canvas.max.y)],
                    stroke,
                );
                painter.line_segment(
                    [pos2(canvas.min.x, canvas.min.y + offset), pos2(canvas.max.x, canvas.min.y + offset)],
                    stroke,
                );
            }
        }
    }
}
