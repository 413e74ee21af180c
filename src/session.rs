use egui::Color32;

use crate::color;
use crate::command::Command;
use crate::compositor::{self, ExportedImage};
use crate::config::EditorConfig;
use crate::document::Document;
use crate::error::{EditError, EditResult, ExportError};
use crate::grid::{CellPos, Grid};
use crate::input::{GestureEvent, GesturePhase};
use crate::layer::LayerId;
use crate::raster;
use crate::state::{EditorState, StrokeMode};
use crate::tool::Tool;

/// Cells a shape tool would paint for a drag from `anchor` to `current`.
///
/// Empty for tools that do not preview. Pure: nothing is mutated.
pub fn preview_cells(tool: Tool, anchor: CellPos, current: CellPos) -> Vec<CellPos> {
    tool.shape()
        .map(|shape| raster::shape_cells(shape, anchor, current))
        .unwrap_or_default()
}

/// The editing coordinator.
///
/// Owns the document, the current tool and color, and the gesture state.
/// Gesture events come in one at a time through [`EditSession::handle_gesture`];
/// renderers pull [`EditSession::flattened_raster`] and
/// [`EditSession::preview_cells`] after each event.
#[derive(Debug, Clone)]
pub struct EditSession {
    document: Document,
    tool: Tool,
    color: Color32,
    state: EditorState,
    config: EditorConfig,
}

impl EditSession {
    /// Starts a session with one empty layer.
    ///
    /// A config that fails validation is replaced by the defaults.
    pub fn new(config: EditorConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("{err}; starting with the default config");
                EditorConfig::default()
            }
        };
        let color = color::parse_hex(&config.default_color).unwrap_or(color::DEFAULT_COLOR);
        Self {
            document: Document::new(config.grid_size),
            tool: Tool::default(),
            color,
            state: EditorState::Idle,
            config,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switches tool. A drag in progress is abandoned without committing.
    pub fn set_tool(&mut self, tool: Tool) {
        if tool == self.tool {
            return;
        }
        if self.state.is_dragging() {
            self.cancel_gesture();
        }
        log::debug!("Tool changed: {} -> {}", self.tool, tool);
        self.tool = tool;
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn color_hex(&self) -> String {
        color::to_hex(self.color)
    }

    /// Sets the current color from `#rrggbb`. Malformed input is rejected
    /// and the previous color kept.
    pub fn set_color(&mut self, hex: &str) -> EditResult {
        self.color = color::parse_hex(hex)?;
        Ok(())
    }

    /// Sets the current color directly, forcing it opaque
    pub fn set_color32(&mut self, color: Color32) {
        self.color = Color32::from_rgb(color.r(), color.g(), color.b());
    }

    /// Routes one gesture event to the current tool.
    pub fn handle_gesture(&mut self, event: GestureEvent) {
        let cell = event.cell.filter(|cell| self.document.contains(*cell));
        match event.phase {
            GesturePhase::Start => match cell {
                Some(cell) => self.begin(cell),
                None => log::trace!("Ignoring gesture start off the grid"),
            },
            GesturePhase::Move => {
                if let Some(cell) = cell {
                    self.drag_to(cell);
                }
            }
            GesturePhase::End => self.finish(cell),
            GesturePhase::Cancel => self.cancel_gesture(),
        }
    }

    /// Abandons the current drag. Shapes in progress are not committed.
    pub fn cancel_gesture(&mut self) {
        if let Some(last) = self.state.last_cell() {
            log::debug!("Abandoning {} gesture at {:?}", self.state.name(), last);
        }
        self.state = EditorState::Idle;
    }

    fn begin(&mut self, cell: CellPos) {
        if self.state.is_dragging() {
            self.cancel_gesture();
        }
        let layer_id = self.document.active_layer_id();

        match self.tool {
            Tool::Pencil => {
                self.apply(Command::SetCell {
                    layer_id,
                    pos: cell,
                    color: Some(self.color),
                });
                self.state = EditorState::Stroking {
                    mode: StrokeMode::Paint,
                    last: cell,
                };
            }
            Tool::Eraser => {
                self.apply(Command::SetCell {
                    layer_id,
                    pos: cell,
                    color: None,
                });
                self.state = EditorState::Stroking {
                    mode: StrokeMode::Erase,
                    last: cell,
                };
            }
            Tool::Fill => {
                self.apply(Command::FloodFill {
                    layer_id,
                    start: cell,
                    color: Some(self.color),
                });
            }
            Tool::Eyedropper => {
                if let Some(picked) = self.document.read_cell(layer_id, cell) {
                    log::debug!("Picked {} at {:?}", color::to_hex(picked), cell);
                    self.color = picked;
                    self.tool = Tool::Pencil;
                }
            }
            Tool::Line | Tool::Rectangle => {
                if let Some(shape) = self.tool.shape() {
                    self.state = EditorState::Shaping {
                        shape,
                        anchor: cell,
                        last: cell,
                    };
                }
            }
        }
    }

    fn drag_to(&mut self, cell: CellPos) {
        match self.state {
            EditorState::Idle => {}
            EditorState::Stroking { mode, .. } => {
                let color = match mode {
                    StrokeMode::Paint => Some(self.color),
                    StrokeMode::Erase => None,
                };
                self.apply(Command::SetCell {
                    layer_id: self.document.active_layer_id(),
                    pos: cell,
                    color,
                });
                self.state = EditorState::Stroking { mode, last: cell };
            }
            EditorState::Shaping { shape, anchor, .. } => {
                self.state = EditorState::Shaping {
                    shape,
                    anchor,
                    last: cell,
                };
            }
        }
    }

    fn finish(&mut self, cell: Option<CellPos>) {
        match (self.state, cell) {
            (EditorState::Shaping { shape, anchor, .. }, Some(cell)) => {
                self.apply(Command::PaintCells {
                    layer_id: self.document.active_layer_id(),
                    cells: raster::shape_cells(shape, anchor, cell),
                    color: Some(self.color),
                });
                self.state = EditorState::Idle;
            }
            // Released off the grid: the shape is dropped
            (EditorState::Shaping { .. }, None) => self.cancel_gesture(),
            (EditorState::Stroking { .. }, _) | (EditorState::Idle, _) => {
                self.state = EditorState::Idle;
            }
        }
    }

    fn apply(&mut self, command: Command) {
        match command.execute(&mut self.document) {
            Ok(changed) => log::trace!("{command:?} changed {changed} cells"),
            Err(err) => log::debug!("Ignoring edit on layer {}: {err}", command.layer_id()),
        }
    }

    /// Live preview of the shape being dragged, if any
    pub fn preview_cells(&self) -> Vec<CellPos> {
        match self.state {
            EditorState::Shaping { shape, anchor, last } => raster::shape_cells(shape, anchor, last),
            _ => Vec::new(),
        }
    }

    /// Fresh composite of the visible layers
    pub fn flattened_raster(&self) -> Grid {
        compositor::flatten(&self.document)
    }

    /// Encodes the visible layers as a PNG at `scale` pixels per cell,
    /// named after the configured export file name.
    pub fn export_image(&self, scale: u32) -> Result<ExportedImage, ExportError> {
        compositor::export(&self.document, scale, &self.config.export_file_name)
    }

    pub fn add_layer(&mut self) -> LayerId {
        self.document.add_layer()
    }

    /// Deletes a layer; refused for the last remaining one.
    pub fn delete_layer(&mut self, id: LayerId) -> EditResult {
        let result = self.document.delete_layer(id);
        if let Err(err @ EditError::LastLayerDeletionRefused) = &result {
            log::info!("{err}");
        }
        result
    }

    pub fn toggle_visibility(&mut self, id: LayerId) -> EditResult<bool> {
        self.document.toggle_visibility(id)
    }

    /// Makes `id` the layer that receives paint
    pub fn select_layer(&mut self, id: LayerId) -> EditResult {
        self.document.set_active_layer(id)
    }

    /// Empties the active layer
    pub fn clear_active_layer(&mut self) {
        self.apply(Command::ClearLayer {
            layer_id: self.document.active_layer_id(),
        });
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> CellPos {
        CellPos::new(x, y)
    }

    #[test]
    fn test_preview_cells_for_tools() {
        assert_eq!(preview_cells(Tool::Line, p(0, 0), p(2, 2)), vec![p(0, 0), p(1, 1), p(2, 2)]);
        assert_eq!(preview_cells(Tool::Rectangle, p(1, 1), p(3, 3)).len(), 8);
        assert!(preview_cells(Tool::Pencil, p(0, 0), p(2, 2)).is_empty());
    }

    #[test]
    fn test_set_color_rejects_invalid() {
        let mut session = EditSession::default();
        session.set_color("#123abc").unwrap();
        assert_eq!(session.set_color("#12"), Err(EditError::InvalidColor("#12".into())));
        assert_eq!(session.color_hex(), "#123abc");
    }

    #[test]
    fn test_invalid_config_color_falls_back() {
        let session = EditSession::new(EditorConfig {
            default_color: "nope".into(),
            ..EditorConfig::default()
        });
        assert_eq!(session.color(), color::DEFAULT_COLOR);
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        for grid_size in [0, usize::MAX] {
            let session = EditSession::new(EditorConfig {
                grid_size,
                ..EditorConfig::default()
            });
            assert_eq!(session.config(), &EditorConfig::default());
            assert_eq!(session.document().grid_size(), crate::grid::DEFAULT_GRID_SIZE);
        }

        let session = EditSession::new(EditorConfig {
            grid_size: 0,
            default_color: "#102030".into(),
            ..EditorConfig::default()
        });
        assert_eq!(session.color(), color::DEFAULT_COLOR);
        assert!(session.export_image(1).is_ok());
    }

    #[test]
    fn test_set_color32_is_opaque() {
        let mut session = EditSession::default();
        session.set_color32(Color32::from_rgba_unmultiplied(10, 20, 30, 40));
        assert_eq!(session.color().a(), 255);
    }

    #[test]
    fn test_tool_change_abandons_shape() {
        let mut session = EditSession::default();
        session.set_tool(Tool::Line);
        session.handle_gesture(GestureEvent::start(p(0, 0)));
        session.handle_gesture(GestureEvent::moved(p(4, 0)));

        session.set_tool(Tool::Pencil);
        assert!(session.state().is_idle());
        session.handle_gesture(GestureEvent::end(p(4, 0)));
        assert!(session.document().active_layer().grid().is_empty());
    }

    #[test]
    fn test_start_while_dragging_restarts() {
        let mut session = EditSession::default();
        session.set_tool(Tool::Rectangle);
        session.handle_gesture(GestureEvent::start(p(0, 0)));
        session.handle_gesture(GestureEvent::start(p(5, 5)));
        assert_eq!(session.state().anchor(), Some(p(5, 5)));
        assert!(session.document().active_layer().grid().is_empty());
    }
}
