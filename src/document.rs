use egui::Color32;

use crate::error::{EditError, EditResult};
use crate::grid::CellPos;
use crate::layer::{Layer, LayerId};

/// The layer store: an ordered stack of layers, bottom first.
///
/// Invariants:
/// - there is always at least one layer
/// - `active` always names a layer present in `layers`
/// - every layer grid is `grid_size × grid_size`
#[derive(Debug, Clone)]
pub struct Document {
    grid_size: usize,
    layers: Vec<Layer>,
    active: LayerId,
    revision: u64,
}

impl Document {
    /// Creates a document holding a single empty layer named `Layer 1`.
    pub fn new(grid_size: usize) -> Self {
        let first = Layer::new("Layer 1", grid_size);
        Self {
            grid_size,
            active: first.id(),
            layers: vec![first],
            revision: 0,
        }
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn contains(&self, pos: CellPos) -> bool {
        let size = self.grid_size as i64;
        (0..size).contains(&(pos.x as i64)) && (0..size).contains(&(pos.y as i64))
    }

    /// Layers in compositing order, bottom first
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Increases on every change to pixels, visibility, stack, or active layer.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn layer(&self, id: LayerId) -> EditResult<&Layer> {
        self.layers
            .iter()
            .find(|layer| layer.id() == id)
            .ok_or(EditError::UnknownLayerId(id))
    }

    fn layer_mut(&mut self, id: LayerId) -> EditResult<&mut Layer> {
        self.layers
            .iter_mut()
            .find(|layer| layer.id() == id)
            .ok_or(EditError::UnknownLayerId(id))
    }

    pub fn active_layer_id(&self) -> LayerId {
        self.active
    }

    pub fn active_layer(&self) -> &Layer {
        let index = self
            .layers
            .iter()
            .position(|layer| layer.id() == self.active)
            .unwrap_or(0);
        &self.layers[index]
    }

    pub fn set_active_layer(&mut self, id: LayerId) -> EditResult {
        self.layer(id)?;
        if self.active != id {
            self.active = id;
            self.revision += 1;
        }
        Ok(())
    }

    /// Appends an empty layer on top of the stack and makes it active.
    pub fn add_layer(&mut self) -> LayerId {
        let layer = Layer::new(&format!("Layer {}", self.layers.len() + 1), self.grid_size);
        let id = layer.id();
        log::info!("Adding {} ({})", layer.name(), id);
        self.layers.push(layer);
        self.active = id;
        self.revision += 1;
        id
    }

    /// Removes a layer. The last remaining layer cannot be deleted.
    ///
    /// When the active layer goes away, the first layer in stack order that
    /// is not the deleted one becomes active.
    pub fn delete_layer(&mut self, id: LayerId) -> EditResult {
        let index = self
            .layers
            .iter()
            .position(|layer| layer.id() == id)
            .ok_or(EditError::UnknownLayerId(id))?;
        if self.layers.len() <= 1 {
            return Err(EditError::LastLayerDeletionRefused);
        }

        if self.active == id {
            if let Some(replacement) = self.layers.iter().find(|layer| layer.id() != id) {
                self.active = replacement.id();
            }
        }
        let removed = self.layers.remove(index);
        log::info!("Deleted {} ({})", removed.name(), id);
        self.revision += 1;
        Ok(())
    }

    /// Flips a layer's visibility and returns the new state.
    pub fn toggle_visibility(&mut self, id: LayerId) -> EditResult<bool> {
        let visible = self.layer_mut(id)?.toggle_visibility();
        self.revision += 1;
        Ok(visible)
    }

    /// Overwrites one cell of one layer; other layers are untouched.
    pub fn set_cell(&mut self, id: LayerId, pos: CellPos, color: Option<Color32>) -> EditResult<bool> {
        let changed = self.layer_mut(id)?.set_cell(pos, color)?;
        if changed {
            self.revision += 1;
        }
        Ok(changed)
    }

    /// Paints a batch of cells on one layer. Cells outside the grid are skipped.
    ///
    /// The layer is resolved before anything is written, so an unknown id
    /// leaves the document untouched.
    pub fn paint_cells(&mut self, id: LayerId, cells: &[CellPos], color: Option<Color32>) -> EditResult<usize> {
        let changed = self.layer_mut(id)?.paint_cells(cells, color);
        if changed > 0 {
            self.revision += 1;
        }
        Ok(changed)
    }

    /// Region fill on one layer starting at `start`.
    pub fn flood_fill(&mut self, id: LayerId, start: CellPos, color: Option<Color32>) -> EditResult<usize> {
        if !self.contains(start) {
            return Err(EditError::OutOfBounds { x: start.x, y: start.y });
        }
        let filled = self.layer_mut(id)?.flood_fill(start, color);
        if filled > 0 {
            self.revision += 1;
        }
        Ok(filled)
    }

    /// Resets every cell of one layer to empty.
    pub fn clear(&mut self, id: LayerId) -> EditResult {
        let layer = self.layer_mut(id)?;
        let before = layer.version();
        layer.clear();
        if layer.version() != before {
            self.revision += 1;
        }
        Ok(())
    }

    /// Color at `pos` on one layer. Unknown layers and out-of-range
    /// positions read as empty.
    pub fn read_cell(&self, id: LayerId, pos: CellPos) -> Option<Color32> {
        self.layer(id).ok().and_then(|layer| layer.grid().get(pos))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(crate::grid::DEFAULT_GRID_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_has_one_active_layer() {
        let doc = Document::new(8);
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.active_layer().name(), "Layer 1");
        assert_eq!(doc.active_layer_id(), doc.layers()[0].id());
    }

    #[test]
    fn test_add_layer_names_and_activates() {
        let mut doc = Document::new(8);
        let second = doc.add_layer();
        let third = doc.add_layer();

        assert_eq!(doc.len(), 3);
        assert_eq!(doc.active_layer_id(), third);
        assert_eq!(doc.layer(second).unwrap().name(), "Layer 2");
        assert_eq!(doc.layers()[2].name(), "Layer 3");
    }

    #[test]
    fn test_layer_names_follow_count_after_delete() {
        let mut doc = Document::new(4);
        let second = doc.add_layer();
        doc.delete_layer(second).unwrap();
        doc.add_layer();
        assert_eq!(doc.active_layer().name(), "Layer 2");
    }

    #[test]
    fn test_set_cell_only_touches_one_layer() {
        let mut doc = Document::new(4);
        let bottom = doc.layers()[0].id();
        let top = doc.add_layer();
        let pos = CellPos::new(2, 2);

        doc.set_cell(top, pos, Some(Color32::RED)).unwrap();

        assert_eq!(doc.read_cell(top, pos), Some(Color32::RED));
        assert_eq!(doc.read_cell(bottom, pos), None);
    }

    #[test]
    fn test_revision_changes_on_edits() {
        let mut doc = Document::new(4);
        let id = doc.active_layer_id();
        let start = doc.revision();

        doc.set_cell(id, CellPos::new(0, 0), Some(Color32::RED)).unwrap();
        let after_paint = doc.revision();
        assert!(after_paint > start);

        doc.set_cell(id, CellPos::new(0, 0), Some(Color32::RED)).unwrap();
        assert_eq!(doc.revision(), after_paint);

        doc.toggle_visibility(id).unwrap();
        assert!(doc.revision() > after_paint);
    }

    #[test]
    fn test_unknown_layer_is_rejected_without_changes() {
        let mut doc = Document::new(4);
        let stranger = LayerId::new();
        let revision = doc.revision();

        assert_eq!(doc.toggle_visibility(stranger), Err(EditError::UnknownLayerId(stranger)));
        assert_eq!(doc.delete_layer(stranger), Err(EditError::UnknownLayerId(stranger)));
        assert_eq!(doc.set_active_layer(stranger), Err(EditError::UnknownLayerId(stranger)));
        assert_eq!(
            doc.paint_cells(stranger, &[CellPos::new(0, 0)], Some(Color32::RED)),
            Err(EditError::UnknownLayerId(stranger))
        );
        assert_eq!(doc.read_cell(stranger, CellPos::new(0, 0)), None);
        assert_eq!(doc.revision(), revision);
    }

    #[test]
    fn test_delete_inactive_layer_keeps_active() {
        let mut doc = Document::new(4);
        let bottom = doc.layers()[0].id();
        let top = doc.add_layer();

        doc.delete_layer(bottom).unwrap();
        assert_eq!(doc.active_layer_id(), top);
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_delete_active_bottom_layer_picks_next_in_stack() {
        let mut doc = Document::new(4);
        let bottom = doc.layers()[0].id();
        let middle = doc.add_layer();
        doc.add_layer();
        doc.set_active_layer(bottom).unwrap();

        doc.delete_layer(bottom).unwrap();
        assert_eq!(doc.active_layer_id(), middle);
    }

    #[test]
    fn test_delete_active_top_layer_picks_bottom() {
        let mut doc = Document::new(4);
        let bottom = doc.layers()[0].id();
        doc.add_layer();
        let top = doc.add_layer();

        doc.delete_layer(top).unwrap();
        assert_eq!(doc.active_layer_id(), bottom);
    }

    #[test]
    fn test_flood_fill_out_of_bounds() {
        let mut doc = Document::new(4);
        let id = doc.active_layer_id();
        assert_eq!(
            doc.flood_fill(id, CellPos::new(-1, 0), Some(Color32::RED)),
            Err(EditError::OutOfBounds { x: -1, y: 0 })
        );
        assert!(doc.active_layer().grid().is_empty());
    }
}
