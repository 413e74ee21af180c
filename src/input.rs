use egui::{Context, Pos2, Rect};
use serde::{Deserialize, Serialize};

use crate::grid::CellPos;

/// Phase of a pointer gesture over the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GesturePhase {
    Start,
    Move,
    End,
    /// The pointer was lost mid-drag; abandon without committing
    #[serde(alias = "leave")]
    Cancel,
}

/// One discrete gesture event, already resolved to grid coordinates.
///
/// On the wire this is `{"type": "start", "cell": {"x": 3, "y": 4}}`, with
/// `"cell": null` (or no `cell` at all) when the pointer is off the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureEvent {
    #[serde(rename = "type")]
    pub phase: GesturePhase,
    #[serde(default)]
    pub cell: Option<CellPos>,
}

impl GestureEvent {
    pub fn start(cell: impl Into<Option<CellPos>>) -> Self {
        Self {
            phase: GesturePhase::Start,
            cell: cell.into(),
        }
    }

    pub fn moved(cell: impl Into<Option<CellPos>>) -> Self {
        Self {
            phase: GesturePhase::Move,
            cell: cell.into(),
        }
    }

    pub fn end(cell: impl Into<Option<CellPos>>) -> Self {
        Self {
            phase: GesturePhase::End,
            cell: cell.into(),
        }
    }

    pub fn cancel() -> Self {
        Self {
            phase: GesturePhase::Cancel,
            cell: None,
        }
    }
}

/// Maps a screen position inside `canvas` to the grid cell under it.
///
/// The canvas is split into `grid_size × grid_size` equal cells. Positions
/// outside the canvas resolve to `None`.
pub fn cell_at(canvas: Rect, grid_size: usize, pos: Pos2) -> Option<CellPos> {
    if grid_size == 0 || !canvas.contains(pos) || canvas.width() <= 0.0 || canvas.height() <= 0.0 {
        return None;
    }
    let x = ((pos.x - canvas.min.x) / canvas.width() * grid_size as f32).floor() as i32;
    let y = ((pos.y - canvas.min.y) / canvas.height() * grid_size as f32).floor() as i32;
    let size = grid_size as i32;
    ((0..size).contains(&x) && (0..size).contains(&y)).then_some(CellPos::new(x, y))
}

/// Pointer state sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    /// Pointer position, `None` when it is outside the window
    pub pos: Option<Pos2>,
    /// Primary button went down this frame
    pub pressed: bool,
    /// Primary button went up this frame
    pub released: bool,
}

/// Turns raw egui pointer input into gesture events for the canvas.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    dragging: bool,
    last_cell: Option<CellPos>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Read this frame's pointer state from egui and translate it
    pub fn process(&mut self, ctx: &Context, canvas: Rect, grid_size: usize) -> Vec<GestureEvent> {
        let sample = ctx.input(|input| PointerSample {
            pos: input.pointer.hover_pos(),
            pressed: input.pointer.primary_pressed(),
            released: input.pointer.primary_released(),
        });
        self.step(sample, canvas, grid_size)
    }

    /// Translate one pointer sample into zero or more gesture events
    pub fn step(&mut self, sample: PointerSample, canvas: Rect, grid_size: usize) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        let cell = sample.pos.and_then(|pos| cell_at(canvas, grid_size, pos));

        // Presses off the grid never start a gesture
        if sample.pressed && cell.is_some() {
            self.dragging = true;
            self.last_cell = cell;
            events.push(GestureEvent::start(cell));
        }
        if !self.dragging {
            return events;
        }

        if sample.pos.is_none() {
            log::debug!("Pointer left the window mid-drag");
            self.dragging = false;
            self.last_cell = None;
            events.push(GestureEvent::cancel());
            return events;
        }

        if cell != self.last_cell {
            self.last_cell = cell;
            events.push(GestureEvent::moved(cell));
        }

        if sample.released {
            self.dragging = false;
            self.last_cell = None;
            events.push(GestureEvent::end(cell));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn canvas() -> Rect {
        Rect::from_min_size(pos2(10.0, 20.0), vec2(320.0, 320.0))
    }

    fn sample(x: f32, y: f32) -> PointerSample {
        PointerSample {
            pos: Some(pos2(x, y)),
            ..Default::default()
        }
    }

    #[test]
    fn test_cell_at() {
        assert_eq!(cell_at(canvas(), 32, pos2(10.0, 20.0)), Some(CellPos::new(0, 0)));
        assert_eq!(cell_at(canvas(), 32, pos2(25.0, 45.0)), Some(CellPos::new(1, 2)));
        assert_eq!(cell_at(canvas(), 32, pos2(329.9, 339.9)), Some(CellPos::new(31, 31)));
        assert_eq!(cell_at(canvas(), 32, pos2(330.0, 30.0)), None);
        assert_eq!(cell_at(canvas(), 32, pos2(5.0, 30.0)), None);
        assert_eq!(cell_at(canvas(), 0, pos2(20.0, 30.0)), None);
    }

    #[test]
    fn test_gesture_json() {
        let event: GestureEvent = serde_json::from_str(r#"{"type": "start", "cell": {"x": 3, "y": 4}}"#).unwrap();
        assert_eq!(event, GestureEvent::start(CellPos::new(3, 4)));

        let event: GestureEvent = serde_json::from_str(r#"{"type": "end", "cell": null}"#).unwrap();
        assert_eq!(event, GestureEvent::end(None));

        let event: GestureEvent = serde_json::from_str(r#"{"type": "move"}"#).unwrap();
        assert_eq!(event, GestureEvent::moved(None));

        let event: GestureEvent = serde_json::from_str(r#"{"type": "leave", "cell": null}"#).unwrap();
        assert_eq!(event, GestureEvent::cancel());

        assert!(serde_json::from_str::<GestureEvent>(r#"{"type": "hover", "cell": null}"#).is_err());
    }

    #[test]
    fn test_tracker_click_and_drag() {
        let mut tracker = PointerTracker::new();

        let events = tracker.step(PointerSample { pressed: true, ..sample(15.0, 25.0) }, canvas(), 32);
        assert_eq!(events, vec![GestureEvent::start(CellPos::new(0, 0))]);
        assert!(tracker.is_dragging());

        // Same cell: nothing new to report
        assert!(tracker.step(sample(16.0, 26.0), canvas(), 32).is_empty());

        let events = tracker.step(sample(45.0, 25.0), canvas(), 32);
        assert_eq!(events, vec![GestureEvent::moved(CellPos::new(3, 0))]);

        let events = tracker.step(PointerSample { released: true, ..sample(45.0, 25.0) }, canvas(), 32);
        assert_eq!(events, vec![GestureEvent::end(CellPos::new(3, 0))]);
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn test_tracker_ignores_press_outside_canvas() {
        let mut tracker = PointerTracker::new();
        let events = tracker.step(PointerSample { pressed: true, ..sample(0.0, 0.0) }, canvas(), 32);
        assert!(events.is_empty());
        assert!(tracker.step(PointerSample { released: true, ..sample(0.0, 0.0) }, canvas(), 32).is_empty());
    }

    #[test]
    fn test_tracker_release_off_canvas_ends_without_cell() {
        let mut tracker = PointerTracker::new();
        tracker.step(PointerSample { pressed: true, ..sample(15.0, 25.0) }, canvas(), 32);

        let events = tracker.step(PointerSample { released: true, ..sample(500.0, 25.0) }, canvas(), 32);
        assert_eq!(events, vec![GestureEvent::moved(None), GestureEvent::end(None)]);
    }

    #[test]
    fn test_tracker_cancels_when_pointer_leaves_window() {
        let mut tracker = PointerTracker::new();
        tracker.step(PointerSample { pressed: true, ..sample(15.0, 25.0) }, canvas(), 32);

        let events = tracker.step(PointerSample::default(), canvas(), 32);
        assert_eq!(events, vec![GestureEvent::cancel()]);
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn test_tracker_fast_click() {
        let mut tracker = PointerTracker::new();
        let events = tracker.step(
            PointerSample {
                pressed: true,
                released: true,
                ..sample(15.0, 25.0)
            },
            canvas(),
            32,
        );
        assert_eq!(
            events,
            vec![GestureEvent::start(CellPos::new(0, 0)), GestureEvent::end(CellPos::new(0, 0))]
        );
    }
}
