// Drag handlers: map a drag-target position onto new divider positions.

use serde::Serialize;

use super::LayoutState;

/// A drag-target position in window pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragPosition {
    pub x: f32,
    pub y: f32,
}

impl DragPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Move the horizontal divider to `pos.y`, clamped to the window.
pub fn drag_horizontal(state: &LayoutState, pos: DragPosition) -> LayoutState {
    state.with_positions(state.window, pos.y, state.dividers.vertical)
}

/// Move the vertical divider to `pos.x`, clamped to the window.
pub fn drag_vertical(state: &LayoutState, pos: DragPosition) -> LayoutState {
    state.with_positions(state.window, state.dividers.horizontal, pos.x)
}

/// Move both dividers from a single center-handle sample.
pub fn drag_center(state: &LayoutState, pos: DragPosition) -> LayoutState {
    state.with_positions(state.window, pos.y, pos.x)
}
