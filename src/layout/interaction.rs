// CrosshairInteraction state machine for mouse-driven divider dragging.

use super::drag::DragPosition;
use super::geometry::{divider_rects, DividerRects, DragSegment};
use super::{LayoutEvent, LayoutState};

/// Default hit-test margin in pixels around a divider.
pub const DEFAULT_HIT_MARGIN: f32 = 4.0;

/// The current state of mouse interaction with the crosshair.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionState {
    /// No interaction in progress.
    Idle,
    /// Mouse is hovering over a segment.
    Hovering { segment: DragSegment },
    /// User is dragging a segment. The pointer is captured by it until release.
    Dragging {
        segment: DragSegment,
        /// Pointer offset from the divider's leading edge when the drag started.
        grab: DragPosition,
    },
}

/// Effects that the App should apply after processing a mouse event.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEffect {
    /// No visible effect.
    None,
    /// Change the mouse cursor icon.
    SetCursor(CursorType),
    /// A drag started on the given segment; the pointer is now captured.
    BeginDrag(DragSegment),
    /// Apply a layout event and request redraw.
    UpdateLayout(LayoutEvent),
    /// The drag ended; restore the cursor.
    EndDrag(CursorType),
}

/// Cursor types needed for crosshair interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorType {
    Default,
    EwResize,
    NsResize,
    Move,
}

impl CursorType {
    /// Cursor shown while hovering or dragging a segment.
    pub fn for_segment(segment: DragSegment) -> Self {
        match segment {
            DragSegment::Top | DragSegment::Bottom => CursorType::EwResize,
            DragSegment::Left | DragSegment::Right => CursorType::NsResize,
            DragSegment::Center => CursorType::Move,
        }
    }
}

/// Hit-test a point against the crosshair, returning the segment under it.
///
/// The center handle is tested first so a press at the intersection never
/// starts a single-axis drag. Divider bars are expanded by `margin` on their
/// thin axis; the center handle on both.
pub fn hit_test_segment(point: (f32, f32), rects: &DividerRects, margin: f32) -> Option<DragSegment> {
    let (px, py) = point;
    DragSegment::hit_order().iter().copied().find(|&segment| {
        let r = rects.get(segment);
        let expanded = match segment {
            DragSegment::Top | DragSegment::Bottom => r.expand(margin, 0.0),
            DragSegment::Left | DragSegment::Right => r.expand(0.0, margin),
            DragSegment::Center => r.expand(margin, margin),
        };
        expanded.contains_point(px, py)
    })
}

/// State machine turning raw pointer samples into crosshair drags.
pub struct CrosshairInteraction {
    state: InteractionState,
    /// Last known cursor position.
    cursor_pos: (f32, f32),
    hit_margin: f32,
}

impl CrosshairInteraction {
    pub fn new(hit_margin: f32) -> Self {
        Self {
            state: InteractionState::Idle,
            cursor_pos: (0.0, 0.0),
            hit_margin,
        }
    }

    /// Get the current interaction state.
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Segment currently hovered or dragged, for visual feedback.
    pub fn active_segment(&self) -> Option<DragSegment> {
        match self.state {
            InteractionState::Idle => None,
            InteractionState::Hovering { segment } | InteractionState::Dragging { segment, .. } => {
                Some(segment)
            }
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, InteractionState::Dragging { .. })
    }

    pub fn set_hit_margin(&mut self, margin: f32) {
        self.hit_margin = margin;
    }

    /// Process a cursor move event. Returns the effect to apply.
    pub fn on_cursor_moved(&mut self, x: f32, y: f32, layout: &LayoutState) -> InteractionEffect {
        self.cursor_pos = (x, y);

        match &self.state {
            InteractionState::Dragging { segment, grab } => {
                let target = DragPosition::new(x - grab.x, y - grab.y);
                let event = match segment {
                    DragSegment::Top | DragSegment::Bottom => LayoutEvent::VerticalDrag(target),
                    DragSegment::Left | DragSegment::Right => LayoutEvent::HorizontalDrag(target),
                    DragSegment::Center => LayoutEvent::CenterDrag(target),
                };
                InteractionEffect::UpdateLayout(event)
            }
            _ => {
                let rects = divider_rects(layout);
                match hit_test_segment(self.cursor_pos, &rects, self.hit_margin) {
                    Some(segment) => {
                        let was_hovering = matches!(
                            self.state,
                            InteractionState::Hovering { segment: s } if s == segment
                        );
                        self.state = InteractionState::Hovering { segment };
                        if was_hovering {
                            InteractionEffect::None
                        } else {
                            InteractionEffect::SetCursor(CursorType::for_segment(segment))
                        }
                    }
                    None => {
                        let was_hovering = matches!(self.state, InteractionState::Hovering { .. });
                        self.state = InteractionState::Idle;
                        if was_hovering {
                            InteractionEffect::SetCursor(CursorType::Default)
                        } else {
                            InteractionEffect::None
                        }
                    }
                }
            }
        }
    }

    /// Process a mouse button press. Returns the effect to apply.
    pub fn on_mouse_press(&mut self, layout: &LayoutState) -> InteractionEffect {
        match &self.state {
            InteractionState::Hovering { segment } => {
                let segment = *segment;
                let (px, py) = self.cursor_pos;
                let grab = DragPosition::new(
                    if segment.moves_vertical() {
                        px - layout.dividers.vertical
                    } else {
                        0.0
                    },
                    if segment.moves_horizontal() {
                        py - layout.dividers.horizontal
                    } else {
                        0.0
                    },
                );
                self.state = InteractionState::Dragging { segment, grab };
                log::debug!("Drag started on {:?} (grab offset {:.1}, {:.1})", segment, grab.x, grab.y);
                InteractionEffect::BeginDrag(segment)
            }
            InteractionState::Idle | InteractionState::Dragging { .. } => InteractionEffect::None,
        }
    }

    /// Process a mouse button release. Returns the effect to apply.
    pub fn on_mouse_release(&mut self) -> InteractionEffect {
        match &self.state {
            InteractionState::Dragging { segment, .. } => {
                let segment = *segment;
                log::debug!("Drag ended on {:?}", segment);
                // The pointer is usually still over the segment after a release.
                self.state = InteractionState::Hovering { segment };
                InteractionEffect::EndDrag(CursorType::for_segment(segment))
            }
            _ => InteractionEffect::None,
        }
    }

    /// Abandon any hover or drag, e.g. when the pointer leaves the window or
    /// focus is lost. The layout keeps whatever the last move produced.
    pub fn cancel(&mut self) -> InteractionEffect {
        let previous = std::mem::replace(&mut self.state, InteractionState::Idle);
        match previous {
            InteractionState::Idle => InteractionEffect::None,
            InteractionState::Hovering { .. } => InteractionEffect::SetCursor(CursorType::Default),
            InteractionState::Dragging { segment, .. } => {
                log::debug!("Drag cancelled on {:?}", segment);
                InteractionEffect::EndDrag(CursorType::Default)
            }
        }
    }
}

impl Default for CrosshairInteraction {
    fn default() -> Self {
        Self::new(DEFAULT_HIT_MARGIN)
    }
}
