// Crosshair layout state: window size, divider positions, and split ratios.

pub mod drag;
pub mod geometry;
pub mod interaction;
pub mod resize;

use serde::Serialize;

use drag::DragPosition;
use resize::ResizeStrategy;

/// Thickness of a divider bar in pixels.
pub const DIVIDER_THICKNESS: f32 = 8.0;

/// Half of the divider thickness; each quadrant is deflated by this much at a seam.
pub const HALF_DIVIDER_THICKNESS: f32 = DIVIDER_THICKNESS / 2.0;

/// Window dimensions in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindowSize {
    pub height: f32,
    pub width: f32,
}

impl WindowSize {
    /// Create a window size. Negative or non-finite samples become 0.
    pub fn new(height: f32, width: f32) -> Self {
        Self {
            height: sanitize(height),
            width: sanitize(width),
        }
    }
}

/// Divider offsets in pixels.
///
/// `horizontal` is the offset from the top of the horizontal divider's leading
/// edge; `vertical` is the offset from the left of the vertical divider's
/// leading edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DividerPositions {
    pub horizontal: f32,
    pub vertical: f32,
}

/// Divider positions as a fraction of the window dimension on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SplitRatios {
    pub horizontal: f32,
    pub vertical: f32,
}

impl Default for SplitRatios {
    fn default() -> Self {
        Self {
            horizontal: 0.5,
            vertical: 0.5,
        }
    }
}

/// A state transition produced by the drag or resize collaborators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutEvent {
    /// The horizontal divider was dragged; only `y` is used.
    HorizontalDrag(DragPosition),
    /// The vertical divider was dragged; only `x` is used.
    VerticalDrag(DragPosition),
    /// The center handle was dragged; both axes move together.
    CenterDrag(DragPosition),
    /// A new window size sample arrived.
    Resize(WindowSize),
}

/// The single source of truth for the crosshair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutState {
    pub window: WindowSize,
    pub dividers: DividerPositions,
    pub ratios: SplitRatios,
}

impl LayoutState {
    /// Centered crosshair for the given window.
    pub fn new(window: WindowSize) -> Self {
        Self::with_ratios(window, SplitRatios::default())
    }

    /// Crosshair placed at the given ratios of the window.
    pub fn with_ratios(window: WindowSize, ratios: SplitRatios) -> Self {
        let window = WindowSize::new(window.height, window.width);
        let dividers = DividerPositions {
            horizontal: clamp_position(ratios.horizontal * window.height, window.height),
            vertical: clamp_position(ratios.vertical * window.width, window.width),
        };
        Self {
            window,
            dividers,
            ratios: ratios_for(window, dividers, ratios),
        }
    }

    /// Return the state produced by `event`, leaving `self` untouched.
    pub fn next(&self, event: LayoutEvent, strategy: ResizeStrategy) -> Self {
        match event {
            LayoutEvent::HorizontalDrag(pos) => drag::drag_horizontal(self, pos),
            LayoutEvent::VerticalDrag(pos) => drag::drag_vertical(self, pos),
            LayoutEvent::CenterDrag(pos) => drag::drag_center(self, pos),
            LayoutEvent::Resize(size) => resize::reconcile(self, size, strategy),
        }
    }

    /// Apply `event` in place. The whole state is replaced in one assignment,
    /// so observers never see a half-updated crosshair.
    pub fn apply(&mut self, event: LayoutEvent, strategy: ResizeStrategy) {
        *self = self.next(event, strategy);
    }

    /// Rebuild the state with new positions, clamping them and refreshing the ratios.
    pub(crate) fn with_positions(&self, window: WindowSize, horizontal: f32, vertical: f32) -> Self {
        let dividers = DividerPositions {
            horizontal: clamp_position(horizontal, window.height),
            vertical: clamp_position(vertical, window.width),
        };
        Self {
            window,
            dividers,
            ratios: ratios_for(window, dividers, self.ratios),
        }
    }
}

/// Clamp a divider position into `[0, dimension - DIVIDER_THICKNESS]`.
pub fn clamp_position(position: f32, dimension: f32) -> f32 {
    let upper = (dimension - DIVIDER_THICKNESS).max(0.0);
    if position.is_nan() {
        return 0.0;
    }
    position.clamp(0.0, upper)
}

fn ratios_for(window: WindowSize, dividers: DividerPositions, previous: SplitRatios) -> SplitRatios {
    SplitRatios {
        horizontal: ratio_of(dividers.horizontal, window.height).unwrap_or(previous.horizontal),
        vertical: ratio_of(dividers.vertical, window.width).unwrap_or(previous.vertical),
    }
}

// An axis with no room beyond the divider pins it at 0 and carries no
// proportion; the caller keeps the last known one.
fn ratio_of(position: f32, dimension: f32) -> Option<f32> {
    (dimension > DIVIDER_THICKNESS).then(|| position / dimension)
}

fn sanitize(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
