// Geometry resolution: quadrant sizes and divider rects from a LayoutState.

use serde::Serialize;

use super::{LayoutState, WindowSize, DividerPositions, DIVIDER_THICKNESS, HALF_DIVIDER_THICKNESS};

/// One of the four panes around the crosshair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Quadrant {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl Quadrant {
    pub fn all() -> &'static [Quadrant] {
        &[
            Quadrant::UpperLeft,
            Quadrant::UpperRight,
            Quadrant::LowerLeft,
            Quadrant::LowerRight,
        ]
    }
}

/// Size of a quadrant in pixels. Placement is left to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuadrantRect {
    pub height: f32,
    pub width: f32,
}

/// A rectangle in physical pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check if a point (px, py) is inside this rectangle.
    pub fn contains_point(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }

    /// Grow the rect by `dx` on the left and right and `dy` on the top and bottom.
    pub fn expand(&self, dx: f32, dy: f32) -> Self {
        Rect::new(
            self.x - dx,
            self.y - dy,
            self.width + dx * 2.0,
            self.height + dy * 2.0,
        )
    }
}

/// A draggable piece of the crosshair.
///
/// `Top` and `Bottom` are the halves of the vertical divider, `Left` and
/// `Right` the halves of the horizontal divider, `Center` their intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DragSegment {
    Top,
    Right,
    Bottom,
    Left,
    Center,
}

impl DragSegment {
    /// All segments in hit-test priority order: the center handle wins.
    pub fn hit_order() -> &'static [DragSegment] {
        &[
            DragSegment::Center,
            DragSegment::Top,
            DragSegment::Right,
            DragSegment::Bottom,
            DragSegment::Left,
        ]
    }

    /// Whether dragging this segment moves the vertical divider (x axis).
    pub fn moves_vertical(&self) -> bool {
        matches!(self, DragSegment::Top | DragSegment::Bottom | DragSegment::Center)
    }

    /// Whether dragging this segment moves the horizontal divider (y axis).
    pub fn moves_horizontal(&self) -> bool {
        matches!(self, DragSegment::Left | DragSegment::Right | DragSegment::Center)
    }
}

/// Positioned rects for each divider segment and the center handle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DividerRects {
    pub top: Rect,
    pub right: Rect,
    pub bottom: Rect,
    pub left: Rect,
    pub center: Rect,
}

impl DividerRects {
    pub fn get(&self, segment: DragSegment) -> Rect {
        match segment {
            DragSegment::Top => self.top,
            DragSegment::Right => self.right,
            DragSegment::Bottom => self.bottom,
            DragSegment::Left => self.left,
            DragSegment::Center => self.center,
        }
    }
}

/// Resolved sizes for all four quadrants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quadrants {
    pub upper_left: QuadrantRect,
    pub upper_right: QuadrantRect,
    pub lower_left: QuadrantRect,
    pub lower_right: QuadrantRect,
}

impl Quadrants {
    pub fn get(&self, quadrant: Quadrant) -> QuadrantRect {
        match quadrant {
            Quadrant::UpperLeft => self.upper_left,
            Quadrant::UpperRight => self.upper_right,
            Quadrant::LowerLeft => self.lower_left,
            Quadrant::LowerRight => self.lower_right,
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutFrame {
    pub window: WindowSize,
    pub dividers: DividerPositions,
    pub quadrants: Quadrants,
    pub divider_rects: DividerRects,
}

impl LayoutFrame {
    /// Resolve the full frame from scratch.
    pub fn resolve(state: &LayoutState) -> Self {
        Self {
            window: state.window,
            dividers: state.dividers,
            quadrants: resolve_quadrants(state),
            divider_rects: divider_rects(state),
        }
    }
}

/// Size of a single quadrant, deflated by half a divider at each seam.
pub fn resolve_quadrant(quadrant: Quadrant, state: &LayoutState) -> QuadrantRect {
    let WindowSize { height, width } = state.window;
    let DividerPositions {
        horizontal,
        vertical,
    } = state.dividers;

    let (h, w) = match quadrant {
        Quadrant::UpperLeft => (horizontal, vertical),
        Quadrant::UpperRight => (horizontal, width - vertical),
        Quadrant::LowerLeft => (height - horizontal, vertical),
        Quadrant::LowerRight => (height - horizontal, width - vertical),
    };

    QuadrantRect {
        height: (h - HALF_DIVIDER_THICKNESS).max(0.0),
        width: (w - HALF_DIVIDER_THICKNESS).max(0.0),
    }
}

/// Sizes of all four quadrants.
pub fn resolve_quadrants(state: &LayoutState) -> Quadrants {
    Quadrants {
        upper_left: resolve_quadrant(Quadrant::UpperLeft, state),
        upper_right: resolve_quadrant(Quadrant::UpperRight, state),
        lower_left: resolve_quadrant(Quadrant::LowerLeft, state),
        lower_right: resolve_quadrant(Quadrant::LowerRight, state),
    }
}

/// Divider segment rects. Each bar starts at its divider's leading edge and
/// runs from the window edge up to the center handle, or from the far side of
/// the handle out to the opposite window edge.
pub fn divider_rects(state: &LayoutState) -> DividerRects {
    let WindowSize { height, width } = state.window;
    let DividerPositions {
        horizontal,
        vertical,
    } = state.dividers;
    let past_center_x = vertical + DIVIDER_THICKNESS;
    let past_center_y = horizontal + DIVIDER_THICKNESS;

    DividerRects {
        top: Rect::new(vertical, 0.0, DIVIDER_THICKNESS, horizontal),
        bottom: Rect::new(
            vertical,
            past_center_y,
            DIVIDER_THICKNESS,
            (height - past_center_y).max(0.0),
        ),
        left: Rect::new(0.0, horizontal, vertical, DIVIDER_THICKNESS),
        right: Rect::new(
            past_center_x,
            horizontal,
            (width - past_center_x).max(0.0),
            DIVIDER_THICKNESS,
        ),
        center: Rect::new(vertical, horizontal, DIVIDER_THICKNESS, DIVIDER_THICKNESS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const T2: f32 = HALF_DIVIDER_THICKNESS;

    fn state(height: f32, width: f32, horizontal: f32, vertical: f32) -> LayoutState {
        LayoutState::new(WindowSize::new(height, width)).with_positions(
            WindowSize::new(height, width),
            horizontal,
            vertical,
        )
    }

    #[rstest]
    #[case(Quadrant::UpperLeft, 300.0 - T2, 400.0 - T2)]
    #[case(Quadrant::UpperRight, 300.0 - T2, 600.0 - T2)]
    #[case(Quadrant::LowerLeft, 500.0 - T2, 400.0 - T2)]
    #[case(Quadrant::LowerRight, 500.0 - T2, 600.0 - T2)]
    fn quadrant_table(#[case] quadrant: Quadrant, #[case] height: f32, #[case] width: f32) {
        let s = state(800.0, 1000.0, 300.0, 400.0);
        assert_eq!(resolve_quadrant(quadrant, &s), QuadrantRect { height, width });
    }

    #[test]
    fn divider_at_origin_collapses_leading_quadrants_to_zero() {
        let s = state(800.0, 1000.0, 0.0, 0.0);
        let q = resolve_quadrants(&s);
        assert_eq!(q.upper_left, QuadrantRect { height: 0.0, width: 0.0 });
        assert_eq!(q.upper_right.height, 0.0);
        assert_eq!(q.lower_left.width, 0.0);
        assert_eq!(q.lower_right.width, 1000.0 - T2);
    }

    #[test]
    fn empty_window_resolves_to_zero_sizes() {
        let s = LayoutState::new(WindowSize::new(0.0, 0.0));
        for quadrant in Quadrant::all() {
            assert_eq!(
                resolve_quadrant(*quadrant, &s),
                QuadrantRect { height: 0.0, width: 0.0 }
            );
        }
    }

    #[test]
    fn widths_and_heights_sum_to_window_minus_one_thickness() {
        let s = state(720.0, 1280.0, 123.0, 987.0);
        let q = resolve_quadrants(&s);
        assert_eq!(q.upper_left.width + q.upper_right.width, 1280.0 - DIVIDER_THICKNESS);
        assert_eq!(q.lower_left.width + q.lower_right.width, 1280.0 - DIVIDER_THICKNESS);
        assert_eq!(q.upper_left.height + q.lower_left.height, 720.0 - DIVIDER_THICKNESS);
        assert_eq!(q.upper_right.height + q.lower_right.height, 720.0 - DIVIDER_THICKNESS);
    }

    #[test]
    fn resolve_is_idempotent() {
        let s = state(800.0, 1000.0, 250.0, 640.0);
        assert_eq!(LayoutFrame::resolve(&s), LayoutFrame::resolve(&s));
    }

    #[test]
    fn center_handle_sits_at_intersection() {
        let s = state(800.0, 1000.0, 300.0, 400.0);
        let rects = divider_rects(&s);
        assert_eq!(
            rects.center,
            Rect::new(400.0, 300.0, DIVIDER_THICKNESS, DIVIDER_THICKNESS)
        );
    }

    #[test]
    fn divider_segments_meet_center_handle() {
        let s = state(800.0, 1000.0, 300.0, 400.0);
        let rects = divider_rects(&s);

        assert_eq!(rects.top, Rect::new(400.0, 0.0, DIVIDER_THICKNESS, 300.0));
        assert_eq!(rects.bottom, Rect::new(400.0, 308.0, DIVIDER_THICKNESS, 492.0));
        assert_eq!(rects.left, Rect::new(0.0, 300.0, 400.0, DIVIDER_THICKNESS));
        assert_eq!(rects.right, Rect::new(408.0, 300.0, 592.0, DIVIDER_THICKNESS));

        let c = rects.center;
        assert_eq!(rects.top.y + rects.top.height, c.y);
        assert_eq!(rects.bottom.y, c.y + c.height);
        assert_eq!(rects.left.x + rects.left.width, c.x);
        assert_eq!(rects.right.x, c.x + c.width);
    }

    #[rstest]
    #[case(400.0, 500.0)]
    #[case(0.0, 0.0)]
    #[case(792.0, 992.0)]
    #[case(3.0, 997.0)]
    fn divider_segments_stay_inside_window(#[case] horizontal: f32, #[case] vertical: f32) {
        let s = state(800.0, 1000.0, horizontal, vertical);
        let rects = divider_rects(&s);
        for segment in DragSegment::hit_order() {
            let r = rects.get(*segment);
            assert!(r.x >= 0.0 && r.y >= 0.0, "{segment:?} starts outside: {r:?}");
            assert!(r.width >= 0.0 && r.height >= 0.0, "{segment:?} negative: {r:?}");
            assert!(r.x + r.width <= 1000.0, "{segment:?} overflows width: {r:?}");
            assert!(r.y + r.height <= 800.0, "{segment:?} overflows height: {r:?}");
        }
    }

    #[test]
    fn rects_lookup_by_segment() {
        let s = state(800.0, 1000.0, 300.0, 400.0);
        let rects = divider_rects(&s);
        assert_eq!(rects.get(DragSegment::Center), rects.center);
        assert_eq!(rects.get(DragSegment::Left), rects.left);
    }

    #[test]
    fn segment_axes() {
        assert!(DragSegment::Top.moves_vertical());
        assert!(!DragSegment::Top.moves_horizontal());
        assert!(DragSegment::Left.moves_horizontal());
        assert!(!DragSegment::Left.moves_vertical());
        assert!(DragSegment::Center.moves_vertical() && DragSegment::Center.moves_horizontal());
    }

    #[test]
    fn rect_contains_and_expand() {
        let r = Rect::new(10.0, 10.0, 8.0, 100.0);
        assert!(r.contains_point(10.0, 10.0));
        assert!(!r.contains_point(18.0, 50.0));
        let wide = r.expand(4.0, 0.0);
        assert!(wide.contains_point(6.0, 50.0));
        assert!(wide.contains_point(21.0, 50.0));
        assert!(!wide.contains_point(21.0, 5.0));
    }

    #[test]
    fn frame_serializes_to_json() {
        let s = LayoutState::new(WindowSize::new(800.0, 1000.0));
        let json = serde_json::to_value(LayoutFrame::resolve(&s)).unwrap();
        assert_eq!(json["dividers"]["horizontal"], 400.0);
        assert_eq!(json["quadrants"]["upper_left"]["width"], 496.0);
    }
}
