// Window creation and event loop management for QuadView.

use anyhow::Context;
use std::path::PathBuf;
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy};
use winit::window::{CursorIcon, Window, WindowAttributes, WindowId};

use crate::config::types::{Config, ConfigDelta, WindowConfig};
use crate::config::watcher::{ConfigWatcher, UserEvent};
use crate::layout::geometry::{DragSegment, LayoutFrame};
use crate::layout::interaction::{CrosshairInteraction, CursorType, InteractionEffect};
use crate::layout::{LayoutEvent, LayoutState, WindowSize};

/// Build a `WindowAttributes` from the window section of the config.
pub fn window_attributes(config: &WindowConfig) -> WindowAttributes {
    Window::default_attributes()
        .with_title(config.title.clone())
        .with_inner_size(LogicalSize::new(config.width, config.height))
        .with_resizable(config.resizable)
        .with_decorations(true)
}

/// Convert a physical window size into the layout's window size.
pub fn window_size_from_physical(size: PhysicalSize<u32>) -> WindowSize {
    WindowSize::new(size.height as f32, size.width as f32)
}

/// Window title showing the quadrant sizes, e.g. `QuadView — 636×356 | 636×356 / ...`.
pub fn layout_title(base: &str, frame: &LayoutFrame, active: Option<DragSegment>) -> String {
    let q = &frame.quadrants;
    let fmt = |r: crate::layout::geometry::QuadrantRect| format!("{:.0}×{:.0}", r.width, r.height);
    let mut title = format!(
        "{base} — {} | {} / {} | {}",
        fmt(q.upper_left),
        fmt(q.upper_right),
        fmt(q.lower_left),
        fmt(q.lower_right)
    );
    if let Some(segment) = active {
        title.push_str(&format!(" [{segment:?}]"));
    }
    title
}

fn cursor_icon(cursor: CursorType) -> CursorIcon {
    match cursor {
        CursorType::Default => CursorIcon::Default,
        CursorType::EwResize => CursorIcon::EwResize,
        CursorType::NsResize => CursorIcon::NsResize,
        CursorType::Move => CursorIcon::Move,
    }
}

/// Main application state implementing the winit event loop handler.
pub struct App {
    config: Config,
    config_path: Option<PathBuf>,
    window: Option<Arc<Window>>,
    layout: LayoutState,
    interaction: CrosshairInteraction,
    proxy: Option<EventLoopProxy<UserEvent>>,
    watcher: Option<ConfigWatcher>,
}

impl App {
    /// Create the app. `config_path`, when given, is watched for live reloads
    /// while the window is open.
    pub fn new(config: Config, config_path: Option<PathBuf>) -> Self {
        let initial = WindowSize::new(config.window.height as f32, config.window.width as f32);
        Self {
            layout: LayoutState::with_ratios(initial, config.layout.initial_ratios()),
            interaction: CrosshairInteraction::new(config.interaction.hit_margin),
            config,
            config_path,
            window: None,
            proxy: None,
            watcher: None,
        }
    }

    /// Get the layout state (for testing).
    pub fn layout(&self) -> &LayoutState {
        &self.layout
    }

    /// Get the interaction state machine (for testing).
    pub fn interaction(&self) -> &CrosshairInteraction {
        &self.interaction
    }

    /// Resolve the current frame from scratch.
    pub fn frame(&self) -> LayoutFrame {
        LayoutFrame::resolve(&self.layout)
    }

    /// Handle a window size sample.
    pub fn handle_resize(&mut self, size: WindowSize) {
        log::debug!("Window resized to {}x{}", size.width, size.height);
        self.apply_layout_event(LayoutEvent::Resize(size));
        // A drag in progress keeps its capture; the next move re-clamps.
    }

    /// Handle a pointer move in physical pixels.
    pub fn handle_cursor_moved(&mut self, x: f32, y: f32) {
        let effect = self.interaction.on_cursor_moved(x, y, &self.layout);
        self.apply_interaction_effect(effect);
    }

    /// Handle a left-button press or release.
    pub fn handle_left_button(&mut self, state: ElementState) {
        let effect = match state {
            ElementState::Pressed => self.interaction.on_mouse_press(&self.layout),
            ElementState::Released => self.interaction.on_mouse_release(),
        };
        self.apply_interaction_effect(effect);
    }

    /// Drop any hover or drag capture (pointer left, focus lost).
    pub fn handle_pointer_lost(&mut self) {
        let effect = self.interaction.cancel();
        self.apply_interaction_effect(effect);
    }

    /// Apply a reloaded config to the live state.
    pub fn apply_config(&mut self, config: Config, delta: ConfigDelta) {
        if delta.interaction_changed {
            self.interaction.set_hit_margin(config.interaction.hit_margin);
        }
        if delta.layout_changed {
            log::info!(
                "Resize strategy is now {}",
                config.layout.resize_strategy.name()
            );
        }
        if delta.window_changed {
            if let Some(window) = &self.window {
                window.set_resizable(config.window.resizable);
            }
        }
        self.config = config;
        self.request_redraw();
    }

    /// Apply an InteractionEffect to the app state.
    pub(crate) fn apply_interaction_effect(&mut self, effect: InteractionEffect) {
        match effect {
            InteractionEffect::None => {}
            InteractionEffect::SetCursor(cursor) => self.set_cursor(cursor),
            InteractionEffect::BeginDrag(segment) => {
                self.set_cursor(CursorType::for_segment(segment));
                self.request_redraw();
            }
            InteractionEffect::UpdateLayout(event) => self.apply_layout_event(event),
            InteractionEffect::EndDrag(cursor) => {
                self.set_cursor(cursor);
                self.request_redraw();
            }
        }
    }

    fn apply_layout_event(&mut self, event: LayoutEvent) {
        self.layout.apply(event, self.config.layout.resize_strategy);
        log::trace!(
            "Layout now h={:.1} v={:.1} in {}x{}",
            self.layout.dividers.horizontal,
            self.layout.dividers.vertical,
            self.layout.window.width,
            self.layout.window.height
        );
        self.request_redraw();
    }

    fn set_cursor(&self, cursor: CursorType) {
        if let Some(window) = &self.window {
            window.set_cursor(cursor_icon(cursor));
        }
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    /// Start watching the config file, forwarding reloads to the event loop.
    fn start_config_watcher(&mut self) {
        let (Some(path), Some(proxy)) = (self.config_path.clone(), self.proxy.clone()) else {
            return;
        };
        let watcher = ConfigWatcher::new(&path, self.config.clone(), proxy);
        match watcher {
            Ok(watcher) => {
                log::info!("Watching {} for changes", path.display());
                self.watcher = Some(watcher);
            }
            Err(e) => log::warn!("Config hot reload disabled: {e}"),
        }
    }

    /// Run the application event loop. This blocks until the window is closed.
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = EventLoop::<UserEvent>::with_user_event()
            .build()
            .context("failed to create event loop")?;
        self.proxy = Some(event_loop.create_proxy());
        event_loop.run_app(&mut self).context("event loop failed")?;
        Ok(())
    }
}

impl ApplicationHandler<UserEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = window_attributes(&self.config.window);
        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                log::info!(
                    "Window created: {}x{} (scale factor: {:.2})",
                    size.width,
                    size.height,
                    window.scale_factor()
                );
                self.layout = LayoutState::with_ratios(
                    window_size_from_physical(size),
                    self.config.layout.initial_ratios(),
                );
                self.window = Some(Arc::new(window));
                self.start_config_watcher();
                self.request_redraw();
            }
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
            }
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: UserEvent) {
        match event {
            UserEvent::ConfigReloaded(config, delta) => self.apply_config(config, delta),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Window close requested");
                // Release the watcher before the loop goes away.
                self.watcher = None;
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.handle_resize(window_size_from_physical(size));
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.handle_cursor_moved(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.handle_left_button(state);
            }
            WindowEvent::CursorLeft { .. } | WindowEvent::Focused(false) => {
                self.handle_pointer_lost();
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                log::debug!("Scale factor changed to {scale_factor:.2}");
            }
            WindowEvent::RedrawRequested => {
                let frame = self.frame();
                log::trace!("Frame: {:?}", frame.quadrants);
                if let Some(window) = &self.window {
                    window.set_title(&layout_title(
                        &self.config.window.title,
                        &frame,
                        self.interaction.active_segment(),
                    ));
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::resize::ResizeStrategy;
    use crate::layout::DIVIDER_THICKNESS;

    fn app() -> App {
        let mut config = Config::default();
        config.window.width = 1000.0;
        config.window.height = 800.0;
        App::new(config, None)
    }

    // ── Window attributes ───────────────────────────────────────────

    #[test]
    fn window_attributes_has_correct_inner_size() {
        let attrs = window_attributes(&WindowConfig::default());
        let expected = LogicalSize::new(1280.0, 720.0);
        assert_eq!(attrs.inner_size, Some(expected.into()));
    }

    #[test]
    fn window_attributes_has_correct_title() {
        let attrs = window_attributes(&WindowConfig::default());
        assert_eq!(attrs.title, "QuadView");
    }

    #[test]
    fn window_attributes_is_resizable() {
        let attrs = window_attributes(&WindowConfig::default());
        assert!(attrs.resizable);
    }

    #[test]
    fn window_attributes_non_resizable() {
        let config = WindowConfig {
            resizable: false,
            ..WindowConfig::default()
        };
        let attrs = window_attributes(&config);
        assert!(!attrs.resizable);
    }

    #[test]
    fn physical_size_maps_to_window_size() {
        let size = window_size_from_physical(PhysicalSize::new(1280, 720));
        assert_eq!(size, WindowSize::new(720.0, 1280.0));
    }

    // ── App state ───────────────────────────────────────────────────

    #[test]
    fn run_reports_failures_as_anyhow_errors() {
        // Event loop errors keep their source so `{e:#}` prints the cause.
        let _: fn(App) -> anyhow::Result<()> = App::run;
    }

    #[test]
    fn app_starts_with_no_window() {
        let app = app();
        assert!(app.window.is_none());
        assert!(app.watcher.is_none());
    }

    #[test]
    fn app_starts_with_configured_ratios() {
        let mut config = Config::default();
        config.window.width = 1000.0;
        config.window.height = 800.0;
        config.layout.initial_vertical_ratio = 0.25;
        let app = App::new(config, None);
        assert_eq!(app.layout().dividers.vertical, 250.0);
        assert_eq!(app.layout().dividers.horizontal, 400.0);
    }

    #[test]
    fn resize_uses_configured_strategy() {
        let mut app = app();
        app.handle_resize(WindowSize::new(1000.0, 1000.0));
        assert_eq!(app.layout().dividers.horizontal, 500.0);

        let mut config = app.config.clone();
        config.layout.resize_strategy = ResizeStrategy::FixedPixel;
        let delta = app.config.diff(&config);
        app.apply_config(config, delta);
        app.handle_resize(WindowSize::new(2000.0, 1000.0));
        assert_eq!(app.layout().dividers.horizontal, 500.0);
    }

    #[test]
    fn pointer_drag_moves_vertical_divider() {
        let mut app = app();
        app.handle_cursor_moved(504.0, 100.0);
        app.handle_left_button(ElementState::Pressed);
        app.handle_cursor_moved(304.0, 120.0);
        assert_eq!(app.layout().dividers.vertical, 300.0);
        assert_eq!(app.layout().dividers.horizontal, 400.0);
        app.handle_left_button(ElementState::Released);
        assert!(!app.interaction().is_dragging());
    }

    #[test]
    fn pointer_drag_clamps_at_window_edge() {
        let mut app = app();
        app.handle_cursor_moved(100.0, 404.0);
        app.handle_left_button(ElementState::Pressed);
        app.handle_cursor_moved(100.0, 5000.0);
        assert_eq!(app.layout().dividers.horizontal, 800.0 - DIVIDER_THICKNESS);
    }

    #[test]
    fn pointer_lost_ends_drag() {
        let mut app = app();
        app.handle_cursor_moved(504.0, 404.0);
        app.handle_left_button(ElementState::Pressed);
        assert!(app.interaction().is_dragging());
        app.handle_pointer_lost();
        assert!(!app.interaction().is_dragging());
        // Further moves no longer drag.
        app.handle_cursor_moved(10.0, 10.0);
        assert_eq!(app.layout().dividers.vertical, 500.0);
    }

    #[test]
    fn reload_updates_hit_margin() {
        let mut app = app();
        let mut config = app.config.clone();
        config.interaction.hit_margin = 20.0;
        let delta = app.config.diff(&config);
        app.apply_config(config, delta);
        // 15px left of the vertical divider now hovers it.
        app.handle_cursor_moved(485.0, 100.0);
        assert_eq!(app.interaction().active_segment(), Some(DragSegment::Top));
    }

    // ── Title readout ───────────────────────────────────────────────

    #[test]
    fn layout_title_lists_quadrant_sizes() {
        let frame = app().frame();
        let title = layout_title("QuadView", &frame, None);
        assert_eq!(title, "QuadView — 496×396 | 496×396 / 496×396 | 496×396");
    }

    #[test]
    fn layout_title_marks_active_segment() {
        let frame = app().frame();
        let title = layout_title("QuadView", &frame, Some(DragSegment::Center));
        assert!(title.ends_with("[Center]"));
    }
}
