// Resize reconciliation: rebalance divider positions for a new window size.

use super::{LayoutState, WindowSize};

/// How divider positions follow a window resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeStrategy {
    /// Keep each divider at the same fraction of its axis.
    #[default]
    Proportional,
    /// Shift each divider by the change in its axis dimension.
    FixedOffset,
    /// Leave dividers where they are; the far quadrants absorb the change.
    FixedPixel,
}

impl ResizeStrategy {
    /// All strategies, in config-name order.
    pub fn all() -> &'static [ResizeStrategy] {
        &[
            ResizeStrategy::Proportional,
            ResizeStrategy::FixedOffset,
            ResizeStrategy::FixedPixel,
        ]
    }

    /// Name used in the config file.
    pub fn name(&self) -> &'static str {
        match self {
            ResizeStrategy::Proportional => "proportional",
            ResizeStrategy::FixedOffset => "fixed_offset",
            ResizeStrategy::FixedPixel => "fixed_pixel",
        }
    }

    /// Look up a strategy by its config name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.name() == name)
    }
}

/// Produce the layout for `new_size`, moving dividers per `strategy`.
///
/// Positions are clamped to the new window and the ratios are recomputed from
/// the resulting positions, ready for the next sample.
pub fn reconcile(state: &LayoutState, new_size: WindowSize, strategy: ResizeStrategy) -> LayoutState {
    let new_size = WindowSize::new(new_size.height, new_size.width);
    let old = state.window;
    let pos = state.dividers;

    let (horizontal, vertical) = match strategy {
        ResizeStrategy::Proportional => (
            state.ratios.horizontal * new_size.height,
            state.ratios.vertical * new_size.width,
        ),
        ResizeStrategy::FixedOffset => (
            pos.horizontal + (new_size.height - old.height),
            pos.vertical + (new_size.width - old.width),
        ),
        ResizeStrategy::FixedPixel => (pos.horizontal, pos.vertical),
    };

    let next = state.with_positions(new_size, horizontal, vertical);
    log::trace!(
        "Reconciled {}x{} -> {}x{} ({}): h={:.1} v={:.1}",
        old.width,
        old.height,
        new_size.width,
        new_size.height,
        strategy.name(),
        next.dividers.horizontal,
        next.dividers.vertical
    );
    next
}
