use crate::config::HeaderConfig;

/// One reading of the scroll position and how far the page can scroll.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollSample {
    pub position: f64,
    pub max_scrollable: f64,
}

impl ScrollSample {
    pub fn new(position: f64, max_scrollable: f64) -> Self {
        Self {
            position: non_negative(position),
            max_scrollable: non_negative(max_scrollable),
        }
    }

    /// `max_scrollable` is `document_height - viewport_height`; short pages
    /// end up with 0.
    pub fn measure(position: f64, document_height: f64, viewport_height: f64) -> Self {
        Self::new(position, document_height - viewport_height)
    }

    /// How far through the scrollable range we are, always within [0, 1].
    pub fn ratio(&self) -> f64 {
        if self.max_scrollable > 0.0 {
            (self.position / self.max_scrollable).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderVisualState {
    pub solid: bool,
    pub hidden: bool,
}

/// Inputs the header rule needs beyond the two positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderContext {
    pub viewport_width: f64,
    pub menu_open: bool,
    /// False under reduced motion: the header never hides.
    pub hide_enabled: bool,
}

impl HeaderVisualState {
    pub fn derive(
        previous: f64,
        position: f64,
        context: HeaderContext,
        thresholds: &HeaderConfig,
    ) -> Self {
        let solid = position > thresholds.solid_after;

        let moving_down = position > previous;
        let hidden = context.hide_enabled
            && context.viewport_width >= thresholds.desktop_min_width
            && !context.menu_open
            && position > thresholds.hide_after
            && moving_down;

        Self { solid, hidden }
    }
}
