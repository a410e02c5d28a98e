//! Where scroll samples come from: the browser's own scroll position, or an
//! eased virtual position that trails wheel input.

use crate::config::SmoothConfig;
use crate::scroll::sample::ScrollSample;
use crate::scroll::sync::SyncFeatures;

/// Notification emitted by the smoothed source once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEvent {
    pub scroll: f64,
    pub limit: f64,
}

impl From<ScrollEvent> for ScrollSample {
    fn from(event: ScrollEvent) -> Self {
        ScrollSample::new(event.scroll, event.limit)
    }
}

pub trait ScrollSampleSource {
    /// Produce this frame's sample from the browser's measured reading.
    fn next_sample(&mut self, measured: ScrollSample) -> ScrollSample;

    /// True while the source needs further frames without new input.
    fn is_animating(&self) -> bool;

    fn features(&self) -> SyncFeatures;

    /// Offer a wheel delta in pixels. Returns true when the source took it
    /// over and the browser's default scrolling must be suppressed.
    fn wheel(&mut self, _delta: f64) -> bool {
        false
    }

    /// Window position this source wants applied after a frame, if it
    /// drives the window itself.
    fn driven_position(&self) -> Option<f64> {
        None
    }
}

pub struct NativeScroll {
    features: SyncFeatures,
}

impl NativeScroll {
    pub fn new(reduced_motion: bool) -> Self {
        let features = if reduced_motion {
            SyncFeatures::reduced()
        } else {
            SyncFeatures::full()
        };
        Self { features }
    }
}

impl ScrollSampleSource for NativeScroll {
    fn next_sample(&mut self, measured: ScrollSample) -> ScrollSample {
        measured
    }

    fn is_animating(&self) -> bool {
        false
    }

    fn features(&self) -> SyncFeatures {
        self.features
    }
}

/// Eases a virtual scroll position toward a wheel-driven target by a fixed
/// factor per frame.
pub struct SmoothScroll {
    current: f64,
    target: f64,
    limit: f64,
    lerp: f64,
    settle_epsilon: f64,
}

impl SmoothScroll {
    pub fn new(config: &SmoothConfig, initial: ScrollSample) -> Self {
        Self {
            current: initial.position.min(initial.max_scrollable),
            target: initial.position.min(initial.max_scrollable),
            limit: initial.max_scrollable,
            lerp: config.lerp,
            settle_epsilon: config.settle_epsilon,
        }
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Advance one frame and report where the virtual position is.
    pub fn step(&mut self) -> ScrollEvent {
        let gap = self.target - self.current;
        if gap.abs() <= self.settle_epsilon {
            self.current = self.target;
        } else {
            self.current += gap * self.lerp;
        }
        ScrollEvent {
            scroll: self.current,
            limit: self.limit,
        }
    }

    fn set_limit(&mut self, limit: f64) {
        self.limit = limit;
        self.target = self.target.min(limit);
        self.current = self.current.min(limit);
    }
}

impl ScrollSampleSource for SmoothScroll {
    fn next_sample(&mut self, measured: ScrollSample) -> ScrollSample {
        self.set_limit(measured.max_scrollable);

        if self.is_animating() {
            return self.step().into();
        }

        // Settled: keyboard, scrollbar and anchor jumps move the page natively.
        self.current = measured.position.min(self.limit);
        self.target = self.current;
        ScrollEvent {
            scroll: self.current,
            limit: self.limit,
        }
        .into()
    }

    fn is_animating(&self) -> bool {
        self.current != self.target
    }

    fn features(&self) -> SyncFeatures {
        SyncFeatures::full()
    }

    fn wheel(&mut self, delta: f64) -> bool {
        if self.limit <= 0.0 || !delta.is_finite() {
            return false;
        }
        self.target = (self.target + delta).clamp(0.0, self.limit);
        true
    }

    fn driven_position(&self) -> Option<f64> {
        Some(self.current)
    }
}

/// Pick the sample source for this page. Reduced motion always wins over
/// the smooth-scroll setting.
pub fn select_source(
    reduced_motion: bool,
    config: &SmoothConfig,
    initial: ScrollSample,
) -> Box<dyn ScrollSampleSource> {
    if config.enabled && !reduced_motion {
        Box::new(SmoothScroll::new(config, initial))
    } else {
        Box::new(NativeScroll::new(reduced_motion))
    }
}
