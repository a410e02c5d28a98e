//! The per-frame scroll update, independent of the browser's event plumbing.

use crate::port::ScrollPort;
use crate::scroll::gate::FrameGate;
use crate::scroll::sample::ScrollSample;
use crate::scroll::source::ScrollSampleSource;
use crate::scroll::sync::ScrollSynchronizer;

/// The scrolling viewport: where the page is, and moving it.
pub trait ScrollWindow {
    fn measure(&self) -> ScrollSample;
    fn scroll_to(&self, position: f64);
}

/// Gate, sample source, synchronizer and page port, driven one frame at a
/// time by whoever owns the animation-frame callback.
pub struct ScrollLoop<P: ScrollPort> {
    sync: ScrollSynchronizer,
    source: Box<dyn ScrollSampleSource>,
    gate: FrameGate<ScrollSample>,
    port: P,
}

impl<P: ScrollPort> ScrollLoop<P> {
    pub fn new(sync: ScrollSynchronizer, source: Box<dyn ScrollSampleSource>, port: P) -> Self {
        Self {
            sync,
            source,
            gate: FrameGate::new(),
            port,
        }
    }

    /// A scroll or resize reading. True when a frame must be requested.
    pub fn offer(&mut self, sample: ScrollSample) -> bool {
        self.gate.offer(sample)
    }

    /// Wheel input in pixels. True when the source took it over and the
    /// browser default must be prevented.
    pub fn wheel(&mut self, delta: f64) -> bool {
        self.source.wheel(delta)
    }

    /// Ask for a frame without a new reading. True when one must be requested.
    pub fn poke(&mut self) -> bool {
        self.gate.poke()
    }

    /// Run one gated update. Returns true when another frame must be
    /// requested because the source is still easing.
    pub fn frame<W: ScrollWindow + ?Sized>(&mut self, window: &W) -> bool {
        let measured = self.gate.take().unwrap_or_else(|| window.measure());
        let sample = self.source.next_sample(measured);
        self.sync.apply(sample, &mut self.port);

        if let Some(position) = self.source.driven_position() {
            if position != measured.position {
                window.scroll_to(position);
            }
        }

        self.source.is_animating() && self.gate.poke()
    }

    pub fn is_smooth(&self) -> bool {
        self.source.driven_position().is_some()
    }

    pub fn synchronizer(&self) -> &ScrollSynchronizer {
        &self.sync
    }

    pub fn port(&self) -> &P {
        &self.port
    }
}
