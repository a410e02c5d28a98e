//! Coalesces raw scroll/resize events into at most one update per frame.

#[derive(Debug, Default)]
pub struct FrameGate<T> {
    pending: bool,
    latest: Option<T>,
}

impl<T> FrameGate<T> {
    pub fn new() -> Self {
        Self {
            pending: false,
            latest: None,
        }
    }

    /// Record an input. Returns true when the caller must schedule a frame
    /// callback, false when one is already queued.
    pub fn offer(&mut self, input: T) -> bool {
        self.latest = Some(input);
        if self.pending {
            false
        } else {
            self.pending = true;
            true
        }
    }

    /// Ask for a frame without a new input (e.g. an easing step).
    pub fn poke(&mut self) -> bool {
        if self.pending {
            false
        } else {
            self.pending = true;
            true
        }
    }

    /// Called from the frame callback: clears the pending flag and hands
    /// back the most recent input, if any arrived since the last frame.
    pub fn take(&mut self) -> Option<T> {
        self.pending = false;
        self.latest.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
