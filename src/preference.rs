use log::debug;
use web_sys::Window;

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// User motion preference, read once at startup and fixed for the page's
/// lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotionPreference {
    pub reduced_motion: bool,
}

impl MotionPreference {
    pub fn read(window: &Window) -> Self {
        let reduced_motion = window
            .match_media(REDUCED_MOTION_QUERY)
            .ok()
            .flatten()
            .map(|query| query.matches())
            .unwrap_or(false);
        debug!("reduced motion: {}", reduced_motion);
        Self { reduced_motion }
    }
}
