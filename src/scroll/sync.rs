use log::trace;

use crate::config::HeaderConfig;
use crate::port::ScrollPort;
use crate::scroll::parallax;
use crate::scroll::sample::{HeaderContext, HeaderVisualState, ScrollSample};

/// Which scroll-driven effects are live for this page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncFeatures {
    pub parallax: bool,
    pub header_hide: bool,
}

impl SyncFeatures {
    pub fn full() -> Self {
        Self {
            parallax: true,
            header_hide: true,
        }
    }

    /// Feature set under reduced motion.
    pub fn reduced() -> Self {
        Self {
            parallax: false,
            header_hide: false,
        }
    }
}

/// Turns scroll samples into progress, header and parallax updates.
/// One instance per page; the previous position stays private to it.
pub struct ScrollSynchronizer {
    thresholds: HeaderConfig,
    features: SyncFeatures,
    previous: f64,
    header: Option<HeaderVisualState>,
}

impl ScrollSynchronizer {
    pub fn new(thresholds: HeaderConfig, features: SyncFeatures) -> Self {
        Self {
            thresholds,
            features,
            previous: 0.0,
            header: None,
        }
    }

    /// Seed the direction tracking with where the page already is, so the
    /// startup sample is not mistaken for a downward jump.
    pub fn with_initial_position(mut self, position: f64) -> Self {
        self.previous = ScrollSample::new(position, 0.0).position;
        self
    }

    pub fn features(&self) -> SyncFeatures {
        self.features
    }

    pub fn previous_position(&self) -> f64 {
        self.previous
    }

    /// Last header state that was written, if any sample has run yet.
    pub fn header_state(&self) -> Option<HeaderVisualState> {
        self.header
    }

    pub fn apply<P: ScrollPort + ?Sized>(&mut self, sample: ScrollSample, port: &mut P) {
        port.set_progress(sample.ratio());

        let context = HeaderContext {
            viewport_width: port.viewport_width(),
            menu_open: port.menu_open(),
            hide_enabled: self.features.header_hide,
        };
        let header = HeaderVisualState::derive(self.previous, sample.position, context, &self.thresholds);
        port.set_header(header);
        self.header = Some(header);

        if self.features.parallax {
            let offsets: Vec<f64> = port
                .parallax_speeds()
                .iter()
                .map(|speed| parallax::offset(sample.position, *speed))
                .collect();
            for (index, offset) in offsets.into_iter().enumerate() {
                port.set_parallax_offset(index, offset);
            }
        }

        trace!(
            "scroll sync: position={} ratio={:.3} header={:?}",
            sample.position,
            sample.ratio(),
            header
        );
        self.previous = sample.position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        width: f64,
        menu_open: bool,
        progress: Vec<f64>,
        header: Option<HeaderVisualState>,
        speeds: Vec<f64>,
        offsets: Vec<(usize, f64)>,
    }

    impl ScrollPort for Recorder {
        fn viewport_width(&self) -> f64 {
            self.width
        }
        fn menu_open(&self) -> bool {
            self.menu_open
        }
        fn set_progress(&mut self, ratio: f64) {
            self.progress.push(ratio);
        }
        fn set_header(&mut self, state: HeaderVisualState) {
            self.header = Some(state);
        }
        fn parallax_speeds(&self) -> &[f64] {
            &self.speeds
        }
        fn set_parallax_offset(&mut self, index: usize, offset: f64) {
            self.offsets.push((index, offset));
        }
    }

    fn desktop() -> Recorder {
        Recorder {
            width: 1440.0,
            ..Default::default()
        }
    }

    #[test]
    fn top_of_page_is_empty_progress_and_plain_header() {
        let mut port = desktop();
        let mut sync = ScrollSynchronizer::new(HeaderConfig::default(), SyncFeatures::full());
        sync.apply(ScrollSample::new(0.0, 1000.0), &mut port);

        assert_eq!(port.progress, vec![0.0]);
        assert_eq!(
            port.header,
            Some(HeaderVisualState {
                solid: false,
                hidden: false
            })
        );
    }

    #[test]
    fn direction_comes_from_previous_sample() {
        let thresholds = HeaderConfig {
            hide_after: 220.0,
            ..HeaderConfig::default()
        };
        let mut port = desktop();
        let mut sync = ScrollSynchronizer::new(thresholds, SyncFeatures::full()).with_initial_position(100.0);

        sync.apply(ScrollSample::new(250.0, 2000.0), &mut port);
        assert!(port.header.unwrap().hidden);

        sync.apply(ScrollSample::new(300.0, 2000.0), &mut port);
        assert!(port.header.unwrap().hidden);

        sync.apply(ScrollSample::new(250.0, 2000.0), &mut port);
        assert!(!port.header.unwrap().hidden);
        assert_eq!(sync.previous_position(), 250.0);
    }

    #[test]
    fn parallax_follows_position_when_enabled() {
        let mut port = Recorder {
            speeds: vec![0.5, 0.0, -0.2],
            ..desktop()
        };
        let mut sync = ScrollSynchronizer::new(HeaderConfig::default(), SyncFeatures::full());
        sync.apply(ScrollSample::new(100.0, 1000.0), &mut port);
        assert_eq!(port.offsets, vec![(0, 50.0), (1, 0.0), (2, -20.0)]);
    }

    #[test]
    fn reduced_features_skip_parallax_and_hiding() {
        let mut port = Recorder {
            speeds: vec![0.5],
            ..desktop()
        };
        let mut sync = ScrollSynchronizer::new(HeaderConfig::default(), SyncFeatures::reduced());
        sync.apply(ScrollSample::new(900.0, 3000.0), &mut port);
        assert!(port.offsets.is_empty());
        let header = port.header.unwrap();
        assert!(header.solid);
        assert!(!header.hidden);
    }

    #[test]
    fn open_menu_keeps_header_visible() {
        let mut port = Recorder {
            menu_open: true,
            ..desktop()
        };
        let mut sync = ScrollSynchronizer::new(HeaderConfig::default(), SyncFeatures::full());
        sync.apply(ScrollSample::new(2000.0, 3000.0), &mut port);
        assert!(!port.header.unwrap().hidden);
    }
}
