use log::Level;
use serde::Deserialize;

use crate::error::MotionError;

#[cfg(debug_assertions)]
pub fn default_log_level() -> Level {
    Level::Debug // Verbose console output when running a dev build
}

#[cfg(not(debug_assertions))]
pub fn default_log_level() -> Level {
    Level::Info
}

/// Page-level tuning, read once at startup from
/// `<script type="application/json" data-motion-config>`.
/// Every field is optional in the JSON.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub header: HeaderConfig,
    pub progress: ProgressConfig,
    pub nav: NavConfig,
    pub reveal: RevealConfig,
    pub smooth: SmoothConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    /// Header turns solid once the page is scrolled past this many pixels.
    pub solid_after: f64,
    /// Header may hide on downward scroll only past this position.
    pub hide_after: f64,
    pub desktop_min_width: f64,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            solid_after: 20.0,
            hide_after: 400.0,
            desktop_min_width: 960.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStyle {
    #[default]
    ScaleX,
    Width,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    pub style: ProgressStyle,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub threshold: f64,
    pub root_margin: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            root_margin: "-20% 0px -40% 0px".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealPolicyKind {
    Immediate,
    Staggered,
    #[default]
    Observed,
    DeferredBatch,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub policy: RevealPolicyKind,
    pub threshold: f64,
    pub root_margin: String,
    pub step_ms: u32,
    pub cap_ms: u32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            policy: RevealPolicyKind::Observed,
            threshold: 0.1,
            root_margin: "0px 0px -8% 0px".to_string(),
            step_ms: 40,
            cap_ms: 120,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SmoothConfig {
    pub enabled: bool,
    pub lerp: f64,
    pub settle_epsilon: f64,
}

impl Default for SmoothConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            lerp: 0.1,
            settle_epsilon: 0.5,
        }
    }
}

impl MotionConfig {
    pub fn from_json(raw: &str) -> Result<Self, MotionError> {
        let config: MotionConfig = serde_json::from_str(raw)?;
        Ok(config.sanitized())
    }

    /// Clamp values the page author may have gotten wrong into usable ranges.
    pub fn sanitized(mut self) -> Self {
        let defaults = MotionConfig::default();

        self.header.solid_after = non_negative(self.header.solid_after);
        self.header.hide_after = non_negative(self.header.hide_after);
        self.header.desktop_min_width = non_negative(self.header.desktop_min_width);

        self.nav.threshold = unit_interval(self.nav.threshold, defaults.nav.threshold);
        self.reveal.threshold = unit_interval(self.reveal.threshold, defaults.reveal.threshold);

        // lerp of 0 would never move, above 1 overshoots
        if !self.smooth.lerp.is_finite() || self.smooth.lerp <= 0.0 {
            self.smooth.lerp = defaults.smooth.lerp;
        } else if self.smooth.lerp > 1.0 {
            self.smooth.lerp = 1.0;
        }
        if !self.smooth.settle_epsilon.is_finite() || self.smooth.settle_epsilon <= 0.0 {
            self.smooth.settle_epsilon = defaults.smooth.settle_epsilon;
        }

        self
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn unit_interval(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        fallback
    }
}
