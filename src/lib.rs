//! Scroll-driven behavior for a static marketing page: mobile menu, active
//! section highlighting, content reveal, scroll progress, a sticky header
//! that hides on downward scroll, parallax and optional eased scrolling.
//!
//! The decision logic (`scroll`, `menu`, `nav`, `reveal`) talks to the page
//! through small port traits and runs natively in tests; `dom`, `page` and
//! `app` bind it to the browser.

pub mod app;
pub mod config;
pub mod dom;
pub mod error;
pub mod menu;
pub mod nav;
pub mod page;
pub mod port;
pub mod preference;
pub mod reveal;
pub mod scroll;

pub use config::MotionConfig;
pub use error::MotionError;
pub use menu::{MenuController, MenuMirror};
pub use nav::{ActiveSectionTracker, SectionEntry};
pub use port::ScrollPort;
pub use reveal::{RevealPolicy, RevealSet};
pub use scroll::frame::{ScrollLoop, ScrollWindow};
pub use scroll::gate::FrameGate;
pub use scroll::sample::{HeaderVisualState, ScrollSample};
pub use scroll::source::{NativeScroll, ScrollEvent, ScrollSampleSource, SmoothScroll};
pub use scroll::sync::{ScrollSynchronizer, SyncFeatures};
