use pagemotion::config::{HeaderConfig, RevealConfig, RevealPolicyKind, SmoothConfig};
use std::cell::{Cell, RefCell};

use pagemotion::scroll::source::select_source;
use pagemotion::{
    ActiveSectionTracker, HeaderVisualState, MenuController, MenuMirror, NativeScroll, RevealPolicy,
    RevealSet, ScrollLoop, ScrollPort, ScrollSample, ScrollSampleSource, ScrollSynchronizer, ScrollWindow,
    SectionEntry, SmoothScroll, SyncFeatures,
};

#[derive(Default)]
struct FakePage {
    width: f64,
    menu_open: bool,
    progress: Option<f64>,
    header: HeaderVisualState,
    speeds: Vec<f64>,
    offsets: Vec<f64>,
    updates: usize,
}

impl FakePage {
    fn desktop() -> Self {
        Self {
            width: 1280.0,
            ..Default::default()
        }
    }
}

impl ScrollPort for FakePage {
    fn viewport_width(&self) -> f64 {
        self.width
    }
    fn menu_open(&self) -> bool {
        self.menu_open
    }
    fn set_progress(&mut self, ratio: f64) {
        self.progress = Some(ratio);
        self.updates += 1;
    }
    fn set_header(&mut self, state: HeaderVisualState) {
        self.header = state;
    }
    fn parallax_speeds(&self) -> &[f64] {
        &self.speeds
    }
    fn set_parallax_offset(&mut self, index: usize, offset: f64) {
        if self.offsets.len() <= index {
            self.offsets.resize(index + 1, 0.0);
        }
        self.offsets[index] = offset;
    }
}

/// Browser window stand-in: `scroll_to` moves the page like the real one.
struct FakeWindow {
    position: Cell<f64>,
    limit: f64,
    scrolled_to: RefCell<Vec<f64>>,
}

impl FakeWindow {
    fn at(position: f64, limit: f64) -> Self {
        Self {
            position: Cell::new(position),
            limit,
            scrolled_to: RefCell::new(Vec::new()),
        }
    }
}

impl ScrollWindow for FakeWindow {
    fn measure(&self) -> ScrollSample {
        ScrollSample::new(self.position.get(), self.limit)
    }

    fn scroll_to(&self, position: f64) {
        self.position.set(position);
        self.scrolled_to.borrow_mut().push(position);
    }
}

fn native_loop(page: FakePage) -> ScrollLoop<FakePage> {
    ScrollLoop::new(
        ScrollSynchronizer::new(HeaderConfig::default(), SyncFeatures::full()),
        Box::new(NativeScroll::new(false)),
        page,
    )
}

#[test]
fn top_of_page_renders_empty_progress() {
    let mut page = FakePage::desktop();
    let mut sync = ScrollSynchronizer::new(HeaderConfig::default(), SyncFeatures::full());
    sync.apply(ScrollSample::new(0.0, 1000.0), &mut page);

    assert_eq!(page.progress, Some(0.0));
    assert!(!page.header.solid);
    assert!(!page.header.hidden);
}

#[test]
fn solid_header_boundary() {
    let thresholds = HeaderConfig {
        solid_after: 12.0,
        ..HeaderConfig::default()
    };
    let mut page = FakePage::desktop();
    let mut sync = ScrollSynchronizer::new(thresholds, SyncFeatures::full());

    sync.apply(ScrollSample::new(15.0, 1000.0), &mut page);
    assert!(page.header.solid);
    sync.apply(ScrollSample::new(11.0, 1000.0), &mut page);
    assert!(!page.header.solid);
}

#[test]
fn header_hides_going_down_and_returns_going_up() {
    let thresholds = HeaderConfig {
        hide_after: 220.0,
        ..HeaderConfig::default()
    };

    let mut page = FakePage::desktop();
    let mut sync = ScrollSynchronizer::new(thresholds.clone(), SyncFeatures::full()).with_initial_position(100.0);
    sync.apply(ScrollSample::new(250.0, 3000.0), &mut page);
    assert!(page.header.hidden);

    let mut page = FakePage::desktop();
    let mut sync = ScrollSynchronizer::new(thresholds, SyncFeatures::full()).with_initial_position(300.0);
    sync.apply(ScrollSample::new(250.0, 3000.0), &mut page);
    assert!(!page.header.hidden);
}

#[test]
fn three_events_in_one_frame_update_once_with_the_last() {
    let window = FakeWindow::at(0.0, 1000.0);
    let mut scroll = native_loop(FakePage::desktop());

    let mut frames_requested = 0;
    for position in [100.0, 180.0, 260.0] {
        if scroll.offer(ScrollSample::new(position, 1000.0)) {
            frames_requested += 1;
        }
    }
    assert_eq!(frames_requested, 1);

    assert!(!scroll.frame(&window));
    assert_eq!(scroll.port().updates, 1);
    assert_eq!(scroll.port().progress, Some(0.26));
    assert_eq!(scroll.synchronizer().previous_position(), 260.0);
    assert!(window.scrolled_to.borrow().is_empty());
}

#[test]
fn frame_without_events_measures_the_window() {
    let window = FakeWindow::at(750.0, 1000.0);
    let mut scroll = native_loop(FakePage::desktop());

    assert!(scroll.poke());
    assert!(!scroll.frame(&window));
    assert_eq!(scroll.port().progress, Some(0.75));
    assert_eq!(scroll.synchronizer().previous_position(), 750.0);
}

#[test]
fn native_loop_leaves_wheel_and_window_alone() {
    let window = FakeWindow::at(0.0, 1000.0);
    let mut scroll = native_loop(FakePage::desktop());
    assert!(!scroll.is_smooth());
    assert!(!scroll.wheel(120.0));

    scroll.offer(ScrollSample::new(40.0, 1000.0));
    assert!(!scroll.frame(&window));
    assert!(window.scrolled_to.borrow().is_empty());
}

#[test]
fn smooth_loop_eases_window_and_rearms_until_settled() {
    let window = FakeWindow::at(0.0, 2000.0);
    let page = FakePage {
        speeds: vec![0.5],
        ..FakePage::desktop()
    };
    let source = SmoothScroll::new(&SmoothConfig::default(), window.measure());
    let mut scroll = ScrollLoop::new(
        ScrollSynchronizer::new(HeaderConfig::default(), source.features()),
        Box::new(source),
        page,
    );
    assert!(scroll.is_smooth());

    assert!(scroll.wheel(400.0));
    assert!(scroll.poke());
    let mut frames = 1;
    while scroll.frame(&window) {
        // a scroll event from our own scroll_to coalesces into the next frame
        assert!(!scroll.offer(window.measure()));
        frames += 1;
        assert!(frames < 500, "easing never settled");
    }

    assert!(frames > 1);
    let writes = window.scrolled_to.borrow();
    assert_eq!(writes.len(), frames);
    assert_eq!(writes.first(), Some(&40.0));
    assert_eq!(writes.last(), Some(&400.0));
    assert!(writes.windows(2).all(|pair| pair[0] < pair[1]));

    assert_eq!(scroll.synchronizer().previous_position(), 400.0);
    assert_eq!(scroll.port().offsets, vec![200.0]);
    assert_eq!(scroll.port().progress, Some(0.2));
}

#[test]
fn settled_smooth_loop_follows_keyboard_scrolling() {
    let window = FakeWindow::at(0.0, 2000.0);
    let config = SmoothConfig {
        enabled: true,
        ..SmoothConfig::default()
    };
    let source = select_source(false, &config, window.measure());
    let mut scroll = ScrollLoop::new(
        ScrollSynchronizer::new(HeaderConfig::default(), source.features()),
        source,
        FakePage::desktop(),
    );

    window.position.set(900.0);
    scroll.offer(window.measure());
    assert!(!scroll.frame(&window));
    assert_eq!(scroll.synchronizer().previous_position(), 900.0);
    assert!(window.scrolled_to.borrow().is_empty());
}

#[test]
fn reduced_motion_reveals_everything_at_once() {
    let config = RevealConfig {
        policy: RevealPolicyKind::Staggered,
        ..RevealConfig::default()
    };
    let policy = RevealPolicy::choose(true, &config);
    assert_eq!(policy, RevealPolicy::Immediate);
    assert!(!policy.needs_observer());

    let mut nodes = RevealSet::new(5);
    nodes.reveal_all();
    assert_eq!(nodes.visible_count(), 5);
    assert!((0..5).all(|i| policy.delay_for(i) == 0));
}

#[test]
fn revealed_nodes_stay_revealed() {
    let mut nodes = RevealSet::new(4);
    nodes.reveal(2);
    for _ in 0..3 {
        nodes.reveal(2);
        nodes.reveal_all();
        assert!(nodes.is_visible(2));
    }
    assert_eq!(nodes.visible_count(), 4);
}

struct Attributes {
    aria_expanded: String,
    nav_open: String,
    cta_open: Option<String>,
}

impl MenuMirror for Attributes {
    fn expanded(&self) -> bool {
        self.aria_expanded == "true"
    }
    fn write(&mut self, open: bool) {
        self.aria_expanded = open.to_string();
        self.nav_open = open.to_string();
        if let Some(cta) = self.cta_open.as_mut() {
            *cta = open.to_string();
        }
    }
}

#[test]
fn menu_mirrors_always_agree() {
    let mut menu = MenuController::new(Attributes {
        aria_expanded: "false".to_string(),
        nav_open: "false".to_string(),
        cta_open: Some("false".to_string()),
    });

    for step in 0..6 {
        if step % 3 == 0 {
            menu.set_state(true);
        } else {
            menu.toggle();
        }
        let m = menu.mirror();
        assert_eq!(m.aria_expanded, m.nav_open);
        assert_eq!(m.cta_open.as_deref(), Some(m.nav_open.as_str()));
    }

    menu.close();
    assert!(!menu.is_open());
    assert_eq!(menu.mirror().nav_open, "false");
}

#[test]
fn at_most_one_link_is_current() {
    let hrefs = ["#hero", "#work", "#team", "#contact"]
        .iter()
        .map(|h| Some(h.to_string()))
        .collect();
    let mut tracker = ActiveSectionTracker::new(hrefs);

    let batches: Vec<Vec<(&str, bool)>> = vec![
        vec![("hero", true)],
        vec![("work", true), ("team", true)],
        vec![("team", false), ("contact", true), ("hero", false)],
        vec![("elsewhere", true)],
    ];
    for batch in batches {
        tracker.apply_batch(batch.iter().map(|(id, intersecting)| SectionEntry {
            id,
            intersecting: *intersecting,
        }));
        let marked = (0..4).filter(|i| tracker.is_current(*i)).count();
        assert!(marked <= 1);
    }
    assert_eq!(tracker.active_section(), Some("elsewhere"));
}
