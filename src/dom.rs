use chrono::Datelike;
use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, Window,
};

use crate::config::ProgressStyle;
use crate::error::MotionError;
use crate::port::ScrollPort;
use crate::scroll::frame::ScrollWindow;
use crate::scroll::parallax;
use crate::scroll::sample::{HeaderVisualState, ScrollSample};

pub const HEADER: &str = "[data-header]";
pub const NAV: &str = "[data-nav]";
pub const MENU_TOGGLE: &str = "[data-menu-toggle]";
pub const NAV_LINK: &str = "[data-nav-link]";
pub const SECTION: &str = "main section[id]";
pub const YEAR_LABEL: &str = "[data-year]";
pub const SCROLL_PROGRESS: &str = "[data-scroll-progress]";
pub const REVEAL: &str = ".reveal";
pub const PARALLAX: &str = "[data-parallax-speed]";
pub const CTA: &str = "[data-cta]";
pub const CONFIG_BLOCK: &str = "script[data-motion-config]";

pub const CLASS_SOLID: &str = "is-solid";
pub const CLASS_HIDDEN: &str = "is-hidden";
pub const CLASS_CURRENT: &str = "is-current";
pub const CLASS_VISIBLE: &str = "is-visible";

pub fn window() -> Result<Window, MotionError> {
    web_sys::window().ok_or(MotionError::Unavailable("window"))
}

pub fn document() -> Result<Document, MotionError> {
    window()?
        .document()
        .ok_or(MotionError::Unavailable("document"))
}

/// The fixed set of page elements the motion layer touches. Anything the
/// page does not have is simply `None` / empty.
#[derive(Clone)]
pub struct Elements {
    pub header: Option<HtmlElement>,
    pub nav: Option<HtmlElement>,
    pub menu_toggle: Option<Element>,
    pub cta: Option<HtmlElement>,
    pub nav_links: Vec<Element>,
    pub sections: Vec<Element>,
    pub year_label: Option<Element>,
    pub scroll_bar: Option<HtmlElement>,
    pub reveal_nodes: Vec<Element>,
    pub parallax_nodes: Vec<HtmlElement>,
}

impl Elements {
    pub fn resolve(document: &Document) -> Self {
        let elements = Self {
            header: query_html(document, HEADER),
            nav: query_html(document, NAV),
            menu_toggle: query(document, MENU_TOGGLE),
            cta: query_html(document, CTA),
            nav_links: query_all(document, NAV_LINK),
            sections: query_all(document, SECTION),
            year_label: query(document, YEAR_LABEL),
            scroll_bar: query_html(document, SCROLL_PROGRESS),
            reveal_nodes: query_all(document, REVEAL),
            parallax_nodes: query_all(document, PARALLAX)
                .into_iter()
                .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
                .collect(),
        };
        debug!(
            "resolved page: header={} nav={} toggle={} links={} sections={} reveal={} parallax={}",
            elements.header.is_some(),
            elements.nav.is_some(),
            elements.menu_toggle.is_some(),
            elements.nav_links.len(),
            elements.sections.len(),
            elements.reveal_nodes.len(),
            elements.parallax_nodes.len()
        );
        elements
    }
}

pub fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

fn query_html(document: &Document, selector: &str) -> Option<HtmlElement> {
    query(document, selector).and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Lets CSS hide reveal nodes only when this script is actually running.
pub fn mark_scripted(document: &Document) {
    if let Some(root) = document.document_element() {
        let _ = root.class_list().add_1("js");
    }
}

pub fn write_year(elements: &Elements) {
    if let Some(label) = &elements.year_label {
        label.set_text_content(Some(&chrono::Local::now().year().to_string()));
    }
}

pub fn is_menu_expanded(toggle: Option<&Element>) -> bool {
    toggle
        .and_then(|el| el.get_attribute("aria-expanded"))
        .map(|value| value == "true")
        .unwrap_or(false)
}

/// Reads the current scroll position and scrollable range from the window.
pub fn measure_scroll(window: &Window) -> ScrollSample {
    let position = window.scroll_y().unwrap_or(0.0);
    let viewport_height = window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0);
    let document_height = window
        .document()
        .and_then(|d| d.document_element())
        .map(|root| root.scroll_height() as f64)
        .unwrap_or(0.0);
    ScrollSample::measure(position, document_height, viewport_height)
}

impl ScrollWindow for Window {
    fn measure(&self) -> ScrollSample {
        measure_scroll(self)
    }

    fn scroll_to(&self, position: f64) {
        self.scroll_to_with_x_and_y(0.0, position);
    }
}

pub fn viewport_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0)
}

/// An event listener that unregisters itself when dropped.
pub struct EventListener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new<F>(target: &EventTarget, event: &'static str, callback: F) -> Result<Self, MotionError>
    where
        F: FnMut(Event) + 'static,
    {
        Self::with_passive(target, event, false, callback)
    }

    /// `passive` listeners promise never to call `prevent_default`, which
    /// keeps scrolling off the main thread.
    pub fn with_passive<F>(
        target: &EventTarget,
        event: &'static str,
        passive: bool,
        callback: F,
    ) -> Result<Self, MotionError>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(callback) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// An `IntersectionObserver` that disconnects when dropped.
pub struct Observer {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl Observer {
    pub fn new<F>(threshold: f64, root_margin: &str, mut on_batch: F) -> Result<Self, MotionError>
    where
        F: FnMut(Vec<IntersectionObserverEntry>, &IntersectionObserver) + 'static,
    {
        let callback: ObserverCallback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
            let entries = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .collect();
            on_batch(entries, &observer);
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        options.set_root_margin(root_margin);
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, target: &Element) {
        self.observer.observe(target);
    }
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Browser-backed `ScrollPort`: header classes, progress bar style and
/// parallax transforms.
pub struct DomScrollPort {
    window: Window,
    header: Option<HtmlElement>,
    menu_toggle: Option<Element>,
    scroll_bar: Option<HtmlElement>,
    progress_style: ProgressStyle,
    parallax_nodes: Vec<HtmlElement>,
    parallax_speeds: Vec<f64>,
}

impl DomScrollPort {
    pub fn new(window: Window, elements: &Elements, progress_style: ProgressStyle) -> Self {
        let parallax_speeds = elements
            .parallax_nodes
            .iter()
            .map(|node| parallax::parse_speed(node.get_attribute(parallax::SPEED_ATTRIBUTE).as_deref()))
            .collect();
        Self {
            window,
            header: elements.header.clone(),
            menu_toggle: elements.menu_toggle.clone(),
            scroll_bar: elements.scroll_bar.clone(),
            progress_style,
            parallax_nodes: elements.parallax_nodes.clone(),
            parallax_speeds,
        }
    }
}

impl ScrollPort for DomScrollPort {
    fn viewport_width(&self) -> f64 {
        viewport_width(&self.window)
    }

    fn menu_open(&self) -> bool {
        is_menu_expanded(self.menu_toggle.as_ref())
    }

    fn set_progress(&mut self, ratio: f64) {
        let Some(bar) = &self.scroll_bar else {
            return;
        };
        let style = bar.style();
        let _ = match self.progress_style {
            ProgressStyle::ScaleX => style.set_property("transform", &format!("scaleX({})", ratio)),
            ProgressStyle::Width => style.set_property("width", &format!("{}%", ratio * 100.0)),
        };
    }

    fn set_header(&mut self, state: HeaderVisualState) {
        let Some(header) = &self.header else {
            return;
        };
        let classes = header.class_list();
        let _ = classes.toggle_with_force(CLASS_SOLID, state.solid);
        let _ = classes.toggle_with_force(CLASS_HIDDEN, state.hidden);
    }

    fn parallax_speeds(&self) -> &[f64] {
        &self.parallax_speeds
    }

    fn set_parallax_offset(&mut self, index: usize, offset: f64) {
        if let Some(node) = self.parallax_nodes.get(index) {
            let _ = node.style().set_property("transform", &parallax::transform(offset));
        }
    }
}
