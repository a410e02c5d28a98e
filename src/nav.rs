use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};
use web_sys::Element;

use crate::config::NavConfig;
use crate::dom::{Elements, Observer, CLASS_CURRENT};
use crate::error::MotionError;

/// One observer entry, reduced to what the tracker needs.
#[derive(Debug, Clone, Copy)]
pub struct SectionEntry<'a> {
    pub id: &'a str,
    pub intersecting: bool,
}

/// Decides which nav link is current from section intersection batches.
pub struct ActiveSectionTracker {
    hrefs: Vec<Option<String>>,
    active_section: Option<String>,
    current_link: Option<usize>,
}

impl ActiveSectionTracker {
    /// `hrefs` are the nav links' `href` attributes in document order.
    pub fn new(hrefs: Vec<Option<String>>) -> Self {
        Self {
            hrefs,
            active_section: None,
            current_link: None,
        }
    }

    /// Process one observer batch in order. Each intersecting entry marks its
    /// link and unmarks the rest, so the last intersecting entry wins.
    /// Returns true when the batch touched the marking.
    pub fn apply_batch<'a, I>(&mut self, entries: I) -> bool
    where
        I: IntoIterator<Item = SectionEntry<'a>>,
    {
        let mut touched = false;
        for entry in entries.into_iter().filter(|e| e.intersecting) {
            let fragment = format!("#{}", entry.id);
            self.current_link = self
                .hrefs
                .iter()
                .position(|href| href.as_deref() == Some(fragment.as_str()));
            self.active_section = Some(entry.id.to_string());
            touched = true;
        }
        touched
    }

    pub fn active_section(&self) -> Option<&str> {
        self.active_section.as_deref()
    }

    pub fn current_link(&self) -> Option<usize> {
        self.current_link
    }

    pub fn is_current(&self, index: usize) -> bool {
        self.current_link == Some(index)
    }
}

pub struct NavHandle {
    _observer: Observer,
}

pub fn install(elements: &Elements, config: &NavConfig) -> Result<Option<NavHandle>, MotionError> {
    if elements.sections.is_empty() || elements.nav_links.is_empty() {
        debug!("no sections or nav links, active section tracking skipped");
        return Ok(None);
    }

    let links: Vec<Element> = elements.nav_links.clone();
    let tracker = Rc::new(RefCell::new(ActiveSectionTracker::new(
        links.iter().map(|link| link.get_attribute("href")).collect(),
    )));

    let observer = Observer::new(config.threshold, &config.root_margin, move |entries, _| {
        let ids: Vec<(String, bool)> = entries
            .iter()
            .map(|entry| (entry.target().id(), entry.is_intersecting()))
            .collect();

        let mut tracker = tracker.borrow_mut();
        let touched = tracker.apply_batch(ids.iter().map(|(id, intersecting)| SectionEntry {
            id: id.as_str(),
            intersecting: *intersecting,
        }));
        if !touched {
            return;
        }

        for (index, link) in links.iter().enumerate() {
            let _ = link
                .class_list()
                .toggle_with_force(CLASS_CURRENT, tracker.is_current(index));
        }
        debug!("current section: {:?}", tracker.active_section());
    })?;

    for section in &elements.sections {
        observer.observe(section);
    }

    info!("tracking {} sections", elements.sections.len());
    Ok(Some(NavHandle { _observer: observer }))
}
