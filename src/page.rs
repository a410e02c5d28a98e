use log::{error, info, warn};
use web_sys::Document;

use crate::config::MotionConfig;
use crate::dom::{self, Elements};
use crate::error::MotionError;
use crate::menu::{self, MenuHandle};
use crate::nav::{self, NavHandle};
use crate::preference::MotionPreference;
use crate::reveal::{self, RevealHandle, RevealPolicy};
use crate::scroll::runtime::{self, ScrollHandle};

/// Everything installed on the page. Dropping it detaches all listeners
/// and observers.
pub struct Page {
    _menu: Option<MenuHandle>,
    _nav: Option<NavHandle>,
    _reveal: Option<RevealHandle>,
    _scroll: Option<ScrollHandle>,
}

impl Page {
    pub fn install() -> Result<Self, MotionError> {
        let window = dom::window()?;
        let document = dom::document()?;

        dom::mark_scripted(&document);
        let preference = MotionPreference::read(&window);
        let config = load_config(&document);
        let elements = Elements::resolve(&document);
        dom::write_year(&elements);

        // One feature failing must not take the others down.
        let menu = report("menu", menu::install(&elements)).flatten();
        let nav = report("nav", nav::install(&elements, &config.nav)).flatten();
        let policy = RevealPolicy::choose(preference.reduced_motion, &config.reveal);
        let reveal = report("reveal", reveal::install_or_show(&elements, &policy));
        let scroll = report(
            "scroll",
            runtime::install(window, &elements, &config, preference.reduced_motion),
        );

        info!(
            "page motion ready: menu={} nav={} reveal={} scroll={}",
            menu.is_some(),
            nav.is_some(),
            reveal.as_ref().map(|r| r.visible_count()).unwrap_or(0),
            scroll
                .as_ref()
                .map(|s| if s.is_smooth() { "smooth" } else { "native" })
                .unwrap_or("off")
        );

        Ok(Self {
            _menu: menu,
            _nav: nav,
            _reveal: reveal,
            _scroll: scroll,
        })
    }
}

fn report<T>(feature: &str, result: Result<T, MotionError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            error!("{} setup failed: {}", feature, e);
            None
        }
    }
}

fn load_config(document: &Document) -> MotionConfig {
    let Some(raw) = dom::query(document, dom::CONFIG_BLOCK).and_then(|block| block.text_content()) else {
        return MotionConfig::default();
    };
    match MotionConfig::from_json(&raw) {
        Ok(config) => config,
        Err(e) => {
            warn!("{}, using defaults", e);
            MotionConfig::default()
        }
    }
}
