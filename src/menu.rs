use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, KeyboardEvent};

use crate::dom::{self, Elements, EventListener};
use crate::error::MotionError;

/// Everything that reflects whether the mobile menu is open.
pub trait MenuMirror {
    /// Current open state as recorded on the toggle control.
    fn expanded(&self) -> bool;
    /// Write `open` to every mirror at once.
    fn write(&mut self, open: bool);
}

pub struct MenuController<M: MenuMirror> {
    mirror: M,
}

impl<M: MenuMirror> MenuController<M> {
    pub fn new(mirror: M) -> Self {
        Self { mirror }
    }

    pub fn is_open(&self) -> bool {
        self.mirror.expanded()
    }

    /// Idempotent: writes all mirrors even when nothing changes.
    pub fn set_state(&mut self, open: bool) {
        self.mirror.write(open);
    }

    /// Flip whatever the toggle currently says. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        let next = !self.mirror.expanded();
        self.set_state(next);
        next
    }

    pub fn close(&mut self) {
        self.set_state(false);
    }

    /// Returns true when the key closed the menu.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if key == "Escape" && self.is_open() {
            self.close();
            true
        } else {
            false
        }
    }

    pub fn mirror(&self) -> &M {
        &self.mirror
    }
}

pub struct DomMenuMirror {
    toggle: Element,
    nav: HtmlElement,
    cta: Option<HtmlElement>,
}

impl MenuMirror for DomMenuMirror {
    fn expanded(&self) -> bool {
        dom::is_menu_expanded(Some(&self.toggle))
    }

    fn write(&mut self, open: bool) {
        let value = open.to_string();
        let _ = self.toggle.set_attribute("aria-expanded", &value);
        let _ = self.nav.dataset().set("open", &value);
        if let Some(cta) = &self.cta {
            let _ = cta.dataset().set("open", &value);
        }
    }
}

/// Installed menu wiring. Dropping it detaches every listener.
pub struct MenuHandle {
    _listeners: Vec<EventListener>,
}

/// Wire the toggle, nav links and Escape key. Returns `None` when the page
/// has no toggle or no nav: the menu is then inert.
pub fn install(elements: &Elements) -> Result<Option<MenuHandle>, MotionError> {
    let (Some(toggle), Some(nav)) = (elements.menu_toggle.clone(), elements.nav.clone()) else {
        debug!("menu toggle or nav missing, menu stays inert");
        return Ok(None);
    };

    let controller = Rc::new(RefCell::new(MenuController::new(DomMenuMirror {
        toggle: toggle.clone(),
        nav,
        cta: elements.cta.clone(),
    })));

    let mut listeners = Vec::with_capacity(elements.nav_links.len() + 2);

    {
        let controller = controller.clone();
        listeners.push(EventListener::new(&toggle, "click", move |_| {
            let open = controller.borrow_mut().toggle();
            debug!("menu toggled, open={}", open);
        })?);
    }

    for link in &elements.nav_links {
        let controller = controller.clone();
        listeners.push(EventListener::new(link, "click", move |_| {
            controller.borrow_mut().close();
        })?);
    }

    {
        let controller = controller.clone();
        let document = dom::document()?;
        listeners.push(EventListener::new(&document, "keydown", move |event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                if controller.borrow_mut().handle_key(&event.key()) {
                    let _ = toggle.dyn_ref::<HtmlElement>().map(|el| el.focus());
                }
            }
        })?);
    }

    info!("menu wired with {} nav links", elements.nav_links.len());
    Ok(Some(MenuHandle {
        _listeners: listeners,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Mirrors {
        toggle: Option<bool>,
        nav: Option<bool>,
        cta: Option<bool>,
        writes: usize,
    }

    impl MenuMirror for Mirrors {
        fn expanded(&self) -> bool {
            self.toggle == Some(true)
        }
        fn write(&mut self, open: bool) {
            self.toggle = Some(open);
            self.nav = Some(open);
            self.cta = Some(open);
            self.writes += 1;
        }
    }

    fn agree(m: &Mirrors, open: bool) -> bool {
        m.toggle == Some(open) && m.nav == Some(open) && m.cta == Some(open)
    }

    #[test]
    fn set_state_writes_every_mirror() {
        let mut menu = MenuController::new(Mirrors::default());
        for open in [true, true, false, true, false] {
            menu.set_state(open);
            assert!(agree(menu.mirror(), open));
        }
        assert_eq!(menu.mirror().writes, 5);
    }

    #[test]
    fn toggle_reads_current_state_and_flips() {
        let mut menu = MenuController::new(Mirrors::default());
        assert!(!menu.is_open());
        assert!(menu.toggle());
        assert!(menu.is_open());
        assert!(!menu.toggle());
        assert!(agree(menu.mirror(), false));
    }

    #[test]
    fn escape_only_closes_an_open_menu() {
        let mut menu = MenuController::new(Mirrors::default());
        assert!(!menu.handle_key("Escape"));
        assert_eq!(menu.mirror().writes, 0);

        menu.set_state(true);
        assert!(!menu.handle_key("Enter"));
        assert!(menu.handle_key("Escape"));
        assert!(agree(menu.mirror(), false));
    }
}
