use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{WheelEvent, Window};

use crate::config::MotionConfig;
use crate::dom::{self, DomScrollPort, Elements, EventListener};
use crate::error::MotionError;
use crate::scroll::frame::ScrollLoop;
use crate::scroll::source;
use crate::scroll::sync::ScrollSynchronizer;

const LINE_HEIGHT_PX: f64 = 16.0;

/// Convert a wheel delta to pixels according to its `deltaMode`
/// (0 = pixels, 1 = lines, 2 = pages).
pub fn wheel_pixels(delta: f64, mode: u32, page_height: f64) -> f64 {
    match mode {
        1 => delta * LINE_HEIGHT_PX,
        2 => delta * page_height,
        _ => delta,
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Live scroll wiring. Dropping it removes the listeners and stops the
/// frame loop.
pub struct ScrollHandle {
    frame: FrameCallback,
    smooth: bool,
    _listeners: Vec<EventListener>,
}

impl ScrollHandle {
    pub fn is_smooth(&self) -> bool {
        self.smooth
    }
}

impl Drop for ScrollHandle {
    fn drop(&mut self) {
        // the frame closure holds an Rc to its own cell
        self.frame.borrow_mut().take();
    }
}

fn request_frame(window: &Window, frame: &FrameCallback) {
    if let Some(callback) = frame.borrow().as_ref() {
        let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
    }
}

pub fn install(
    window: Window,
    elements: &Elements,
    config: &MotionConfig,
    reduced_motion: bool,
) -> Result<ScrollHandle, MotionError> {
    let initial = dom::measure_scroll(&window);
    let source = source::select_source(reduced_motion, &config.smooth, initial);
    let features = source.features();
    let scroll_loop = ScrollLoop::new(
        ScrollSynchronizer::new(config.header.clone(), features).with_initial_position(initial.position),
        source,
        DomScrollPort::new(window.clone(), elements, config.progress.style),
    );
    let smooth = scroll_loop.is_smooth();
    let state = Rc::new(RefCell::new(scroll_loop));

    let frame: FrameCallback = Rc::new(RefCell::new(None));
    {
        let state = state.clone();
        let window = window.clone();
        let next = frame.clone();
        *frame.borrow_mut() = Some(Closure::wrap(Box::new(move |_timestamp: f64| {
            if state.borrow_mut().frame(&window) {
                request_frame(&window, &next);
            }
        }) as Box<dyn FnMut(f64)>));
    }

    let mut listeners = Vec::new();
    for event in ["scroll", "resize"] {
        let state = state.clone();
        let window_for_event = window.clone();
        let frame = frame.clone();
        listeners.push(EventListener::with_passive(&window, event, true, move |_| {
            let sample = dom::measure_scroll(&window_for_event);
            if state.borrow_mut().offer(sample) {
                request_frame(&window_for_event, &frame);
            }
        })?);
    }

    if smooth {
        let state = state.clone();
        let window_for_event = window.clone();
        let frame = frame.clone();
        listeners.push(EventListener::with_passive(&window, "wheel", false, move |event| {
            let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
                return;
            };
            // pinch-zoom arrives as ctrl+wheel
            if wheel.ctrl_key() {
                return;
            }
            let page_height = window_for_event
                .inner_height()
                .ok()
                .and_then(|h| h.as_f64())
                .unwrap_or(0.0);
            let delta = wheel_pixels(wheel.delta_y(), wheel.delta_mode(), page_height);

            let mut state = state.borrow_mut();
            if state.wheel(delta) {
                wheel.prevent_default();
                if state.poke() {
                    request_frame(&window_for_event, &frame);
                }
            }
        })?);
    }

    // The page may already be scrolled (reload, anchor link).
    {
        let mut state = state.borrow_mut();
        state.offer(initial);
        if state.frame(&window) {
            request_frame(&window, &frame);
        }
    }

    debug!("scroll features: {:?}", features);
    info!(
        "scroll sync installed ({} source)",
        if smooth { "smooth" } else { "native" }
    );
    Ok(ScrollHandle {
        frame,
        smooth,
        _listeners: listeners,
    })
}
