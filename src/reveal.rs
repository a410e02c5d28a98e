use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{debug, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::config::{RevealConfig, RevealPolicyKind};
use crate::dom::{self, Elements, Observer, CLASS_VISIBLE};
use crate::error::MotionError;

#[derive(Debug, Clone, PartialEq)]
pub enum RevealPolicy {
    /// Everything visible right away, no animation.
    Immediate,
    /// Node `i` appears after `min(i * step_ms, cap_ms)`.
    Staggered { step_ms: u32, cap_ms: u32 },
    /// Nodes appear as they scroll into view.
    Observed { threshold: f64, root_margin: String },
    /// Wait two animation frames, then show everything.
    DeferredBatch,
}

impl RevealPolicy {
    /// Reduced motion overrides whatever the page asked for.
    pub fn choose(reduced_motion: bool, config: &RevealConfig) -> Self {
        if reduced_motion {
            return RevealPolicy::Immediate;
        }
        match config.policy {
            RevealPolicyKind::Immediate => RevealPolicy::Immediate,
            RevealPolicyKind::Staggered => RevealPolicy::Staggered {
                step_ms: config.step_ms,
                cap_ms: config.cap_ms,
            },
            RevealPolicyKind::Observed => RevealPolicy::Observed {
                threshold: config.threshold,
                root_margin: config.root_margin.clone(),
            },
            RevealPolicyKind::DeferredBatch => RevealPolicy::DeferredBatch,
        }
    }

    pub fn delay_for(&self, index: usize) -> u32 {
        match self {
            RevealPolicy::Staggered { step_ms, cap_ms } => {
                let index = u32::try_from(index).unwrap_or(u32::MAX);
                index.saturating_mul(*step_ms).min(*cap_ms)
            }
            _ => 0,
        }
    }

    pub fn needs_observer(&self) -> bool {
        matches!(self, RevealPolicy::Observed { .. })
    }
}

/// Visibility flags for the reveal nodes. Flags only ever go from hidden
/// to visible.
#[derive(Debug, Clone, Default)]
pub struct RevealSet {
    visible: Vec<bool>,
}

impl RevealSet {
    pub fn new(len: usize) -> Self {
        Self {
            visible: vec![false; len],
        }
    }

    /// Returns true only the first time `index` is revealed.
    pub fn reveal(&mut self, index: usize) -> bool {
        match self.visible.get_mut(index) {
            Some(flag) if !*flag => {
                *flag = true;
                true
            }
            _ => false,
        }
    }

    /// Reveal everything still hidden; returns the indices that changed.
    pub fn reveal_all(&mut self) -> Vec<usize> {
        (0..self.visible.len()).filter(|i| self.reveal(*i)).collect()
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|v| **v).count()
    }

    /// Apply one observer batch of `(node index, intersecting)` pairs.
    /// Every intersecting node is released from observation, including
    /// ones that were already visible.
    pub fn observe_batch<I>(&mut self, batch: I) -> ObservedBatch
    where
        I: IntoIterator<Item = (usize, bool)>,
    {
        let mut outcome = ObservedBatch::default();
        for (index, intersecting) in batch {
            if !intersecting {
                continue;
            }
            if self.reveal(index) {
                outcome.revealed.push(index);
            }
            outcome.released.push(index);
        }
        outcome
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ObservedBatch {
    pub revealed: Vec<usize>,
    pub released: Vec<usize>,
}

/// Shared between the page and whatever callback eventually shows a node.
#[derive(Clone)]
struct RevealNodes {
    nodes: Rc<Vec<Element>>,
    state: Rc<RefCell<RevealSet>>,
}

impl RevealNodes {
    fn show(&self, index: usize) {
        if self.state.borrow_mut().reveal(index) {
            if let Some(node) = self.nodes.get(index) {
                let _ = node.class_list().add_1(CLASS_VISIBLE);
            }
        }
    }

    fn show_all(&self) {
        let changed = self.state.borrow_mut().reveal_all();
        self.mark(&changed);
    }

    fn mark(&self, indices: &[usize]) {
        for index in indices {
            if let Some(node) = self.nodes.get(*index) {
                let _ = node.class_list().add_1(CLASS_VISIBLE);
            }
        }
    }

    fn index_of(&self, target: &Element) -> Option<usize> {
        self.nodes.iter().position(|node| node == target)
    }
}

pub struct RevealHandle {
    state: Rc<RefCell<RevealSet>>,
    observer: Option<Observer>,
}

impl RevealHandle {
    pub fn visible_count(&self) -> usize {
        self.state.borrow().visible_count()
    }

    pub fn has_observer(&self) -> bool {
        self.observer.is_some()
    }
}

/// Install `policy`, or show everything at once when it cannot be set up:
/// with the `js` class on the page, unrevealed nodes stay hidden.
pub fn install_or_show(elements: &Elements, policy: &RevealPolicy) -> Result<RevealHandle, MotionError> {
    with_fallback(policy, |policy| install(elements, policy))
}

pub fn with_fallback<T, F>(policy: &RevealPolicy, mut install: F) -> Result<T, MotionError>
where
    F: FnMut(&RevealPolicy) -> Result<T, MotionError>,
{
    match install(policy) {
        Err(e) if *policy != RevealPolicy::Immediate => {
            warn!("reveal policy {:?} failed ({}), showing all content", policy, e);
            install(&RevealPolicy::Immediate)
        }
        result => result,
    }
}

pub fn install(elements: &Elements, policy: &RevealPolicy) -> Result<RevealHandle, MotionError> {
    let nodes = RevealNodes {
        nodes: Rc::new(elements.reveal_nodes.clone()),
        state: Rc::new(RefCell::new(RevealSet::new(elements.reveal_nodes.len()))),
    };
    let mut observer = None;

    debug!("reveal policy {:?} for {} nodes", policy, nodes.nodes.len());
    match policy {
        RevealPolicy::Immediate => nodes.show_all(),
        RevealPolicy::Staggered { .. } => {
            for index in 0..nodes.nodes.len() {
                let nodes = nodes.clone();
                Timeout::new(policy.delay_for(index), move || nodes.show(index)).forget();
            }
        }
        RevealPolicy::Observed { threshold, root_margin } => {
            let shown = nodes.clone();
            let created = Observer::new(*threshold, root_margin, move |entries, observer| {
                let batch: Vec<(usize, bool)> = entries
                    .iter()
                    .filter_map(|entry| {
                        shown
                            .index_of(&entry.target())
                            .map(|index| (index, entry.is_intersecting()))
                    })
                    .collect();
                let outcome = shown.state.borrow_mut().observe_batch(batch);
                shown.mark(&outcome.revealed);
                for index in outcome.released {
                    if let Some(node) = shown.nodes.get(index) {
                        observer.unobserve(node);
                    }
                }
            })?;
            for node in nodes.nodes.iter() {
                created.observe(node);
            }
            observer = Some(created);
        }
        RevealPolicy::DeferredBatch => {
            let window = dom::window()?;
            let next_frame = window.clone();
            let batch = nodes.clone();
            let first = Closure::once_into_js(move || {
                let second = Closure::once_into_js(move || batch.show_all());
                let _ = next_frame.request_animation_frame(second.unchecked_ref());
            });
            window.request_animation_frame(first.unchecked_ref())?;
        }
    }

    info!("reveal ready: {} nodes", nodes.nodes.len());
    Ok(RevealHandle {
        state: nodes.state,
        observer,
    })
}
