use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{js_sys, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

use crate::utils::media::prefers_reduced_motion;

#[derive(Clone, PartialEq, Debug)]
pub struct InViewOptions {
    /// Fraction of the element that must be visible.
    pub threshold: f64,
    pub root_margin: &'static str,
}

impl Default for InViewOptions {
    fn default() -> Self {
        Self {
            threshold: 0.12,
            root_margin: "0px",
        }
    }
}

/// One-way switch: flips to revealed on the first visible observation and
/// stays there.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct RevealLatch {
    revealed: bool,
}

impl RevealLatch {
    /// With reduced motion there is nothing to animate, so the latch starts
    /// revealed and the element is never observed.
    pub fn initial(reduced_motion: bool) -> Self {
        Self { revealed: reduced_motion }
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Returns true only for the observation that performs the reveal.
    pub fn observe(&mut self, intersecting: bool) -> bool {
        if self.revealed || !intersecting {
            return false;
        }
        self.revealed = true;
        true
    }
}

/// Reports once that the referenced element scrolled into view. With reduced
/// motion the element counts as visible from the start and nothing is observed.
#[hook]
pub fn use_in_view(options: InViewOptions) -> (NodeRef, bool) {
    let node = use_node_ref();
    let in_view = use_state(|| RevealLatch::initial(prefers_reduced_motion()).is_revealed());

    {
        let node = node.clone();
        let in_view = in_view.clone();
        use_effect_with_deps(
            move |options: &InViewOptions| {
                let destructor: Box<dyn FnOnce()> = if *in_view {
                    Box::new(|| ())
                } else if let Some(element) = node.cast::<Element>() {
                    observe_once(&element, options, in_view)
                } else {
                    Box::new(|| ())
                };
                move || destructor()
            },
            options,
        );
    }

    (node, *in_view)
}

fn observe_once(element: &Element, options: &InViewOptions, in_view: UseStateHandle<bool>) -> Box<dyn FnOnce()> {
    let latch = Rc::new(Cell::new(RevealLatch::initial(false)));
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new({
        let in_view = in_view.clone();
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                let mut state = latch.get();
                if state.observe(entry.is_intersecting()) {
                    latch.set(state);
                    in_view.set(true);
                    observer.unobserve(&entry.target());
                }
            }
        }
    });

    let mut init = IntersectionObserverInit::new();
    init.threshold(&JsValue::from_f64(options.threshold));
    init.root_margin(options.root_margin);

    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
        Ok(observer) => {
            observer.observe(element);
            Box::new(move || {
                observer.disconnect();
                drop(callback);
            })
        }
        Err(e) => {
            log::warn!("IntersectionObserver unavailable, revealing immediately: {:?}", e);
            in_view.set(true);
            Box::new(|| ())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduced_motion_starts_revealed_without_a_transition() {
        let mut latch = RevealLatch::initial(true);
        assert!(latch.is_revealed());
        assert!(!latch.observe(true));
        assert!(!latch.observe(false));
        assert!(latch.is_revealed());
    }

    #[test]
    fn full_motion_starts_hidden() {
        let latch = RevealLatch::initial(false);
        assert!(!latch.is_revealed());
        assert_eq!(latch, RevealLatch::default());
    }

    #[test]
    fn ignores_observations_outside_viewport() {
        let mut latch = RevealLatch::default();
        assert!(!latch.observe(false));
        assert!(!latch.observe(false));
        assert_eq!(latch, RevealLatch::default());
    }

    #[test]
    fn reveals_exactly_once_and_never_resets() {
        let mut latch = RevealLatch::default();
        assert!(latch.observe(true));
        assert!(!latch.observe(true));
        assert!(!latch.observe(false));
        assert!(!latch.observe(true));
    }
}
