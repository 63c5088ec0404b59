//! Visibility Trigger - one-shot "became visible" signal
//!
//! Observes an element through the host's intersection primitive. The first
//! notification that reports intersection flips `has_fired` to `true` and
//! disconnects the observer. The flag never reverts.
//!
//! An element that never scrolls into view keeps the trigger pending forever;
//! that is a valid state, not an error. Hosts without intersection support
//! fire the trigger at construction so dependents still run.
//!
//! # Example
//!
//! ```ignore
//! let trigger = VisibilityTrigger::observe(surface.clone(), card, -50.0)?;
//! let fired = trigger.signal();
//! let _stop = effect(move || {
//!     if fired.get() {
//!         // start animating
//!     }
//! });
//! ```

use std::cell::Cell;
use std::rc::Rc;

use spark_signals::{signal, Signal};
use tracing::debug;

use crate::error::Result;
use crate::surface::{IntersectionHost, Observation};
use crate::types::{ElementId, ObserverId};

/// One-shot visibility trigger owned by a single element.
pub struct VisibilityTrigger {
    element: ElementId,
    has_fired: Signal<bool>,
    host: Rc<dyn IntersectionHost>,
    /// Set while the host still holds our observer.
    observer: Option<ObserverId>,
    /// Set by the callback once it has asked the host to disconnect.
    disconnected: Rc<Cell<bool>>,
}

impl VisibilityTrigger {
    /// Start observing `element`, firing once it intersects the viewport
    /// grown by `margin_px` (negative margins require deeper scroll-in).
    pub fn observe(
        host: Rc<dyn IntersectionHost>,
        element: ElementId,
        margin_px: f32,
    ) -> Result<Self> {
        if !host.supports_intersection() {
            debug!(?element, "intersection unsupported, firing at mount");
            return Ok(Self {
                element,
                has_fired: signal(true),
                host,
                observer: None,
                disconnected: Rc::new(Cell::new(true)),
            });
        }

        let has_fired = signal(false);
        let disconnected = Rc::new(Cell::new(false));

        let fired = has_fired.clone();
        let done = disconnected.clone();
        let id = host.observe(
            element,
            margin_px,
            Box::new(move |visible: bool| {
                if !visible {
                    return Observation::Keep;
                }
                debug!(?element, "element became visible");
                done.set(true);
                fired.set(true);
                Observation::Disconnect
            }),
        )?;

        let observer = if disconnected.get() { None } else { Some(id) };
        Ok(Self { element, has_fired, host, observer, disconnected })
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Has the element been seen?
    pub fn has_fired(&self) -> bool {
        self.has_fired.get()
    }

    /// Reactive view of `has_fired`, for effects that gate on it.
    pub fn signal(&self) -> Signal<bool> {
        self.has_fired.clone()
    }

    /// Is the host still delivering notifications for this trigger?
    ///
    /// Asks the host, so an observer dropped along with its element reads
    /// as not observing (the trigger then stays pending for good).
    pub fn is_observing(&self) -> bool {
        match self.observer {
            Some(id) => !self.disconnected.get() && self.host.is_observing(id),
            None => false,
        }
    }

    /// Stop observing without firing. Idempotent.
    pub fn disconnect(&mut self) {
        if let Some(id) = self.observer.take() {
            if !self.disconnected.replace(true) {
                self.host.unobserve(id);
            }
        }
    }
}

impl Drop for VisibilityTrigger {
    fn drop(&mut self) {
        self.disconnect();
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::HeadlessSurface;
    use crate::types::Rect;
    use spark_signals::effect;

    fn setup() -> Rc<HeadlessSurface> {
        Rc::new(HeadlessSurface::new(800.0, 600.0))
    }

    #[test]
    fn test_fires_once_when_scrolled_into_view() {
        let surface = setup();
        let el = surface.insert_element(Rect::new(0.0, 1200.0, 300.0, 100.0));
        let trigger = VisibilityTrigger::observe(surface.clone(), el, -50.0).unwrap();
        assert!(!trigger.has_fired());
        assert!(trigger.is_observing());

        surface.scroll_to(0.0, 700.0);
        assert!(trigger.has_fired());
        assert!(!trigger.is_observing());
        assert_eq!(surface.observer_count(), 0);

        // Scrolling away never reverts
        surface.scroll_to(0.0, 0.0);
        assert!(trigger.has_fired());
    }

    #[test]
    fn test_in_view_at_mount_fires_immediately() {
        let surface = setup();
        let el = surface.insert_element(Rect::new(0.0, 100.0, 300.0, 100.0));
        let trigger = VisibilityTrigger::observe(surface.clone(), el, -50.0).unwrap();
        assert!(trigger.has_fired());
        assert!(!trigger.is_observing());
        assert_eq!(surface.observer_count(), 0);
    }

    #[test]
    fn test_never_visible_stays_pending() {
        let surface = setup();
        let el = surface.insert_element(Rect::new(0.0, 5000.0, 300.0, 100.0));
        let trigger = VisibilityTrigger::observe(surface.clone(), el, 0.0).unwrap();
        surface.scroll_to(0.0, 1000.0);
        surface.resize(800.0, 900.0);
        assert!(!trigger.has_fired());
        assert!(trigger.is_observing());
    }

    #[test]
    fn test_unsupported_host_fires_at_mount() {
        let surface = Rc::new(HeadlessSurface::new(800.0, 600.0).without_intersection());
        let el = surface.insert_element(Rect::new(0.0, 5000.0, 300.0, 100.0));
        let trigger = VisibilityTrigger::observe(surface.clone(), el, 0.0).unwrap();
        assert!(trigger.has_fired());
        assert_eq!(surface.observer_count(), 0);
    }

    #[test]
    fn test_drop_unobserves() {
        let surface = setup();
        let el = surface.insert_element(Rect::new(0.0, 5000.0, 300.0, 100.0));
        let trigger = VisibilityTrigger::observe(surface.clone(), el, 0.0).unwrap();
        assert_eq!(surface.observer_count(), 1);
        drop(trigger);
        assert_eq!(surface.observer_count(), 0);
    }

    #[test]
    fn test_removed_element_stops_observing() {
        let surface = setup();
        let el = surface.insert_element(Rect::new(0.0, 1200.0, 300.0, 100.0));
        let mut trigger = VisibilityTrigger::observe(surface.clone(), el, 0.0).unwrap();
        assert!(trigger.is_observing());

        surface.remove_element(el);
        assert!(!trigger.is_observing());
        assert!(!trigger.has_fired());

        // Releasing a host-dropped observer is harmless
        trigger.disconnect();
        assert_eq!(surface.observer_count(), 0);
    }

    #[test]
    fn test_signal_reruns_effect_once() {
        let surface = setup();
        let el = surface.insert_element(Rect::new(0.0, 1200.0, 300.0, 100.0));
        let trigger = VisibilityTrigger::observe(surface.clone(), el, 0.0).unwrap();

        let runs = Rc::new(Cell::new(0));
        let r = runs.clone();
        let fired = trigger.signal();
        let _stop = effect(move || {
            let _ = fired.get();
            r.set(r.get() + 1);
        });
        assert_eq!(runs.get(), 1);

        surface.scroll_to(0.0, 1000.0);
        surface.scroll_to(0.0, 1100.0);
        assert_eq!(runs.get(), 2);
    }
}
