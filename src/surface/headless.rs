//! Headless surface - virtual clock, virtual viewport.
//!
//! Deterministic host used by tests and the terminal demo. Frames only run
//! when the owner calls [`HeadlessSurface::advance`], and intersection is
//! re-evaluated on every scroll, resize or element move.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use tracing::trace;

use super::{FrameCallback, FrameScheduler, IntersectionCallback, IntersectionHost, Observation};
use crate::error::{AnimateError, Result};
use crate::types::{ElementId, FrameId, FrameTime, ObserverId, Rect, Viewport};

// =============================================================================
// STATE
// =============================================================================

struct ObserverEntry {
    element: ElementId,
    margin_px: f32,
    /// Taken out while the callback runs so it can re-enter the surface.
    callback: Option<IntersectionCallback>,
}

/// In-memory rendering surface.
pub struct HeadlessSurface {
    viewport: Cell<Viewport>,
    now: Cell<FrameTime>,
    supports_intersection: bool,

    elements: RefCell<BTreeMap<ElementId, Rect>>,
    next_element: Cell<u32>,

    frames: RefCell<BTreeMap<FrameId, FrameCallback>>,
    next_frame: Cell<u64>,
    frames_requested: Cell<usize>,
    frames_fired: Cell<usize>,

    observers: RefCell<BTreeMap<ObserverId, ObserverEntry>>,
    next_observer: Cell<u64>,
}

impl HeadlessSurface {
    /// Create a surface with a viewport of the given size, scrolled to the top.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Cell::new(Viewport::new(width, height)),
            now: Cell::new(0.0),
            supports_intersection: true,
            elements: RefCell::new(BTreeMap::new()),
            next_element: Cell::new(0),
            frames: RefCell::new(BTreeMap::new()),
            next_frame: Cell::new(0),
            frames_requested: Cell::new(0),
            frames_fired: Cell::new(0),
            observers: RefCell::new(BTreeMap::new()),
            next_observer: Cell::new(0),
        }
    }

    /// Same surface, but reporting no intersection support.
    pub fn without_intersection(mut self) -> Self {
        self.supports_intersection = false;
        self
    }

    // =========================================================================
    // Elements
    // =========================================================================

    /// Register an element at `rect` (page coordinates).
    pub fn insert_element(&self, rect: Rect) -> ElementId {
        let id = ElementId(self.next_element.get());
        self.next_element.set(id.0 + 1);
        self.elements.borrow_mut().insert(id, rect);
        id
    }

    /// Move an element; observers on it are re-evaluated.
    pub fn move_element(&self, id: ElementId, rect: Rect) -> Result<()> {
        match self.elements.borrow_mut().get_mut(&id) {
            Some(slot) => *slot = rect,
            None => return Err(AnimateError::UnknownElement(id)),
        }
        self.notify_observers();
        Ok(())
    }

    /// Remove an element and every observer attached to it. Their owners
    /// see `is_observing` turn false.
    pub fn remove_element(&self, id: ElementId) {
        self.elements.borrow_mut().remove(&id);
        self.observers.borrow_mut().retain(|_, entry| entry.element != id);
    }

    pub fn element_rect(&self, id: ElementId) -> Option<Rect> {
        self.elements.borrow().get(&id).copied()
    }

    // =========================================================================
    // Viewport
    // =========================================================================

    pub fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    /// Scroll the viewport to a page offset and re-evaluate observers.
    pub fn scroll_to(&self, x: f32, y: f32) {
        let mut vp = self.viewport.get();
        vp.scroll_x = x;
        vp.scroll_y = y;
        self.viewport.set(vp);
        self.notify_observers();
    }

    /// Resize the viewport and re-evaluate observers.
    pub fn resize(&self, width: f32, height: f32) {
        let mut vp = self.viewport.get();
        vp.width = width;
        vp.height = height;
        self.viewport.set(vp);
        self.notify_observers();
    }

    // =========================================================================
    // Frame pump
    // =========================================================================

    /// Timestamp of the last repaint.
    pub fn now(&self) -> FrameTime {
        self.now.get()
    }

    /// Run one repaint at `now`.
    ///
    /// Only callbacks pending when the repaint starts run; callbacks they
    /// request land in the next repaint. Callbacks cancelled by an earlier
    /// callback in the same repaint do not run. Returns how many ran.
    pub fn advance(&self, now: FrameTime) -> usize {
        self.now.set(now);
        let due: Vec<FrameId> = self.frames.borrow().keys().copied().collect();
        let mut ran = 0;
        for id in due {
            let callback = self.frames.borrow_mut().remove(&id);
            if let Some(callback) = callback {
                self.frames_fired.set(self.frames_fired.get() + 1);
                ran += 1;
                callback(now);
            }
        }
        trace!(now, ran, "repaint");
        ran
    }

    /// Repaint every `interval_ms` starting at `start` until nothing is
    /// pending or `max_frames` repaints have run. Returns the repaint count.
    pub fn run_frames(&self, start: FrameTime, interval_ms: f64, max_frames: usize) -> usize {
        let mut repaints = 0;
        while repaints < max_frames && self.pending_frames() > 0 {
            self.advance(start + interval_ms * repaints as f64);
            repaints += 1;
        }
        repaints
    }

    // =========================================================================
    // Spies
    // =========================================================================

    /// Total `request_frame` calls since creation.
    pub fn frames_requested(&self) -> usize {
        self.frames_requested.get()
    }

    /// Total frame callbacks actually invoked since creation.
    pub fn frames_fired(&self) -> usize {
        self.frames_fired.get()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.borrow().len()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    // =========================================================================
    // Intersection
    // =========================================================================

    fn notify_observers(&self) {
        let ids: Vec<ObserverId> = self.observers.borrow().keys().copied().collect();
        for id in ids {
            self.notify_observer(id);
        }
    }

    fn notify_observer(&self, id: ObserverId) {
        let viewport = self.viewport.get();
        let taken = {
            let mut observers = self.observers.borrow_mut();
            let Some(entry) = observers.get_mut(&id) else {
                return;
            };
            let Some(rect) = self.elements.borrow().get(&entry.element).copied() else {
                return;
            };
            entry
                .callback
                .take()
                .map(|cb| (cb, viewport.intersects(&rect, entry.margin_px)))
        };
        let Some((mut callback, visible)) = taken else {
            return;
        };

        let observation = callback(visible);

        let mut observers = self.observers.borrow_mut();
        match observation {
            Observation::Disconnect => {
                observers.remove(&id);
            }
            Observation::Keep => {
                // The callback may have unobserved itself already.
                if let Some(entry) = observers.get_mut(&id) {
                    entry.callback = Some(callback);
                }
            }
        }
    }
}

// =============================================================================
// HOST TRAITS
// =============================================================================

impl FrameScheduler for HeadlessSurface {
    fn request_frame(&self, callback: FrameCallback) -> FrameId {
        let id = FrameId(self.next_frame.get());
        self.next_frame.set(id.0 + 1);
        self.frames_requested.set(self.frames_requested.get() + 1);
        self.frames.borrow_mut().insert(id, callback);
        id
    }

    fn cancel_frame(&self, id: FrameId) {
        self.frames.borrow_mut().remove(&id);
    }
}

impl IntersectionHost for HeadlessSurface {
    fn supports_intersection(&self) -> bool {
        self.supports_intersection
    }

    fn observe(
        &self,
        element: ElementId,
        margin_px: f32,
        callback: IntersectionCallback,
    ) -> Result<ObserverId> {
        if !self.elements.borrow().contains_key(&element) {
            return Err(AnimateError::UnknownElement(element));
        }
        let id = ObserverId(self.next_observer.get());
        self.next_observer.set(id.0 + 1);
        self.observers.borrow_mut().insert(
            id,
            ObserverEntry { element, margin_px, callback: Some(callback) },
        );
        // Initial notification, like a browser's first observer entry.
        self.notify_observer(id);
        Ok(id)
    }

    fn unobserve(&self, id: ObserverId) {
        self.observers.borrow_mut().remove(&id);
    }

    fn is_observing(&self, id: ObserverId) -> bool {
        self.observers.borrow().contains_key(&id)
    }
}

// =============================================================================
// TESTS
// =============================================================================
