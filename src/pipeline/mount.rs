//! Mount API - visibility-gated, frame-driven components.
//!
//! Mounting wires three resources together:
//!
//! 1. a [`VisibilityTrigger`] on the element (intersection observer)
//! 2. a [`FrameLoop`] around the component's animator
//! 3. an effect that starts the loop once the trigger fires
//!
//! Every resource is recorded in a [`Held`] set as it is registered, and
//! released on every exit path: explicit unmount, drop, or a mount that fails
//! halfway through.
//!
//! # Example
//!
//! ```ignore
//! let card = mount_stat_card(&surface, StatCardProps::new(element, 1247))?;
//! surface.scroll_to(0.0, 400.0);
//! surface.run_frames(0.0, 16.0, 200);
//! assert_eq!(card.text(), "1,247");
//! card.unmount();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use bitflags::bitflags;
use spark_signals::effect;
use tracing::debug;

use super::frame_loop::FrameLoop;
use crate::error::Result;
use crate::state::{FrameDriven, VisibilityTrigger};
use crate::surface::Surface;
use crate::types::ElementId;

bitflags! {
    /// Host resources a mounted component currently holds.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Held: u8 {
        const OBSERVER = 1 << 0;
        const FRAME_LOOP = 1 << 1;
        const EFFECT = 1 << 2;
    }
}

/// Cleanup function returned by components.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Mounted
// =============================================================================

/// A mounted visibility-gated animator.
pub struct Mounted<D: FrameDriven + 'static> {
    element: ElementId,
    driven: Rc<RefCell<D>>,
    trigger: Option<VisibilityTrigger>,
    frame_loop: Option<FrameLoop<D>>,
    stop_effect: Option<Cleanup>,
    held: Held,
}

impl<D: FrameDriven + 'static> Mounted<D> {
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Shared animator state (read it between frames).
    pub fn driven(&self) -> &Rc<RefCell<D>> {
        &self.driven
    }

    /// Host resources still registered.
    pub fn held(&self) -> Held {
        let mut held = self.held;
        if !self.trigger.as_ref().is_some_and(|t| t.is_observing()) {
            held.remove(Held::OBSERVER);
        }
        held
    }

    pub fn has_fired(&self) -> bool {
        self.trigger.as_ref().is_some_and(|t| t.has_fired())
    }

    /// Is a frame pending for this component?
    pub fn is_animating(&self) -> bool {
        self.frame_loop.as_ref().is_some_and(|l| l.is_running())
    }

    /// Frames delivered to the animator so far.
    pub fn frames_run(&self) -> usize {
        self.frame_loop.as_ref().map(|l| l.frames_run()).unwrap_or(0)
    }

    /// Tear down now. Same as dropping.
    pub fn unmount(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.held.is_empty() {
            return;
        }
        // Effect first so a late trigger cannot restart the loop.
        if let Some(stop) = self.stop_effect.take() {
            stop();
        }
        if let Some(frame_loop) = self.frame_loop.take() {
            frame_loop.cancel();
        }
        if let Some(mut trigger) = self.trigger.take() {
            trigger.disconnect();
        }
        self.held = Held::empty();
        debug!(element = ?self.element, "unmounted");
    }
}

impl<D: FrameDriven + 'static> Drop for Mounted<D> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Mount `driven` on `element`: it starts receiving frames once the element
/// intersects the viewport grown by `margin_px`.
pub fn mount_driven<S, D>(
    surface: &Rc<S>,
    element: ElementId,
    margin_px: f32,
    driven: D,
) -> Result<Mounted<D>>
where
    S: Surface + 'static,
    D: FrameDriven + 'static,
{
    let mut mounted = Mounted {
        element,
        driven: Rc::new(RefCell::new(driven)),
        trigger: None,
        frame_loop: None,
        stop_effect: None,
        held: Held::empty(),
    };

    // On error `mounted` drops here and releases whatever it holds.
    let trigger = VisibilityTrigger::observe(surface.clone(), element, margin_px)?;
    let fired = trigger.signal();
    mounted.trigger = Some(trigger);
    mounted.held.insert(Held::OBSERVER);

    let frame_loop = FrameLoop::new(surface.clone(), mounted.driven.clone());
    let starter = frame_loop.starter();
    mounted.frame_loop = Some(frame_loop);
    mounted.held.insert(Held::FRAME_LOOP);

    // Runs once now: an element already in view starts on the first frame.
    let stop = effect(move || {
        if fired.get() {
            starter.start();
        }
    });
    mounted.stop_effect = Some(Box::new(stop));
    mounted.held.insert(Held::EFFECT);

    debug!(?element, margin_px, fired = mounted.has_fired(), "mounted");
    Ok(mounted)
}

// =============================================================================
// MountGroup
// =============================================================================

/// Owns cleanups for a set of components and runs them together.
#[derive(Default)]
pub struct MountGroup {
    cleanups: Vec<Cleanup>,
}

impl MountGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a mounted component.
    pub fn adopt<D: FrameDriven + 'static>(&mut self, mounted: Mounted<D>) {
        self.cleanups.push(Box::new(move || mounted.unmount()));
    }

    pub fn push(&mut self, cleanup: Cleanup) {
        self.cleanups.push(cleanup);
    }

    pub fn len(&self) -> usize {
        self.cleanups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cleanups.is_empty()
    }

    /// Unmount everything, most recently mounted first.
    pub fn unmount(mut self) {
        self.release();
    }

    fn release(&mut self) {
        while let Some(cleanup) = self.cleanups.pop() {
            cleanup();
        }
    }
}

impl Drop for MountGroup {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnimateError;
    use crate::state::CountUpAnimator;
    use crate::surface::HeadlessSurface;
    use crate::types::Rect;

    fn setup() -> Rc<HeadlessSurface> {
        Rc::new(HeadlessSurface::new(800.0, 600.0))
    }

    #[test]
    fn test_holds_all_resources_while_pending() {
        let surface = setup();
        let el = surface.insert_element(Rect::new(0.0, 2000.0, 200.0, 80.0));
        let mounted =
            mount_driven(&surface, el, -50.0, CountUpAnimator::new(10, 100).unwrap()).unwrap();
        assert_eq!(mounted.held(), Held::all());
        assert!(!mounted.is_animating());
        assert_eq!(surface.frames_requested(), 0);
    }

    #[test]
    fn test_in_view_starts_on_first_frame() {
        let surface = setup();
        let el = surface.insert_element(Rect::new(0.0, 100.0, 200.0, 80.0));
        let mounted =
            mount_driven(&surface, el, -50.0, CountUpAnimator::new(10, 100).unwrap()).unwrap();
        assert!(mounted.has_fired());
        assert!(mounted.is_animating());
        assert!(!mounted.held().contains(Held::OBSERVER));

        surface.advance(5.0);
        assert_eq!(mounted.driven().borrow().started_at(), Some(5.0));
    }

    #[test]
    fn test_failed_mount_leaves_nothing() {
        let surface = setup();
        let result = mount_driven(
            &surface,
            ElementId(99),
            0.0,
            CountUpAnimator::new(10, 100).unwrap(),
        );
        assert!(matches!(result, Err(AnimateError::UnknownElement(ElementId(99)))));
        assert_eq!(surface.observer_count(), 0);
        assert_eq!(surface.pending_frames(), 0);
    }

    #[test]
    fn test_unmount_releases_everything() {
        let surface = setup();
        let el = surface.insert_element(Rect::new(0.0, 2000.0, 200.0, 80.0));
        let mounted =
            mount_driven(&surface, el, 0.0, CountUpAnimator::new(10, 100).unwrap()).unwrap();
        mounted.unmount();
        assert_eq!(surface.observer_count(), 0);

        // The element scrolling in later starts nothing
        surface.scroll_to(0.0, 1800.0);
        assert_eq!(surface.frames_requested(), 0);
    }

    #[test]
    fn test_removed_element_drops_observer_flag() {
        let surface = setup();
        let el = surface.insert_element(Rect::new(0.0, 2000.0, 200.0, 80.0));
        let mounted =
            mount_driven(&surface, el, 0.0, CountUpAnimator::new(10, 100).unwrap()).unwrap();
        assert!(mounted.held().contains(Held::OBSERVER));

        surface.remove_element(el);
        assert!(!mounted.held().contains(Held::OBSERVER));
        assert!(mounted.held().contains(Held::EFFECT));
    }

    #[test]
    fn test_group_unmounts_all() {
        let surface = setup();
        let mut group = MountGroup::new();
        for i in 0..3 {
            let el = surface.insert_element(Rect::new(0.0, 2000.0 + i as f32 * 100.0, 200.0, 80.0));
            let mounted =
                mount_driven(&surface, el, 0.0, CountUpAnimator::new(10, 100).unwrap()).unwrap();
            group.adopt(mounted);
        }
        assert_eq!(group.len(), 3);
        assert_eq!(surface.observer_count(), 3);

        group.unmount();
        assert_eq!(surface.observer_count(), 0);
    }
}
