//! Frame Loop - one pending frame at a time, until the animator says stop.
//!
//! The loop never holds more than one pending frame. Each frame asks the
//! animator for a [`FrameDecision`]; `Stop` ends the loop for good. Pending
//! callbacks hold only a weak reference, so dropping the loop (or calling
//! [`FrameLoop::cancel`]) is enough to guarantee no further updates.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::state::{FrameDecision, FrameDriven};
use crate::surface::FrameScheduler;
use crate::types::{FrameId, FrameTime};

struct LoopInner<D: FrameDriven> {
    scheduler: Rc<dyn FrameScheduler>,
    driven: Rc<RefCell<D>>,
    pending: Cell<Option<FrameId>>,
    finished: Cell<bool>,
    frames: Cell<usize>,
}

/// Owning handle of a frame loop. Dropping it cancels the loop.
pub struct FrameLoop<D: FrameDriven + 'static> {
    inner: Rc<LoopInner<D>>,
}

/// Weak handle that can start a loop without keeping it alive.
pub struct LoopStarter<D: FrameDriven + 'static> {
    inner: Weak<LoopInner<D>>,
}

impl<D: FrameDriven + 'static> Clone for LoopStarter<D> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<D: FrameDriven + 'static> LoopStarter<D> {
    /// Start the loop if it still exists. See [`FrameLoop::start`].
    pub fn start(&self) {
        if let Some(inner) = self.inner.upgrade() {
            schedule(&inner);
        }
    }
}

impl<D: FrameDriven + 'static> FrameLoop<D> {
    pub fn new(scheduler: Rc<dyn FrameScheduler>, driven: Rc<RefCell<D>>) -> Self {
        Self {
            inner: Rc::new(LoopInner {
                scheduler,
                driven,
                pending: Cell::new(None),
                finished: Cell::new(false),
                frames: Cell::new(0),
            }),
        }
    }

    /// Request the first frame. No-op while a frame is pending or once the
    /// loop has finished or been cancelled.
    pub fn start(&self) {
        schedule(&self.inner);
    }

    pub fn starter(&self) -> LoopStarter<D> {
        LoopStarter { inner: Rc::downgrade(&self.inner) }
    }

    /// Cancel the pending frame and refuse any restart. Idempotent.
    pub fn cancel(&self) {
        self.inner.finished.set(true);
        if let Some(id) = self.inner.pending.take() {
            self.inner.scheduler.cancel_frame(id);
            debug!(?id, "frame loop cancelled");
        }
    }

    /// Is a frame currently pending?
    pub fn is_running(&self) -> bool {
        self.inner.pending.get().is_some()
    }

    /// Has the loop stopped for good (animator done or cancelled)?
    pub fn is_finished(&self) -> bool {
        self.inner.finished.get()
    }

    /// Frames delivered to the animator so far.
    pub fn frames_run(&self) -> usize {
        self.inner.frames.get()
    }
}

impl<D: FrameDriven + 'static> Drop for FrameLoop<D> {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn schedule<D: FrameDriven + 'static>(inner: &Rc<LoopInner<D>>) {
    if inner.finished.get() || inner.pending.get().is_some() {
        return;
    }
    let weak = Rc::downgrade(inner);
    let id = inner.scheduler.request_frame(Box::new(move |now: FrameTime| {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        inner.pending.set(None);
        if inner.finished.get() {
            return;
        }
        inner.frames.set(inner.frames.get() + 1);
        let decision = inner.driven.borrow_mut().on_frame(now);
        match decision {
            FrameDecision::Continue => schedule(&inner),
            FrameDecision::Stop => {
                inner.finished.set(true);
                debug!(frames = inner.frames.get(), "frame loop finished");
            }
        }
    }));
    inner.pending.set(Some(id));
}
